pub mod session;
pub mod state;

pub use session::PollSession;
pub use state::{SeriesState, ViewState};
