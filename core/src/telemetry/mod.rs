pub mod log;
pub mod metrics;

pub use log::PollLog;
pub use metrics::{FetchRecorder, FetchTally};
