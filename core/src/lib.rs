//! Polling and view-state core for the FedWatch training dashboard.
//!
//! The modules keep a bounded, ordered view of training metrics fresh under
//! periodic network fetches. Each tick is independent: a failed fetch is
//! recorded and the loop carries on, while a successful fetch replaces the
//! view state wholesale and notifies whoever renders it.

pub mod metrics;
pub mod poll;
pub mod prelude;
pub mod telemetry;

pub use prelude::{FetchError, FetchResult, PollConfig, SeriesSource};
