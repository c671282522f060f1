pub mod sample;

pub use sample::{MetricSample, MetricsSeries};
