use serde::{Deserialize, Serialize};

/// Metrics reported for one training round.
///
/// `round` is ordinal and increases monotonically within a series; the other
/// fields are trusted as delivered. Unknown fields in a payload are ignored,
/// a missing or mistyped known field rejects the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub round: u64,
    pub loss: f64,
    pub accuracy: f64,
    pub epsilon: f64,
}

impl MetricSample {
    pub fn new(round: u64, loss: f64, accuracy: f64, epsilon: f64) -> Self {
        Self {
            round,
            loss,
            accuracy,
            epsilon,
        }
    }
}

/// Ordered sequence of samples, kept in source order.
pub type MetricsSeries = Vec<MetricSample>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_decodes_and_ignores_unknown_fields() {
        let sample: MetricSample = serde_json::from_str(
            r#"{"round": 3, "loss": 0.42, "accuracy": 0.81, "epsilon": 1.9, "clients": 8}"#,
        )
        .unwrap();
        assert_eq!(sample, MetricSample::new(3, 0.42, 0.81, 1.9));
    }

    #[test]
    fn sample_rejects_missing_fields() {
        let result = serde_json::from_str::<MetricSample>(r#"{"round": 3, "loss": 0.42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn sample_rejects_mistyped_round() {
        let result = serde_json::from_str::<MetricSample>(
            r#"{"round": "three", "loss": 0.4, "accuracy": 0.8, "epsilon": 1.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn series_preserves_source_order() {
        let series: MetricsSeries = serde_json::from_str(
            r#"[{"round": 2, "loss": 0.5, "accuracy": 0.7, "epsilon": 1.2},
                {"round": 1, "loss": 0.9, "accuracy": 0.1, "epsilon": 1.0}]"#,
        )
        .unwrap();
        assert_eq!(series[0].round, 2);
        assert_eq!(series[1].round, 1);
    }
}
