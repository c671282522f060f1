use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::run::config::RunConfig;
use crate::run::synth::SynthRun;
use crate::store::log::MetricsLog;

/// Drives a simulated training run onto the metrics store.
pub struct Driver {
    config: RunConfig,
}

impl Driver {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, store: Arc<MetricsLog>) -> anyhow::Result<()> {
        let mut synth = SynthRun::new(self.config.clone());
        let cadence = Duration::from_millis(self.config.cadence_ms);

        for _ in 0..self.config.rounds {
            let sample = synth.next_sample();
            info!(
                "round {} -> loss {:.4} accuracy {:.4} epsilon {:.2}",
                sample.round, sample.loss, sample.accuracy, sample.epsilon
            );
            store.append(sample)?;
            tokio::time::sleep(cadence).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn driver_records_one_sample_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MetricsLog::open(dir.path().join("metrics.json")).unwrap());

        let driver = Driver::new(RunConfig::from_args(3, 0));
        driver.run(store.clone()).await.unwrap();

        let series = store.snapshot();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].round, 3);
    }
}
