use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters for a simulated training run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub rounds: u64,
    pub cadence_ms: u64,
    pub start_loss: f64,
    pub target_accuracy: f64,
    pub noise: f64,
    pub epsilon_per_round: f64,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounds: 30,
            cadence_ms: 2000,
            start_loss: 0.9,
            target_accuracy: 0.97,
            noise: 0.02,
            epsilon_per_round: 0.35,
            seed: 0,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(rounds: u64, cadence_ms: u64) -> Self {
        Self {
            rounds,
            cadence_ms,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_curve_defaults() {
        let cfg = RunConfig::from_args(12, 500);
        assert_eq!(cfg.rounds, 12);
        assert_eq!(cfg.cadence_ms, 500);
        assert_eq!(cfg.start_loss, RunConfig::default().start_loss);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"rounds: 5\ncadence_ms: 100\nseed: 7\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = RunConfig::load(&path).unwrap();
        assert_eq!(cfg.rounds, 5);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn config_load_reports_the_failing_path() {
        let err = RunConfig::load("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
