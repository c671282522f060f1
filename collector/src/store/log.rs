use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use fedwatchcore::metrics::{MetricSample, MetricsSeries};

/// File-backed metrics store shared between the API host and the driver.
///
/// The backing file holds the full series as pretty-printed JSON and is
/// rewritten on every append, matching what the training side writes.
pub struct MetricsLog {
    path: PathBuf,
    series: Mutex<MetricsSeries>,
}

impl MetricsLog {
    /// Opens the store, loading any previously recorded series.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let series = if path_ref.exists() {
            let contents = fs::read_to_string(path_ref)
                .with_context(|| format!("reading metrics file {}", path_ref.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing metrics file {}", path_ref.display()))?
        } else {
            MetricsSeries::new()
        };

        Ok(Self {
            path: path_ref.to_path_buf(),
            series: Mutex::new(series),
        })
    }

    /// Appends one sample and rewrites the backing file.
    pub fn append(&self, sample: MetricSample) -> anyhow::Result<()> {
        let mut series = self.series.lock().unwrap();
        series.push(sample);
        let contents =
            serde_json::to_string_pretty(&*series).context("encoding metrics series")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing metrics file {}", self.path.display()))?;
        Ok(())
    }

    /// Snapshot of the recorded series.
    pub fn snapshot(&self) -> MetricsSeries {
        self.series.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.series.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
