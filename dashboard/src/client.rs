use fedwatchcore::metrics::MetricsSeries;
use fedwatchcore::prelude::{FetchError, SeriesFuture, SeriesSource};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9000/metrics";
pub const DEFAULT_POLL_MS: u64 = 5000;

/// Runtime settings for the metrics client.
pub struct ClientSettings {
    pub endpoint: String,
    pub interval_ms: u64,
}

impl ClientSettings {
    /// Reads `FEDWATCH_METRICS_URL` and `FEDWATCH_POLL_MS`, falling back to
    /// the defaults above.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("FEDWATCH_METRICS_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        let interval_ms = std::env::var("FEDWATCH_POLL_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_POLL_MS);
        Self {
            endpoint,
            interval_ms,
        }
    }
}

/// Fetches the metrics series over HTTP.
pub struct HttpSeriesSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSeriesSource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    async fn fetch(&self) -> Result<MetricsSeries, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

impl SeriesSource for HttpSeriesSource {
    fn fetch_series(&self) -> SeriesFuture<'_> {
        Box::pin(self.fetch())
    }
}
