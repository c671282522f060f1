use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use fedwatchcore::metrics::MetricSample;
use serde_json::json;
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

use crate::store::log::MetricsLog;

#[derive(Debug)]
struct HostError;

impl warp::reject::Reject for HostError {}

/// Filter tree for the metrics API: GET serves the recorded series, POST
/// appends one pushed sample.
pub fn metrics_routes(
    store: Arc<MetricsLog>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let get_route = warp::path("metrics")
        .and(warp::get())
        .and(store_filter.clone())
        .map(|store: Arc<MetricsLog>| warp::reply::json(&store.snapshot()));

    let post_route = warp::path("metrics")
        .and(warp::post())
        .and(warp::body::json())
        .and(store_filter)
        .and_then(
            |sample: MetricSample, store: Arc<MetricsLog>| async move {
                match store.append(sample) {
                    Ok(()) => Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok"})),
                        StatusCode::OK,
                    )),
                    Err(err) => {
                        eprintln!("metrics ingest error: {}", err);
                        Err(warp::reject::custom(HostError))
                    }
                }
            },
        );

    get_route.or(post_route)
}

/// Hosts the metrics API on a dedicated thread with its own runtime.
pub struct MetricsHost;

impl MetricsHost {
    pub fn spawn(store: Arc<MetricsLog>, address: SocketAddr) -> Self {
        thread::spawn(move || {
            let routes = metrics_routes(store);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedwatchcore::metrics::MetricsSeries;

    fn test_store() -> (Arc<MetricsLog>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MetricsLog::open(dir.path().join("metrics.json")).unwrap());
        (store, dir)
    }

    #[tokio::test]
    async fn get_serves_an_empty_series_before_any_round() {
        let (store, _dir) = test_store();
        let routes = metrics_routes(store);
        let response = warp::test::request().path("/metrics").reply(&routes).await;
        assert_eq!(response.status(), 200);
        let body: MetricsSeries = serde_json::from_slice(response.body()).unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn get_serves_the_recorded_series() {
        let (store, _dir) = test_store();
        store.append(MetricSample::new(1, 0.9, 0.1, 1.0)).unwrap();
        let routes = metrics_routes(store);

        let response = warp::test::request().path("/metrics").reply(&routes).await;
        assert_eq!(response.status(), 200);
        let body: MetricsSeries = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, vec![MetricSample::new(1, 0.9, 0.1, 1.0)]);
    }

    #[tokio::test]
    async fn post_appends_a_pushed_sample() {
        let (store, _dir) = test_store();
        let routes = metrics_routes(store.clone());

        let response = warp::test::request()
            .method("POST")
            .path("/metrics")
            .json(&MetricSample::new(4, 0.3, 0.9, 2.1))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(store.snapshot(), vec![MetricSample::new(4, 0.3, 0.9, 2.1)]);
    }
}
