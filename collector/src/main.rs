use anyhow::Context;
use clap::Parser;
use run::config::RunConfig;
use run::driver::Driver;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use store::host::MetricsHost;
use store::log::MetricsLog;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod run;
mod store;

#[derive(Parser)]
#[command(author, version, about = "Metrics host and training driver for the FedWatch dashboard")]
struct Args {
    /// Serve the metrics API until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    /// Drive a synthetic training run onto the store
    #[arg(long, default_value_t = false)]
    simulate: bool,
    /// Load a run config from YAML
    #[arg(long)]
    run_config: Option<PathBuf>,
    #[arg(long, default_value_t = 30)]
    rounds: u64,
    /// Milliseconds between simulated rounds
    #[arg(long, default_value_t = 2000)]
    cadence_ms: u64,
    /// JSON file backing the metrics store
    #[arg(long, default_value = "metrics.json")]
    metrics_file: PathBuf,
    /// Bind address for the metrics API
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let run_config = if let Some(path) = args.run_config {
        RunConfig::load(path)?
    } else {
        RunConfig::from_args(args.rounds, args.cadence_ms)
    };

    let store = Arc::new(MetricsLog::open(&args.metrics_file)?);

    let _host = if args.serve {
        let host = MetricsHost::spawn(store.clone(), args.bind);
        println!("Metrics API on http://{} (Ctrl+C to stop)...", args.bind);
        Some(host)
    } else {
        None
    };

    if args.simulate {
        let driver = Driver::new(run_config);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the simulated run")?;
        runtime.block_on(driver.run(store.clone()))?;
        println!("Simulated run complete -> {} rounds on record", store.len());
    }

    if args.serve {
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
