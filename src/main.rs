use anyhow::Context;
use clap::Parser;
use spot_etl::cli::Cli;
use spot_etl::config::Config;
use spot_etl::pipeline::Pipeline;
use spot_etl::scheduler::Scheduler;
use spot_etl::shutdown;
use spot_etl::source::CoinbaseSource;
use spot_etl::store::PgQuoteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Seed the environment before reading configuration
    match &cli.env_file {
        Some(path) => {
            dotenv::from_path(path)
                .with_context(|| format!("could not load env file {}", path.display()))?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    let config = Config::from_env()?;

    let _guard = spot_etl::telemetry::init_telemetry(&config.telemetry)?;

    tracing::info!(endpoint = %config.source.endpoint, "Starting spot-etl");

    let store = PgQuoteStore::connect(&config.store)
        .await
        .context("could not establish store connectivity")?;
    store
        .ensure_schema()
        .await
        .context("could not provision the quote table")?;

    let source = CoinbaseSource::with_config(config.source);
    let scheduler = Scheduler::new(Pipeline::new(source, store), config.scheduler);

    let (trigger, shutdown_signal) = shutdown::channel();
    tokio::spawn(shutdown::listen_for_signals(trigger));

    scheduler.run(shutdown_signal).await;

    Ok(())
}
