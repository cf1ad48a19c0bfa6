mod classifier;
mod cleaner;
mod config;
mod engine;
mod models;
mod source;
mod storage;
mod types;

use std::future::pending;
use std::io::stderr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tokio::sync::watch;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::PipelineConfig;
use crate::engine::BatchEngine;
use crate::source::TransactionGenerator;
use crate::storage::CsvStore;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let log_level = args.get(1)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);
    let seed = args.get(2).and_then(|s| s.parse::<u64>().ok());

    setup_logging(log_level);

    info!("Transaction Processing Pipeline");

    let config = PipelineConfig::default();
    let store = Arc::new(CsvStore::new(&config));
    let source = match seed {
        Some(seed) => TransactionGenerator::seeded(seed),
        None => TransactionGenerator::new()
    };

    let mut engine = BatchEngine::new(config, source, store);
    engine.setup()?;

    let (sender, receiver) = watch::channel(false);

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Pipeline stopped by user");
                let _ = sender.send(true);
            }
            Err(error) => {
                //NOTE: Dropping the sender would stop the engine, so keep it alive and run without a stop signal
                error!("Unable to listen for the interrupt signal: {error}");
                pending::<()>().await;
            }
        }
    });

    info!("Press Ctrl+C to stop");

    let summary = engine.run(receiver).await;

    info!("Total batches processed: {}", summary.batches);

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
