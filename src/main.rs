use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vuln_monitor::cli::Cli;
use vuln_monitor::config::{Config, LogFormat};
use vuln_monitor::monitor::Monitor;
use vuln_monitor::notifiers::Notifier;
use vuln_monitor::scheduler::Ticker;
use vuln_monitor::scrapers::MailingListArchive;
use vuln_monitor::storage::FileVisitedStore;
use vuln_monitor::utils::clock::SystemClock;
use vuln_monitor::utils::http::create_client;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Invalid configuration exits non-zero before the loop starts
    let config = Config::load(&cli)?;

    init_logging(config.log_format)?;
    info!("Starting Vuln Monitor");

    let client = create_client(&config.user_agent, config.request_timeout())?;
    let archive = MailingListArchive::new(client.clone(), &config.archive_url)?;
    let store = FileVisitedStore::new(&config.state_dir).await?;
    let notifier = Notifier::from_config(&config, &client);
    let keywords = config.keyword_set();

    info!(
        archive = %archive.base_url(),
        keywords = ?keywords.as_slice(),
        channels = ?notifier.channel_names(),
        interval_minutes = config.interval_minutes,
        "Configuration loaded"
    );

    let mut monitor = Monitor::new(
        Box::new(archive),
        Box::new(store),
        notifier,
        keywords,
        Arc::new(SystemClock),
    );

    if cli.once {
        let report = monitor.run_cycle().await?;
        info!(
            entries = report.entries,
            matched = report.matched,
            delivery_failures = report.delivery_failures,
            "Single cycle completed"
        );
        return Ok(());
    }

    let mut ticker = Ticker::new(config.interval());
    monitor.run(&mut ticker, None).await;

    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("vuln_monitor=info".parse()?);
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    Ok(())
}
