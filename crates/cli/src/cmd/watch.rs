//! Watch the configured directory until Ctrl+C

use anyhow::{Context, Result};
use cli_lib::config::WatchConfig;
use cli_lib::console::ConsoleSink;
use tokio_util::sync::CancellationToken;
use tracing::info;
use watcher::{IgnoreRules, PollingWatcher, StopReason};

pub async fn run(config: WatchConfig) -> Result<()> {
    let ignore = IgnoreRules::from_patterns(&config.watch_directory, &config.ignore)?;
    if !ignore.patterns().is_empty() {
        info!("Ignoring {} pattern(s)", ignore.patterns().len());
    }

    // Registered before the baseline so an early Ctrl+C still shuts down cleanly
    let cancel = CancellationToken::new();
    listen_for_interrupt(cancel.clone())?;

    let mut watcher = PollingWatcher::new(
        config.watch_directory.clone(),
        config.interval(),
        ignore,
        ConsoleSink::stdout(),
    );

    let reason = watcher
        .run_with(cancel, |_| {
            println!("Started watching directory: {}", config.watch_directory.display());
            println!("Press Ctrl+C to stop...");
        })
        .await
        .context("Watcher stopped")?;

    match reason {
        StopReason::Interrupted => println!("\nStopping directory watcher"),
    }

    Ok(())
}

/// Cancel `cancel` on SIGINT
///
/// The handler is installed before returning, replacing the default
/// terminate-on-SIGINT behaviour.
#[cfg(unix)]
fn listen_for_interrupt(cancel: CancellationToken) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;
    tokio::spawn(async move {
        if sigint.recv().await.is_some() {
            cancel.cancel();
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn listen_for_interrupt(cancel: CancellationToken) -> Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => cancel.cancel(),
            Err(e) => tracing::warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });
    Ok(())
}
