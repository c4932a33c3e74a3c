use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use scrolltune_core::{ConfigObserver, DisplaySize, ResolvedConfig, SettingsSnapshot};

use super::resolve::print_config;

/// Prints the new default configuration after every effective reload
struct PrintingObserver;

impl ConfigObserver for PrintingObserver {
    fn scroll_config_changed(&self, config: &Arc<ResolvedConfig>) {
        println!("Settings changed, new default configuration:\n");
        print_config(config);
        println!();
    }
}

pub async fn run(settings_path: PathBuf, interval_secs: u64) -> Result<()> {
    if interval_secs == 0 {
        bail!("Poll interval must be at least 1 second");
    }

    let resolver = super::load_resolver(&settings_path, DisplaySize::new(1920, 1080))?;
    resolver.subscribe(Arc::new(PrintingObserver));

    // Create shutdown channel
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    println!(
        "Watching {} every {} seconds. Press Ctrl+C to stop.\n",
        settings_path.display(),
        interval_secs
    );
    print_config(&resolver.current());
    println!();

    let mut poll_interval = tokio::time::interval(Duration::from_secs(interval_secs));
    // Skip the first tick (fires immediately)
    poll_interval.tick().await;

    loop {
        tokio::select! {
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }

            _ = poll_interval.tick() => {
                let snapshot = match SettingsSnapshot::load_or_default(&settings_path) {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        warn!("Failed to read settings: {}", e);
                        continue;
                    }
                };
                match resolver.reload(snapshot) {
                    Ok(true) => info!("Settings reloaded (generation {})", resolver.generation()),
                    Ok(false) => debug!("Settings unchanged"),
                    Err(e) => warn!("Ignoring invalid settings: {}", e),
                }
            }
        }
    }

    println!("Stopped watching.");
    Ok(())
}
