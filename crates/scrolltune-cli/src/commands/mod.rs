pub mod curve;
pub mod presets;
pub mod resolve;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use scrolltune_core::{ConfigResolver, DisplaySize, FixedDisplay, SettingsSnapshot};

/// Build a resolver from the settings file, falling back to defaults if it is missing
fn load_resolver(settings_path: &Path, display: DisplaySize) -> Result<ConfigResolver> {
    let snapshot = SettingsSnapshot::load_or_default(settings_path)
        .with_context(|| format!("Failed to read settings from {}", settings_path.display()))?;
    let resolver = ConfigResolver::new(snapshot, Arc::new(FixedDisplay(display)))
        .with_context(|| format!("Invalid settings in {}", settings_path.display()))?;
    Ok(resolver)
}
