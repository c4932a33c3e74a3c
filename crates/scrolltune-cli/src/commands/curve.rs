use std::path::Path;

use anyhow::{bail, Result};

use scrolltune_core::DisplayContext;

use crate::Selector;

pub fn run(settings_path: &Path, selector: &Selector, samples: usize, from: f64, to: f64) -> Result<()> {
    if samples < 2 {
        bail!("Need at least 2 samples, got {}", samples);
    }
    if !(from < to) {
        bail!("Sample range is empty: {} .. {}", from, to);
    }

    let resolver = super::load_resolver(settings_path, selector.display())?;
    let config = resolver.resolve(selector.modifiers(), selector.axis, &DisplayContext::default());

    println!(
        "Acceleration curve for {} ({} axis):\n",
        selector.modifiers(),
        selector.axis.as_str()
    );
    println!("  {:>10}  {:>10}", "ticks/s", "px/tick");
    for (x, y) in config.acceleration_curve().trace(from, to, samples) {
        println!("  {:>10.2}  {:>10.2}", x, y);
    }
    Ok(())
}
