use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrolltune_core::{Axis, DisplaySize, EffectModifier, InputModifier, ModifierCombination, SettingsSnapshot};

mod commands;

#[derive(Parser)]
#[command(name = "scrolltune")]
#[command(author, version, about = "Inspect resolved scroll configurations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ~/.config/scrolltune/scroll.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configuration for a modifier context
    Resolve {
        #[command(flatten)]
        selector: Selector,
    },
    /// Print samples of the acceleration curve for a modifier context
    Curve {
        #[command(flatten)]
        selector: Selector,
        /// Number of samples
        #[arg(long, default_value_t = 20)]
        samples: usize,
        /// First tick speed to sample (ticks per second)
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Last tick speed to sample (ticks per second)
        #[arg(long, default_value_t = 100.0)]
        to: f64,
    },
    /// List the animation curve presets
    Presets,
    /// Reload the settings file whenever it changes
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 2)]
        interval_secs: u64,
    },
}

/// Selects one modifier context
#[derive(Args)]
struct Selector {
    /// Input modifier: none, quick, precise
    #[arg(short, long, default_value = "none")]
    input: InputModifier,
    /// Effect modifier, e.g. zoom or horizontal_scroll
    #[arg(short, long, default_value = "none")]
    effect: EffectModifier,
    /// Scroll axis: vertical, horizontal
    #[arg(short, long, default_value = "vertical")]
    axis: Axis,
    /// Width of the display under the pointer
    #[arg(long, default_value_t = 1920)]
    width: u32,
    /// Height of the display under the pointer
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

impl Selector {
    fn modifiers(&self) -> ModifierCombination {
        ModifierCombination::new(self.input, self.effect)
    }

    fn display(&self) -> DisplaySize {
        DisplaySize::new(self.width, self.height)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(SettingsSnapshot::default_path);

    match cli.command {
        Commands::Resolve { selector } => commands::resolve::run(&settings_path, &selector),
        Commands::Curve {
            selector,
            samples,
            from,
            to,
        } => commands::curve::run(&settings_path, &selector, samples, from, to),
        Commands::Presets => commands::presets::run(),
        Commands::Watch { interval_secs } => commands::watch::run(settings_path, interval_secs).await,
    }
}
