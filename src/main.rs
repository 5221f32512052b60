//! Razer Chroma Keyboard Driver CLI
//!
//! A command-line interface for applying Chroma keyboard effects.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use chroma_driver::config::DriverConfig;
use chroma_sdk::KeyboardEffect;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::effect;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(DriverConfig::default_path);
    let mut config = DriverConfig::load(&config_path)?;

    // Command-line flags override the config file
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if let Some(path) = cli.library.clone() {
        config.library.path = Some(path);
    }
    if let Some(arch) = cli.arch.clone() {
        config.library.arch = Some(arch);
    }

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    debug!("Config: {:?} (from {})", config, config_path.display());

    let library = &config.library;

    let chosen = match cli.command {
        // === Effects ===
        Commands::Static { color } => effect::static_effect(&color)?,
        Commands::Breathing { color, second } => {
            effect::breathing(color.as_deref(), second.as_deref())?
        }
        Commands::Reactive { color, duration } => effect::reactive(&color, &duration)?,
        Commands::Wave { direction } => effect::wave(&direction)?,
        Commands::Spectrum => KeyboardEffect::SpectrumCycling,
        Commands::Off => KeyboardEffect::None,
        Commands::Custom { color, keys } => effect::custom(&color, &keys)?,
        // Validated before the SDK is loaded
        Commands::Apply { file } => effect::from_file(&file)?,

        // === Utility ===
        Commands::LibraryName { target_arch } => {
            let arch = target_arch.as_deref().unwrap_or(library.arch());
            return commands::utility::library_name_for(arch);
        }
        Commands::SaveConfig => {
            return commands::utility::save_config(&config, &config_path);
        }
    };

    commands::with_session(library, cli.hold, |sdk| effect::apply(sdk, &chosen))
}
