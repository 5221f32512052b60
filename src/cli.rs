// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chroma_driver")]
#[command(author, version, about = "Razer Chroma keyboard lighting driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/chroma-driver/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Native SDK library file (overrides config and name selection)
    #[arg(long, global = true, value_name = "FILE")]
    pub library: Option<PathBuf>,

    /// Architecture string used to pick the library name (default: host)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Keep the SDK session open after applying, until Ctrl-C
    ///
    /// The SDK restores the previous lighting once the session is released.
    #[arg(long, global = true)]
    pub hold: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Effects ===
    /// Set the whole keyboard to one color
    #[command(visible_aliases = ["color", "s"])]
    Static {
        /// Color (#RRGGBB or a name like 'red')
        color: String,
    },

    /// Breathe between two colors, or through random colors if none are given
    #[command(visible_alias = "b")]
    Breathing {
        /// First color
        color: Option<String>,
        /// Second color (required with the first)
        second: Option<String>,
    },

    /// Light keys as they are pressed
    #[command(visible_alias = "r")]
    Reactive {
        /// Color (#RRGGBB or a name)
        color: String,
        /// How long keys stay lit (short, medium, long)
        #[arg(short, long, default_value = "medium")]
        duration: String,
    },

    /// Color wave across the keyboard
    #[command(visible_alias = "w")]
    Wave {
        /// Direction (ltr, rtl)
        #[arg(short, long, default_value = "ltr")]
        direction: String,
    },

    /// Cycle through the color spectrum
    #[command(visible_aliases = ["spectrum-cycling", "rainbow"])]
    Spectrum,

    /// Turn the effect off
    #[command(visible_alias = "none")]
    Off,

    /// Fill the custom grid with one color, optionally lighting single keys
    Custom {
        /// Base color for every key
        color: String,
        /// Per-key colors as ROW,COLUMN=COLOR (e.g. 2,3=#FF0000)
        #[arg(short, long = "key", value_name = "ROW,COL=COLOR")]
        keys: Vec<String>,
    },

    /// Apply an effect described in a TOML file
    #[command(visible_alias = "a")]
    Apply {
        /// Effect file
        file: PathBuf,
    },

    // === Utility ===
    /// Print the SDK library name selected for an architecture
    LibraryName {
        /// Architecture string (default: host or --arch)
        target_arch: Option<String>,
    },

    /// Write the current configuration to the config file
    SaveConfig,
}
