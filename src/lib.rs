// Razer Chroma keyboard driver - shared library
// Configuration used by the CLI

pub mod config;

pub use config::{DriverConfig, LibraryConfig};
