//! Utility command handlers.

use std::path::Path;

use chroma_driver::config::DriverConfig;
use chroma_sdk::{library_filename, library_name};

use super::CommandResult;

/// Print the library name and file name selected for an architecture
pub fn library_name_for(arch: &str) -> CommandResult {
    let name = library_name(arch);
    println!(
        "{arch}: {name} ({})",
        library_filename(name).to_string_lossy()
    );
    Ok(())
}

/// Write the configuration to disk
pub fn save_config(config: &DriverConfig, path: &Path) -> CommandResult {
    config.save(path)?;
    println!("Config saved to {}", path.display());
    Ok(())
}
