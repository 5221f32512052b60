//! Driver configuration
//!
//! Stored as TOML, by default at `~/.config/chroma-driver/config.toml`:
//!
//! ```toml
//! log_level = "info"
//!
//! [library]
//! path = "C:/Program Files/Razer Chroma SDK/bin/RzChromaSDK64.dll"
//! arch = "x86_64"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chroma_sdk::{library_filename, library_name, ChromaError, NativeLibrary};

/// Where to find the native SDK library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Explicit library file; skips name selection entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Architecture string used for name selection (default: host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl LibraryConfig {
    /// Architecture used for name selection
    pub fn arch(&self) -> &str {
        self.arch.as_deref().unwrap_or(std::env::consts::ARCH)
    }

    /// File name or path that `load` will open
    pub fn target(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => PathBuf::from(library_filename(library_name(self.arch()))),
        }
    }

    /// Load the configured library
    pub fn load(&self) -> Result<NativeLibrary, ChromaError> {
        match &self.path {
            Some(path) => NativeLibrary::open(path),
            None => NativeLibrary::load_for_arch(self.arch()),
        }
    }
}

/// Complete driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub library: LibraryConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            library: LibraryConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chroma-driver")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: DriverConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: DriverConfig = toml::from_str("").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.log_level, "info");
        assert!(config.library.path.is_none());
    }

    #[test]
    fn test_arch_override_selects_name() {
        let config: DriverConfig = toml::from_str(
            r#"
            [library]
            arch = "x86"
            "#,
        )
        .unwrap();
        assert_eq!(config.library.arch(), "x86");
        let target = config.library.target();
        let target = target.to_string_lossy();
        assert!(target.contains("RzChromaSDK"));
        assert!(!target.contains("RzChromaSDK64"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let config: DriverConfig = toml::from_str(
            r#"
            log_level = "debug"

            [library]
            path = "/opt/razer/libRzChromaSDK64.so"
            arch = "x86"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.library.target(),
            PathBuf::from("/opt/razer/libRzChromaSDK64.so")
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<DriverConfig, _> = toml::from_str("library_path = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_serializes() {
        let toml_str = toml::to_string_pretty(&DriverConfig::default()).unwrap();
        assert!(toml_str.contains("log_level = \"info\""));
        let parsed: DriverConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, DriverConfig::default());
    }
}
