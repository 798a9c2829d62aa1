//! Application configuration for HotelScrub.
//!
//! User config lives at `~/.hotelscrub/hotelscrub.toml`.
//! CLI flags override config file values, which override defaults.
//!
//! Cleaning policy (drop-vs-clamp, city derivation) is deliberately NOT
//! configurable — the rules are fixed so two runs over the same input can
//! never disagree.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HotelScrubError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "hotelscrub.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".hotelscrub";

// ---------------------------------------------------------------------------
// Config structs (matching hotelscrub.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input file settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter of the raw extract. Must be a single byte.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> String {
    ",".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the per-city aggregates file next to the cleaned output.
    #[serde(default = "default_true")]
    pub write_aggregates: bool,

    /// Write the JSON run report next to the cleaned output.
    #[serde(default = "default_true")]
    pub write_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_aggregates: true,
            write_report: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// The input delimiter as a single byte, validated.
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(&self.input.delimiter)
    }
}

/// Validate a delimiter string down to the single byte the CSV layer needs.
///
/// Accepts the two-character escape `\t` for tab-separated input.
pub fn delimiter_byte(s: &str) -> Result<u8> {
    let bytes = match s {
        "\\t" => b"\t".as_slice(),
        other => other.as_bytes(),
    };
    match bytes {
        [b] => Ok(*b),
        _ => Err(HotelScrubError::validation(format!(
            "delimiter must be a single byte, got {s:?}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.hotelscrub/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| HotelScrubError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.hotelscrub/hotelscrub.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| HotelScrubError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        HotelScrubError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| HotelScrubError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| HotelScrubError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| HotelScrubError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("delimiter"));
        assert!(toml_str.contains("write_aggregates"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.input.delimiter, ",");
        assert!(parsed.output.write_report);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[input]
delimiter = ";"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.input.delimiter, ";");
        assert!(config.output.write_aggregates);
    }

    #[test]
    fn delimiter_validation() {
        assert_eq!(delimiter_byte(",").unwrap(), b',');
        assert_eq!(delimiter_byte(";").unwrap(), b';');
        assert_eq!(delimiter_byte("\\t").unwrap(), b'\t');
        assert!(delimiter_byte("").is_err());
        assert!(delimiter_byte(",,").is_err());
        assert!(delimiter_byte("é").is_err());
    }
}
