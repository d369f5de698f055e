use std::path::Path;

use serde::Deserialize;

use crate::error::{ConsolidatorError, Result};

/// Runtime configuration, loaded from a TOML file.
///
/// `in_path` and `out_path` are required; everything else defaults to empty,
/// and an empty input prefix disables that source type.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub files: FileSettings,
    #[serde(default)]
    pub email: EmailSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub in_path: String,
    #[serde(default)]
    pub out_path: String,
    #[serde(default)]
    pub archive_path: String,

    #[serde(default)]
    pub in_servers: String,
    #[serde(default)]
    pub out_servers: String,

    #[serde(default)]
    pub in_eud: String,
    #[serde(default)]
    pub out_eud: String,

    #[serde(default)]
    pub in_mobile: String,
    #[serde(default)]
    pub out_mobile: String,

    #[serde(default)]
    pub in_terminals: String,
    #[serde(default)]
    pub out_terminals: String,

    #[serde(default)]
    pub in_network_na: String,
    #[serde(default)]
    pub in_network_asia: String,
    #[serde(default)]
    pub out_network: String,

    #[serde(default)]
    pub in_printer_na: String,
    #[serde(default)]
    pub out_printer: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub email_to: String,
    #[serde(default)]
    pub email_cc: String,
    #[serde(default)]
    pub email_to_error: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConsolidatorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Fatal checks: unset input/output paths or a missing input directory
    /// abort the whole batch before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.files.in_path.is_empty() || self.files.out_path.is_empty() {
            return Err(ConsolidatorError::Config(
                "file settings are not configured properly (in_path/out_path)".to_string(),
            ));
        }
        if !Path::new(&self.files.in_path).is_dir() {
            return Err(ConsolidatorError::Config(format!(
                "Input path '{}' does not exist. Please check the configuration.",
                self.files.in_path
            )));
        }
        Ok(())
    }
}
