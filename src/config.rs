use crate::warranty::DurationUnit;
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

pub const APP_DIR: &str = ".warranty-countdown";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub warranty: WarrantyConfig,
    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WarrantyConfig {
    /// Coverage applied to a sale recorded without explicit terms
    #[serde(default = "default_duration_value")]
    pub default_duration_value: u32,
    #[serde(default = "default_duration_unit")]
    pub default_duration_unit: DurationUnit,
}

fn default_duration_value() -> u32 {
    12
}

fn default_duration_unit() -> DurationUnit {
    DurationUnit::Months
}

impl Default for WarrantyConfig {
    fn default() -> Self {
        Self {
            default_duration_value: default_duration_value(),
            default_duration_unit: default_duration_unit(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StateConfig {
    /// Optional override for state directory (for testing)
    pub state_dir_override: Option<PathBuf>,
}

impl WarrantyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_duration_value == 0 {
            anyhow::bail!("Default warranty duration must be greater than 0");
        }
        Ok(())
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.warranty.validate()?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(home::home_dir()
        .context("Could not find home directory")?
        .join(APP_DIR)
        .join("config.toml"))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Load `~/.warranty-countdown/config.toml`, falling back to defaults when
/// the file does not exist.
pub fn load() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_from_path(&path)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
