use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum StopWordPreset {
    Default,
    None,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum StopWords {
    Preset(StopWordPreset),
    Custom(Vec<String>),
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct VectorizerConfig {
    pub stop_words: Option<StopWords>,
    pub stop_words_file: Option<String>,
    pub min_count: Option<f64>,
    pub normalize_keys: Option<bool>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown stop word preset `{0}`. It must be `default` or `none`")]
    UnknownPreset(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl FromStr for StopWordPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(StopWordPreset::Default),
            "none" => Ok(StopWordPreset::None),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl FromStr for VectorizerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl TryFrom<&Path> for VectorizerConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
