use std::{path::Path, str::FromStr};

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use tokio::fs::read_to_string;

use crate::snapshot::index::DuplicatePolicy;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Read buffer capacity used when opening a snapshot file.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl LoaderConfig {
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = read_to_string(path).await?;
        Self::from_str(&config_str)
    }

    pub async fn from_optional_path<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path).await,
            None => Ok(Self::default()),
        }
    }
}

impl FromStr for LoaderConfig {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() -> Result<()> {
        let config = LoaderConfig::from_str("duplicates: reject\nbuffer_size: 4096\n")?;
        assert_eq!(
            config,
            LoaderConfig {
                duplicates: DuplicatePolicy::Reject,
                buffer_size: 4096,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_empty_config_is_default() -> Result<()> {
        assert_eq!(LoaderConfig::from_str("{}")?, LoaderConfig::default());
        Ok(())
    }

    #[test]
    fn parse_unknown_policy_fails() {
        assert!(LoaderConfig::from_str("duplicates: first_wins").is_err());
    }
}
