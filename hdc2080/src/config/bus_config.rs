use serde::Deserialize;
use std::fs;

use crate::errors::{ConfigError, ConfigResult};

/// Root structure for loading `[[bus]]` style TOML config
#[derive(Debug, Deserialize)]
pub struct BusConfig {
    #[serde(rename = "bus")]
    pub buses: Vec<BusEntry>,
}

/// One bus entry
#[derive(Debug, Clone, Deserialize)]
pub struct BusEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BusKind,
    pub path: String,
}

/// Bus types a board can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    I2c,
}

impl BusConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Look up a bus by id
    pub fn find(&self, id: &str) -> ConfigResult<&BusEntry> {
        self.buses
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| ConfigError::BusNotFound { bus: id.to_string() })
    }
}

/// Load bus config file
pub fn load_bus_config(path: &str) -> ConfigResult<BusConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    BusConfig::parse(&content)
}
