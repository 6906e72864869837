//! Board-specific constants and configuration for an HDC2080 breakout wired
//! to a Raspberry Pi I2C header.

pub mod monitor;

use hdc2080::config::{BusConfig, SensorConfig};
use hdc2080::{load_bus_config, load_sensor_config, ConfigResult};
use std::path::Path;
use tracing::warn;

/// Default configuration directory (embedded at compile time)
pub const CONFIG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config");

/// Embedded TOML configurations
pub const BUSES_TOML: &str = include_str!("../config/buses.toml");
pub const SENSORS_TOML: &str = include_str!("../config/sensors.toml");

/// Board name
pub const BOARD_NAME: &str = "RaspberryPi-HDC2080";

/// Get the configuration path (allow override via CONFIG_PATH env var)
pub fn get_config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| CONFIG_DIR.to_string())
}

/// Load `buses.toml` and `sensors.toml` from `config_path`, falling back to
/// the embedded copies for any file that is not there.
pub fn load_configs(config_path: &str) -> ConfigResult<(BusConfig, SensorConfig)> {
    let buses_path = format!("{}/buses.toml", config_path);
    let buses = if Path::new(&buses_path).exists() {
        load_bus_config(&buses_path)?
    } else {
        warn!("[config] {} missing, using embedded bus config", buses_path);
        BusConfig::parse(BUSES_TOML)?
    };

    let sensors_path = format!("{}/sensors.toml", config_path);
    let sensors = if Path::new(&sensors_path).exists() {
        load_sensor_config(&sensors_path)?
    } else {
        warn!("[config] {} missing, using embedded sensor config", sensors_path);
        SensorConfig::parse(SENSORS_TOML)?
    };

    Ok((buses, sensors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdc2080::config::BusKind;
    use hdc2080::SampleRate;

    #[test]
    fn embedded_configs_are_consistent() {
        let buses = BusConfig::parse(BUSES_TOML).unwrap();
        let sensors = SensorConfig::parse(SENSORS_TOML).unwrap();

        let bus = buses.find(&sensors.sensor.bus).unwrap();
        assert_eq!(bus.kind, BusKind::I2c);
        assert_eq!(sensors.sensor.address, hdc2080::DEFAULT_ADDRESS);
        assert_eq!(sensors.sensor.settings.sample_rate, SampleRate::Manual);
    }

    #[test]
    fn missing_directory_falls_back_to_embedded() {
        let (buses, sensors) = load_configs("/nonexistent/config").unwrap();
        assert_eq!(buses.buses.len(), 1);
        assert_eq!(sensors.sensor.id, "hdc2080");
    }
}
