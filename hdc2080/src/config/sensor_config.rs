use serde::Deserialize;
use std::fs;

use crate::errors::{ConfigError, ConfigResult};
use crate::fields::{InterruptMode, InterruptPolarity, MeasurementMode, Resolution, SampleRate};
use crate::bus::{SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS};
use crate::registers::DEFAULT_ADDRESS;

/// Root configuration struct expecting a single `[sensor]` table
#[derive(Debug, Deserialize)]
pub struct SensorConfig {
    pub sensor: SensorEntry,
}

/// The `[sensor]` section
#[derive(Debug, Clone, Deserialize)]
pub struct SensorEntry {
    pub id: String,
    pub bus: String,
    #[serde(default = "default_address")]
    pub address: u8,
    /// Time between samples taken by the host
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub settings: SensorSettings,
}

/// Register-level settings applied after reset.
///
/// Every field defaults to the sensor's power-on state, so an empty
/// `[sensor.settings]` table leaves the device as reset put it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub temperature_resolution: Resolution,
    pub humidity_resolution: Resolution,
    pub measurement_mode: MeasurementMode,
    pub sample_rate: SampleRate,
    pub heater: bool,
    /// Drive the DRDY/INT pin
    pub interrupt_pin: bool,
    pub interrupt_polarity: InterruptPolarity,
    pub interrupt_mode: InterruptMode,
    pub data_ready_interrupt: bool,
    pub threshold_interrupt: bool,
    pub thresholds: Option<Thresholds>,
    /// Raw offset trim, written as-is
    pub temperature_offset: Option<u8>,
    pub humidity_offset: Option<u8>,
}

/// Threshold window in physical units
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    pub temperature_low: f32,
    pub temperature_high: f32,
    pub humidity_low: f32,
    pub humidity_high: f32,
}

fn default_address() -> u8 {
    DEFAULT_ADDRESS
}

fn default_interval_ms() -> u64 {
    1000
}

impl SensorConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let parsed: SensorConfig = toml::from_str(content)?;
        parsed.validate()?;
        Ok(parsed)
    }

    fn validate(&self) -> ConfigResult<()> {
        let sensor = &self.sensor;
        if !(SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS).contains(&sensor.address) {
            return Err(ConfigError::InvalidValue {
                field: "sensor.address".to_string(),
                reason: format!(
                    "{:#04x} is outside the device address range {:#04x}..={:#04x}",
                    sensor.address, SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS
                ),
            });
        }
        if sensor.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sensor.interval_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if let Some(t) = sensor.settings.thresholds {
            let values = [
                ("temperature_low", t.temperature_low),
                ("temperature_high", t.temperature_high),
                ("humidity_low", t.humidity_low),
                ("humidity_high", t.humidity_high),
            ];
            if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("sensor.settings.thresholds.{}", name),
                    reason: format!("{} is not a finite number", value),
                });
            }
            if t.temperature_low > t.temperature_high {
                return Err(ConfigError::InvalidValue {
                    field: "sensor.settings.thresholds".to_string(),
                    reason: format!(
                        "temperature_low {} is above temperature_high {}",
                        t.temperature_low, t.temperature_high
                    ),
                });
            }
            if t.humidity_low > t.humidity_high {
                return Err(ConfigError::InvalidValue {
                    field: "sensor.settings.thresholds".to_string(),
                    reason: format!(
                        "humidity_low {} is above humidity_high {}",
                        t.humidity_low, t.humidity_high
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Loads config from TOML file
pub fn load_sensor_config(path: &str) -> ConfigResult<SensorConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    SensorConfig::parse(&content)
}
