//! Register-level driver for the TI HDC2080 temperature and humidity sensor.
//!
//! The driver talks to the sensor through a [`Transport`] (a Linux
//! `/dev/i2c-N` node via [`I2CBus`], or any `embedded-hal` I2C bus via
//! [`HalBus`]) and takes a `DelayNs` timer for the reset settling time.
//!
//! ```no_run
//! use hdc2080::{Hdc2080, I2CBus, MeasurementMode, SampleRate, DEFAULT_ADDRESS};
//! use hdc2080::hal::Delay;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bus = I2CBus::new("/dev/i2c-1")?;
//! let mut sensor = Hdc2080::new(&mut bus, Delay, DEFAULT_ADDRESS);
//!
//! sensor.reset()?;
//! sensor.set_measurement_mode(MeasurementMode::TemperatureAndHumidity)?;
//! sensor.set_sample_rate(SampleRate::Manual)?;
//! sensor.trigger_measurement()?;
//! std::thread::sleep(std::time::Duration::from_millis(20));
//! println!("{:.2} °C", sensor.read_temperature()?);
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod bus;
pub mod config;
pub mod conversion;
pub mod driver;
pub mod errors;
pub mod fields;
pub mod hal;
pub mod registers;
pub mod status;

// Re-export commonly used types
#[cfg(feature = "linux-hal")]
pub use bus::I2CBus;
pub use bus::{HalBus, Transport};
pub use config::{load_bus_config, load_sensor_config, SensorConfig, SensorSettings};
pub use driver::{Hdc2080, Measurement};
pub use errors::{BusError, BusResult, ConfigError, ConfigResult};
pub use fields::{InterruptMode, InterruptPolarity, MeasurementMode, Resolution, SampleRate};
pub use registers::{Register, ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
pub use status::InterruptStatus;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}
