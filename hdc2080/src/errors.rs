use thiserror::Error;

#[cfg(feature = "linux-hal")]
use i2cdev::linux::LinuxI2CError;

/// Failures reported by a bus transport.
///
/// The driver never retries and never rewrites these: whatever the transport
/// returns is handed straight back to the caller.
#[derive(Error, Debug)]
pub enum BusError {
    #[error("I2C device {address:#04x} did not acknowledge")]
    NoAcknowledge { address: u8 },

    #[error("I2C arbitration lost while addressing {address:#04x}")]
    ArbitrationLoss { address: u8 },

    #[error("I2C transfer with {address:#04x} failed: {kind}")]
    Transfer {
        address: u8,
        kind: embedded_hal::i2c::ErrorKind,
    },

    #[error("I2C read returned {actual} byte(s), expected {expected}")]
    ShortRead { expected: usize, actual: usize },

    #[cfg(feature = "linux-hal")]
    #[error("Linux I2C error: {0}")]
    Linux(#[from] LinuxI2CError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Bus '{bus}' not found in bus configuration")]
    BusNotFound { bus: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type aliases for convenience
pub type BusResult<T> = Result<T, BusError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
