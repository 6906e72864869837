/// HDC2080 register map (TI HDC2080 datasheet, SNAS693).
///
/// Every register is 8 bits wide. Multi-byte quantities are stored low byte
/// first and the address pointer auto-increments, so a register pair can be
/// read in one transfer starting at the low address.
///
/// Key groups:
/// - **Results** - 0x00..=0x03: temperature and humidity, 16 bits each
/// - **Status** - 0x04: data-ready and threshold flags
/// - **Peak latches** - 0x05, 0x06: maximum temperature / humidity seen
/// - **Interrupt enables** - 0x07
/// - **Offset trim** - 0x08, 0x09
/// - **Thresholds** - 0x0A..=0x0D
/// - **Control** - 0x0E (reset, rate, heater, interrupt pin), 0x0F (measurement)
/// - **Identification** - 0xFC..=0xFF, read-only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    TemperatureLow = 0x00,
    TemperatureHigh = 0x01,
    HumidityLow = 0x02,
    HumidityHigh = 0x03,
    InterruptStatus = 0x04,
    TemperatureMax = 0x05,
    HumidityMax = 0x06,
    InterruptConfig = 0x07,
    TemperatureOffset = 0x08,
    HumidityOffset = 0x09,
    TemperatureThresholdLow = 0x0A,
    TemperatureThresholdHigh = 0x0B,
    HumidityThresholdLow = 0x0C,
    HumidityThresholdHigh = 0x0D,
    // Soft reset, auto-measurement rate, heater, DRDY/INT pin
    DeviceConfig = 0x0E,
    // Resolutions, measurement mode, trigger
    MeasurementConfig = 0x0F,
    ManufacturerIdLow = 0xFC,
    ManufacturerIdHigh = 0xFD,
    DeviceIdLow = 0xFE,
    DeviceIdHigh = 0xFF,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Whether the driver is allowed to write this register.
    ///
    /// Measurement results, the status register and the identification
    /// registers are read-only.
    pub const fn is_writable(self) -> bool {
        !matches!(
            self,
            Register::TemperatureLow
                | Register::TemperatureHigh
                | Register::HumidityLow
                | Register::HumidityHigh
                | Register::InterruptStatus
                | Register::ManufacturerIdLow
                | Register::ManufacturerIdHigh
                | Register::DeviceIdLow
                | Register::DeviceIdHigh
        )
    }
}

/// Bus address with the ADDR pin tied to ground.
pub const DEFAULT_ADDRESS: u8 = 0x40;
/// Bus address with the ADDR pin tied to VDD.
pub const ALTERNATE_ADDRESS: u8 = 0x41;

/// Texas Instruments manufacturer ID, 0xFC/0xFD.
pub const MANUFACTURER_ID: u16 = 0x5449;
/// HDC2080 device ID, 0xFE/0xFF.
pub const DEVICE_ID: u16 = 0x07D0;

// DeviceConfig (0x0E) single-bit flags
pub const SOFT_RESET: u8 = 0x80;
pub const HEATER_ENABLE: u8 = 0x08;
pub const INTERRUPT_PIN_ENABLE: u8 = 0x04;

// MeasurementConfig (0x0F); self-clearing once the conversion completes
pub const MEASUREMENT_TRIGGER: u8 = 0x01;

// InterruptConfig (0x07)
pub const DATA_READY_INTERRUPT: u8 = 0x80;
/// TH, TL, HH and HL enables (bits 6..=3).
pub const THRESHOLD_INTERRUPTS: u8 = 0x78;

/// Minimum settling time after a soft reset before registers are reliable.
pub const RESET_SETTLE_MS: u32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identification_registers_are_read_only() {
        for reg in [
            Register::ManufacturerIdLow,
            Register::ManufacturerIdHigh,
            Register::DeviceIdLow,
            Register::DeviceIdHigh,
        ] {
            assert!(!reg.is_writable(), "{:?} must not be writable", reg);
        }
        assert!(Register::DeviceConfig.is_writable());
        assert!(Register::TemperatureMax.is_writable());
    }

    #[test]
    fn addresses_match_datasheet() {
        assert_eq!(Register::InterruptConfig.addr(), 0x07);
        assert_eq!(Register::HumidityThresholdHigh.addr(), 0x0D);
        assert_eq!(Register::MeasurementConfig.addr(), 0x0F);
        assert_eq!(Register::DeviceIdHigh.addr(), 0xFF);
    }
}
