//! Configuration bit fields of the two control registers.
//!
//! Every option is a closed enum whose field value comes from an exhaustive
//! match. Raw numeric codes go through `from_code`, where one wildcard arm
//! maps anything unknown to the sensor's power-on default instead of failing.

use serde::Deserialize;
use std::time::Duration;

use crate::registers::Register;

/// A contiguous group of bits inside one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub register: Register,
    pub mask: u8,
}

impl Field {
    pub const fn new(register: Register, mask: u8) -> Self {
        Self { register, mask }
    }

    /// Replace this field inside `current` with `value`, leaving every bit
    /// outside the mask as it was.
    pub const fn apply(self, current: u8, value: u8) -> u8 {
        let shifted = (value << self.mask.trailing_zeros()) & self.mask;
        (current & !self.mask) | shifted
    }

    /// Extract the (unshifted) field value from a register byte.
    pub const fn extract(self, current: u8) -> u8 {
        (current & self.mask) >> self.mask.trailing_zeros()
    }
}

/// TRES[1:0], measurement configuration bits 7:6.
pub const TEMPERATURE_RESOLUTION: Field = Field::new(Register::MeasurementConfig, 0xC0);
/// HRES[1:0], measurement configuration bits 5:4.
pub const HUMIDITY_RESOLUTION: Field = Field::new(Register::MeasurementConfig, 0x30);
/// MEAS_CONF[1:0], measurement configuration bits 2:1.
pub const MEASUREMENT_MODE: Field = Field::new(Register::MeasurementConfig, 0x06);
/// AMM[2:0], device configuration bits 6:4.
pub const SAMPLE_RATE: Field = Field::new(Register::DeviceConfig, 0x70);
/// INT_POL, device configuration bit 1.
pub const INTERRUPT_POLARITY: Field = Field::new(Register::DeviceConfig, 0x02);
/// INT_MODE, device configuration bit 0.
pub const INTERRUPT_MODE: Field = Field::new(Register::DeviceConfig, 0x01);

/// Conversion resolution, shared by the temperature and humidity channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    #[default]
    FourteenBit,
    ElevenBit,
    NineBit,
}

impl Resolution {
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Resolution::ElevenBit,
            2 => Resolution::NineBit,
            _ => Resolution::FourteenBit,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            Resolution::FourteenBit => 0b00,
            Resolution::ElevenBit => 0b01,
            Resolution::NineBit => 0b10,
        }
    }
}

/// Which channels a conversion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMode {
    #[default]
    TemperatureAndHumidity,
    TemperatureOnly,
    HumidityOnly,
}

impl MeasurementMode {
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => MeasurementMode::TemperatureOnly,
            2 => MeasurementMode::HumidityOnly,
            _ => MeasurementMode::TemperatureAndHumidity,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            MeasurementMode::TemperatureAndHumidity => 0b00,
            MeasurementMode::TemperatureOnly => 0b01,
            MeasurementMode::HumidityOnly => 0b10,
        }
    }
}

/// Auto-measurement mode (AMM). `Manual` means conversions only run when
/// triggered.
///
/// | Variant     | AMM | Bits | Period  |
/// |-------------|-----|------|---------|
/// | Manual      | 000 | 0x00 | -       |
/// | TwoMinutes  | 001 | 0x10 | 120 s   |
/// | OneMinute   | 010 | 0x20 | 60 s    |
/// | TenSeconds  | 011 | 0x30 | 10 s    |
/// | FiveSeconds | 100 | 0x40 | 5 s     |
/// | OneHz       | 101 | 0x50 | 1 s     |
/// | TwoHz       | 110 | 0x60 | 500 ms  |
/// | FiveHz      | 111 | 0x70 | 200 ms  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleRate {
    #[default]
    Manual,
    TwoMinutes,
    OneMinute,
    TenSeconds,
    FiveSeconds,
    OneHz,
    TwoHz,
    FiveHz,
}

impl SampleRate {
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => SampleRate::TwoMinutes,
            2 => SampleRate::OneMinute,
            3 => SampleRate::TenSeconds,
            4 => SampleRate::FiveSeconds,
            5 => SampleRate::OneHz,
            6 => SampleRate::TwoHz,
            7 => SampleRate::FiveHz,
            _ => SampleRate::Manual,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            SampleRate::Manual => 0b000,
            SampleRate::TwoMinutes => 0b001,
            SampleRate::OneMinute => 0b010,
            SampleRate::TenSeconds => 0b011,
            SampleRate::FiveSeconds => 0b100,
            SampleRate::OneHz => 0b101,
            SampleRate::TwoHz => 0b110,
            SampleRate::FiveHz => 0b111,
        }
    }

    /// Time between automatic conversions, `None` in manual mode.
    pub const fn period(self) -> Option<Duration> {
        match self {
            SampleRate::Manual => None,
            SampleRate::TwoMinutes => Some(Duration::from_secs(120)),
            SampleRate::OneMinute => Some(Duration::from_secs(60)),
            SampleRate::TenSeconds => Some(Duration::from_secs(10)),
            SampleRate::FiveSeconds => Some(Duration::from_secs(5)),
            SampleRate::OneHz => Some(Duration::from_millis(1000)),
            SampleRate::TwoHz => Some(Duration::from_millis(500)),
            SampleRate::FiveHz => Some(Duration::from_millis(200)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptPolarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl InterruptPolarity {
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => InterruptPolarity::ActiveHigh,
            _ => InterruptPolarity::ActiveLow,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            InterruptPolarity::ActiveLow => 0,
            InterruptPolarity::ActiveHigh => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptMode {
    #[default]
    Level,
    Comparator,
}

impl InterruptMode {
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => InterruptMode::Comparator,
            _ => InterruptMode::Level,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            InterruptMode::Level => 0,
            InterruptMode::Comparator => 1,
        }
    }
}

macro_rules! from_code {
    ($($ty:ty),*) => {
        $(
            impl From<u8> for $ty {
                fn from(code: u8) -> Self {
                    <$ty>::from_code(code)
                }
            }
        )*
    };
}

from_code!(Resolution, MeasurementMode, SampleRate, InterruptPolarity, InterruptMode);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_patterns_land_in_their_own_bits() {
        assert_eq!(TEMPERATURE_RESOLUTION.apply(0x00, Resolution::ElevenBit.bits()), 0x40);
        assert_eq!(TEMPERATURE_RESOLUTION.apply(0x00, Resolution::NineBit.bits()), 0x80);
        assert_eq!(HUMIDITY_RESOLUTION.apply(0x00, Resolution::ElevenBit.bits()), 0x10);
        assert_eq!(HUMIDITY_RESOLUTION.apply(0x00, Resolution::NineBit.bits()), 0x20);
        assert_eq!(TEMPERATURE_RESOLUTION.apply(0xFF, Resolution::FourteenBit.bits()), 0x3F);
        assert_eq!(HUMIDITY_RESOLUTION.apply(0xFF, Resolution::FourteenBit.bits()), 0xCF);
    }

    #[test]
    fn sample_rate_table() {
        let expected = [0x00, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70];
        for (code, pattern) in expected.iter().enumerate() {
            let rate = SampleRate::from_code(code as u8);
            assert_eq!(SAMPLE_RATE.apply(0x00, rate.bits()), *pattern, "{:?}", rate);
            // Surrounding bits survive
            assert_eq!(SAMPLE_RATE.apply(0x8F, rate.bits()), 0x8F | pattern);
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_defaults() {
        assert_eq!(Resolution::from_code(3), Resolution::FourteenBit);
        assert_eq!(MeasurementMode::from_code(200), MeasurementMode::TemperatureAndHumidity);
        assert_eq!(SampleRate::from_code(8), SampleRate::Manual);
        assert_eq!(InterruptPolarity::from_code(2), InterruptPolarity::ActiveLow);
        assert_eq!(InterruptMode::from(0xFF), InterruptMode::Level);
    }

    #[test]
    fn measurement_mode_clears_whole_field() {
        // Switching from humidity-only to temperature-only must not leave the
        // reserved 0b11 pattern behind.
        let humid_only = MEASUREMENT_MODE.apply(0x00, MeasurementMode::HumidityOnly.bits());
        assert_eq!(humid_only, 0x04);
        let temp_only = MEASUREMENT_MODE.apply(humid_only, MeasurementMode::TemperatureOnly.bits());
        assert_eq!(temp_only, 0x02);
        assert_eq!(MEASUREMENT_MODE.extract(temp_only), 0b01);
    }

    #[test]
    fn single_bit_fields() {
        assert_eq!(INTERRUPT_POLARITY.apply(0x00, InterruptPolarity::ActiveHigh.bits()), 0x02);
        assert_eq!(INTERRUPT_POLARITY.apply(0xFF, InterruptPolarity::ActiveLow.bits()), 0xFD);
        assert_eq!(INTERRUPT_MODE.apply(0x00, InterruptMode::Comparator.bits()), 0x01);
        assert_eq!(INTERRUPT_MODE.apply(0xFF, InterruptMode::Level.bits()), 0xFE);
    }

    #[test]
    fn period_only_in_automatic_modes() {
        assert_eq!(SampleRate::Manual.period(), None);
        assert_eq!(SampleRate::FiveHz.period(), Some(Duration::from_millis(200)));
    }
}
