use embedded_hal::delay::DelayNs;
use tracing::{debug, trace, warn};

use crate::bus::Transport;
use crate::config::SensorSettings;
use crate::conversion;
use crate::errors::BusResult;
use crate::fields::{
    Field, InterruptMode, InterruptPolarity, MeasurementMode, Resolution, SampleRate,
    HUMIDITY_RESOLUTION, INTERRUPT_MODE, INTERRUPT_POLARITY, MEASUREMENT_MODE, SAMPLE_RATE,
    TEMPERATURE_RESOLUTION,
};
use crate::registers::{
    Register, DATA_READY_INTERRUPT, DEVICE_ID, HEATER_ENABLE, INTERRUPT_PIN_ENABLE,
    MANUFACTURER_ID, MEASUREMENT_TRIGGER, RESET_SETTLE_MS, SOFT_RESET, THRESHOLD_INTERRUPTS,
};

/// One temperature/humidity sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub humidity_percent: f32,
}

/// HDC2080 temperature and humidity sensor.
///
/// The driver holds no copy of the sensor's configuration: every setter reads
/// the register back, changes only its own bits and writes the result. Multi
/// step operations are not atomic with respect to other users of the same
/// bus; callers sharing a bus must serialize access themselves.
pub struct Hdc2080<B, D> {
    bus: B,
    delay: D,
    address: u8,
}

impl<B, D> Hdc2080<B, D>
where
    B: Transport,
    D: DelayNs,
{
    /// Create a driver for the device at `address`.
    ///
    /// # Arguments
    /// * `bus` - transport, or `&mut` to one the caller keeps using
    /// * `delay` - timer used for the post-reset settling time
    /// * `address` - 7-bit bus address, usually [`crate::DEFAULT_ADDRESS`]
    pub fn new(bus: B, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the transport and timer back
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Whether this device's address answers a bus scan. Generates no
    /// register traffic.
    pub fn is_connected(&mut self) -> BusResult<bool> {
        let present = self.bus.scan()?.contains(&self.address);
        debug!("[hdc2080] {:#04x} present: {}", self.address, present);
        Ok(present)
    }

    fn read_register(&mut self, reg: Register) -> BusResult<u8> {
        let mut buf = [0u8; 1];
        self.bus.read_bytes(self.address, reg.addr(), &mut buf)?;
        trace!("[hdc2080] read {:?} = {:#04x}", reg, buf[0]);
        Ok(buf[0])
    }

    /// Low/high register pair in one transfer, low byte first.
    fn read_register_pair(&mut self, low: Register) -> BusResult<u16> {
        let mut buf = [0u8; 2];
        self.bus.read_bytes(self.address, low.addr(), &mut buf)?;
        let value = u16::from_le_bytes(buf);
        trace!("[hdc2080] read {:?} pair = {:#06x}", low, value);
        Ok(value)
    }

    fn write_register(&mut self, reg: Register, value: u8) -> BusResult<()> {
        debug_assert!(reg.is_writable(), "{:?} is read-only", reg);
        trace!("[hdc2080] write {:?} = {:#04x}", reg, value);
        self.bus.write_bytes(self.address, reg.addr(), &[value])
    }

    fn modify_register(&mut self, reg: Register, f: impl FnOnce(u8) -> u8) -> BusResult<()> {
        let current = self.read_register(reg)?;
        self.write_register(reg, f(current))
    }

    fn set_bits(&mut self, reg: Register, bits: u8) -> BusResult<()> {
        self.modify_register(reg, |current| current | bits)
    }

    fn clear_bits(&mut self, reg: Register, bits: u8) -> BusResult<()> {
        self.modify_register(reg, |current| current & !bits)
    }

    fn update_field(&mut self, field: Field, value: u8) -> BusResult<()> {
        self.modify_register(field.register, |current| field.apply(current, value))
    }

    /// Reads calculated temperature in Celsius
    pub fn read_temperature(&mut self) -> BusResult<f32> {
        let raw = self.read_register_pair(Register::TemperatureLow)?;
        Ok(conversion::temperature_from_raw16(raw))
    }

    /// Reads relative humidity in percent
    pub fn read_humidity(&mut self) -> BusResult<f32> {
        let raw = self.read_register_pair(Register::HumidityLow)?;
        Ok(conversion::humidity_from_raw16(raw))
    }

    /// Temperature and humidity results of the latest conversion
    pub fn read_measurement(&mut self) -> BusResult<Measurement> {
        Ok(Measurement {
            temperature_c: self.read_temperature()?,
            humidity_percent: self.read_humidity()?,
        })
    }

    /// Highest temperature latched since the last clear
    pub fn read_max_temperature(&mut self) -> BusResult<f32> {
        let raw = self.read_register(Register::TemperatureMax)?;
        Ok(conversion::temperature_from_raw8(raw))
    }

    /// Highest humidity latched since the last clear
    pub fn read_max_humidity(&mut self) -> BusResult<f32> {
        let raw = self.read_register(Register::HumidityMax)?;
        Ok(conversion::humidity_from_raw8(raw))
    }

    pub fn clear_max_temperature(&mut self) -> BusResult<()> {
        self.write_register(Register::TemperatureMax, 0x00)
    }

    pub fn clear_max_humidity(&mut self) -> BusResult<()> {
        self.write_register(Register::HumidityMax, 0x00)
    }

    // Thresholds

    pub fn set_low_temperature_threshold(&mut self, celsius: f32) -> BusResult<()> {
        let raw = conversion::temperature_to_raw8(celsius);
        self.write_register(Register::TemperatureThresholdLow, raw)
    }

    pub fn set_high_temperature_threshold(&mut self, celsius: f32) -> BusResult<()> {
        let raw = conversion::temperature_to_raw8(celsius);
        self.write_register(Register::TemperatureThresholdHigh, raw)
    }

    pub fn set_low_humidity_threshold(&mut self, percent: f32) -> BusResult<()> {
        let raw = conversion::humidity_to_raw8(percent);
        self.write_register(Register::HumidityThresholdLow, raw)
    }

    pub fn set_high_humidity_threshold(&mut self, percent: f32) -> BusResult<()> {
        let raw = conversion::humidity_to_raw8(percent);
        self.write_register(Register::HumidityThresholdHigh, raw)
    }

    pub fn read_low_temperature_threshold(&mut self) -> BusResult<f32> {
        let raw = self.read_register(Register::TemperatureThresholdLow)?;
        Ok(conversion::temperature_from_raw8(raw))
    }

    pub fn read_high_temperature_threshold(&mut self) -> BusResult<f32> {
        let raw = self.read_register(Register::TemperatureThresholdHigh)?;
        Ok(conversion::temperature_from_raw8(raw))
    }

    pub fn read_low_humidity_threshold(&mut self) -> BusResult<f32> {
        let raw = self.read_register(Register::HumidityThresholdLow)?;
        Ok(conversion::humidity_from_raw8(raw))
    }

    pub fn read_high_humidity_threshold(&mut self) -> BusResult<f32> {
        let raw = self.read_register(Register::HumidityThresholdHigh)?;
        Ok(conversion::humidity_from_raw8(raw))
    }

    // Offset trim

    pub fn temperature_offset(&mut self) -> BusResult<u8> {
        self.read_register(Register::TemperatureOffset)
    }

    /// Write the raw temperature offset and return what the sensor reports
    /// afterwards. A mismatch is left for the caller to judge.
    pub fn set_temperature_offset(&mut self, value: u8) -> BusResult<u8> {
        self.write_register(Register::TemperatureOffset, value)?;
        self.temperature_offset()
    }

    pub fn humidity_offset(&mut self) -> BusResult<u8> {
        self.read_register(Register::HumidityOffset)
    }

    /// Write the raw humidity offset and return the value read back.
    pub fn set_humidity_offset(&mut self, value: u8) -> BusResult<u8> {
        self.write_register(Register::HumidityOffset, value)?;
        self.humidity_offset()
    }

    // Measurement configuration

    pub fn set_temperature_resolution(&mut self, resolution: Resolution) -> BusResult<()> {
        self.update_field(TEMPERATURE_RESOLUTION, resolution.bits())
    }

    pub fn set_humidity_resolution(&mut self, resolution: Resolution) -> BusResult<()> {
        self.update_field(HUMIDITY_RESOLUTION, resolution.bits())
    }

    pub fn set_measurement_mode(&mut self, mode: MeasurementMode) -> BusResult<()> {
        self.update_field(MEASUREMENT_MODE, mode.bits())
    }

    /// Start a one-shot conversion.
    ///
    /// The trigger bit clears itself when the conversion finishes; this does
    /// not wait. Allow the conversion time before reading results.
    pub fn trigger_measurement(&mut self) -> BusResult<()> {
        self.set_bits(Register::MeasurementConfig, MEASUREMENT_TRIGGER)
    }

    // Device configuration

    pub fn set_sample_rate(&mut self, rate: SampleRate) -> BusResult<()> {
        self.update_field(SAMPLE_RATE, rate.bits())
    }

    pub fn set_interrupt_polarity(&mut self, polarity: InterruptPolarity) -> BusResult<()> {
        self.update_field(INTERRUPT_POLARITY, polarity.bits())
    }

    pub fn set_interrupt_mode(&mut self, mode: InterruptMode) -> BusResult<()> {
        self.update_field(INTERRUPT_MODE, mode.bits())
    }

    pub fn enable_heater(&mut self) -> BusResult<()> {
        self.set_bits(Register::DeviceConfig, HEATER_ENABLE)
    }

    pub fn disable_heater(&mut self) -> BusResult<()> {
        self.clear_bits(Register::DeviceConfig, HEATER_ENABLE)
    }

    /// Enable the DRDY/INT output pin
    pub fn enable_interrupt(&mut self) -> BusResult<()> {
        self.set_bits(Register::DeviceConfig, INTERRUPT_PIN_ENABLE)
    }

    /// Put the DRDY/INT pin in high-Z
    pub fn disable_interrupt(&mut self) -> BusResult<()> {
        self.clear_bits(Register::DeviceConfig, INTERRUPT_PIN_ENABLE)
    }

    /// Soft reset, then block for the settling time before returning.
    pub fn reset(&mut self) -> BusResult<()> {
        self.set_bits(Register::DeviceConfig, SOFT_RESET)?;
        debug!("[hdc2080] soft reset, settling {} ms", RESET_SETTLE_MS);
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    // Interrupt configuration

    /// Enable all four threshold interrupts (TH, TL, HH, HL)
    pub fn enable_threshold_interrupt(&mut self) -> BusResult<()> {
        self.set_bits(Register::InterruptConfig, THRESHOLD_INTERRUPTS)
    }

    pub fn disable_threshold_interrupt(&mut self) -> BusResult<()> {
        self.clear_bits(Register::InterruptConfig, THRESHOLD_INTERRUPTS)
    }

    pub fn enable_data_ready_interrupt(&mut self) -> BusResult<()> {
        self.set_bits(Register::InterruptConfig, DATA_READY_INTERRUPT)
    }

    pub fn disable_data_ready_interrupt(&mut self) -> BusResult<()> {
        self.clear_bits(Register::InterruptConfig, DATA_READY_INTERRUPT)
    }

    /// Raw interrupt/DRDY status byte, see [`crate::InterruptStatus`] to decode
    pub fn read_interrupt_status(&mut self) -> BusResult<u8> {
        self.read_register(Register::InterruptStatus)
    }

    // Identification

    pub fn read_manufacturer_id(&mut self) -> BusResult<u16> {
        self.read_register_pair(Register::ManufacturerIdLow)
    }

    pub fn read_device_id(&mut self) -> BusResult<u16> {
        self.read_register_pair(Register::DeviceIdLow)
    }

    /// Verifies communication with the identification registers
    pub fn verify_identity(&mut self) -> BusResult<bool> {
        let manufacturer = self.read_manufacturer_id()?;
        let device = self.read_device_id()?;
        debug!(
            "[hdc2080] manufacturer {:#06x}, device {:#06x}",
            manufacturer, device
        );
        Ok(manufacturer == MANUFACTURER_ID && device == DEVICE_ID)
    }

    /// Apply a full settings block through the individual setters.
    pub fn configure(&mut self, settings: &SensorSettings) -> BusResult<()> {
        debug!("[hdc2080] applying settings {:?}", settings);

        self.set_temperature_resolution(settings.temperature_resolution)?;
        self.set_humidity_resolution(settings.humidity_resolution)?;
        self.set_measurement_mode(settings.measurement_mode)?;

        if let Some(t) = settings.thresholds {
            self.set_low_temperature_threshold(t.temperature_low)?;
            self.set_high_temperature_threshold(t.temperature_high)?;
            self.set_low_humidity_threshold(t.humidity_low)?;
            self.set_high_humidity_threshold(t.humidity_high)?;
        }
        if let Some(offset) = settings.temperature_offset {
            let readback = self.set_temperature_offset(offset)?;
            if readback != offset {
                warn!(
                    "[hdc2080] temperature offset wrote {:#04x}, read back {:#04x}",
                    offset, readback
                );
            }
        }
        if let Some(offset) = settings.humidity_offset {
            let readback = self.set_humidity_offset(offset)?;
            if readback != offset {
                warn!(
                    "[hdc2080] humidity offset wrote {:#04x}, read back {:#04x}",
                    offset, readback
                );
            }
        }

        self.set_interrupt_polarity(settings.interrupt_polarity)?;
        self.set_interrupt_mode(settings.interrupt_mode)?;
        if settings.threshold_interrupt {
            self.enable_threshold_interrupt()?;
        } else {
            self.disable_threshold_interrupt()?;
        }
        if settings.data_ready_interrupt {
            self.enable_data_ready_interrupt()?;
        } else {
            self.disable_data_ready_interrupt()?;
        }
        if settings.interrupt_pin {
            self.enable_interrupt()?;
        } else {
            self.disable_interrupt()?;
        }

        if settings.heater {
            self.enable_heater()?;
        } else {
            self.disable_heater()?;
        }
        // Rate last: a non-manual rate starts conversions immediately
        self.set_sample_rate(settings.sample_rate)
    }
}
