/// Decoded view of the interrupt/DRDY status register (0x04).
///
/// Reading the register clears the flags on the sensor, so decode the byte
/// returned by `read_interrupt_status` rather than reading twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptStatus {
    /// DRDY_STATUS, bit 7: a conversion completed
    pub data_ready: bool,
    /// TH_STATUS, bit 6: temperature above the high threshold
    pub temperature_high: bool,
    /// TL_STATUS, bit 5: temperature below the low threshold
    pub temperature_low: bool,
    /// HH_STATUS, bit 4: humidity above the high threshold
    pub humidity_high: bool,
    /// HL_STATUS, bit 3: humidity below the low threshold
    pub humidity_low: bool,
}

impl InterruptStatus {
    pub fn any_threshold(&self) -> bool {
        self.temperature_high || self.temperature_low || self.humidity_high || self.humidity_low
    }
}

impl From<u8> for InterruptStatus {
    fn from(raw: u8) -> Self {
        Self {
            data_ready: raw & 0x80 != 0,
            temperature_high: raw & 0x40 != 0,
            temperature_low: raw & 0x20 != 0,
            humidity_high: raw & 0x10 != 0,
            humidity_low: raw & 0x08 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_flag() {
        assert_eq!(InterruptStatus::from(0x00), InterruptStatus::default());
        assert!(InterruptStatus::from(0x80).data_ready);
        assert!(!InterruptStatus::from(0x80).any_threshold());

        let status = InterruptStatus::from(0x48);
        assert!(status.temperature_high);
        assert!(status.humidity_low);
        assert!(!status.temperature_low);
        assert!(!status.humidity_high);
        assert!(status.any_threshold());
    }

    #[test]
    fn reserved_bits_are_ignored() {
        assert_eq!(InterruptStatus::from(0x07), InterruptStatus::default());
    }
}
