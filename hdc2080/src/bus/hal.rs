use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use super::{Transport, SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS};
use crate::errors::{BusError, BusResult};

/// Adapter exposing any `embedded_hal::i2c::I2c` implementation as a
/// [`Transport`], for platforms without a Linux I2C device node.
pub struct HalBus<I> {
    i2c: I,
}

impl<I: I2c> HalBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Consume self and return the wrapped bus
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

fn map_error(address: u8, kind: ErrorKind) -> BusError {
    match kind {
        ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge { address },
        ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss { address },
        kind => BusError::Transfer { address, kind },
    }
}

impl<I: I2c> Transport for HalBus<I> {
    fn scan(&mut self) -> BusResult<Vec<u8>> {
        let mut probe = [0u8; 1];
        Ok((SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS)
            .filter(|&address| self.i2c.read(address, &mut probe).is_ok())
            .collect())
    }

    fn write_bytes(&mut self, address: u8, reg: u8, bytes: &[u8]) -> BusResult<()> {
        let mut frame = Vec::with_capacity(bytes.len() + 1);
        frame.push(reg);
        frame.extend_from_slice(bytes);
        self.i2c
            .write(address, &frame)
            .map_err(|e| map_error(address, e.kind()))
    }

    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        self.i2c
            .write_read(address, &[reg], buf)
            .map_err(|e| map_error(address, e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::NoAcknowledgeSource;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const ADDR: u8 = 0x40;

    #[test]
    fn register_read_is_a_single_write_read() {
        let expectations = [Transaction::write_read(ADDR, vec![0x00], vec![0x34, 0x12])];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = HalBus::new(mock.clone());

        let mut buf = [0u8; 2];
        bus.read_bytes(ADDR, 0x00, &mut buf).unwrap();
        assert_eq!(buf, [0x34, 0x12]);

        mock.done();
    }

    #[test]
    fn register_write_prefixes_the_register_address() {
        let expectations = [Transaction::write(ADDR, vec![0x0E, 0x80])];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = HalBus::new(mock.clone());

        bus.write_bytes(ADDR, 0x0E, &[0x80]).unwrap();

        mock.done();
    }

    #[test]
    fn nack_maps_to_no_acknowledge() {
        let expectations = [Transaction::write_read(ADDR, vec![0x0F], vec![0x00])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = HalBus::new(mock.clone());

        let mut buf = [0u8; 1];
        let err = bus.read_bytes(ADDR, 0x0F, &mut buf).unwrap_err();
        assert!(matches!(err, BusError::NoAcknowledge { address: ADDR }));

        mock.done();
    }

    #[test]
    fn other_failures_keep_their_kind() {
        let expectations =
            [Transaction::write(ADDR, vec![0x05, 0x00]).with_error(ErrorKind::Bus)];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = HalBus::new(mock.clone());

        let err = bus.write_bytes(ADDR, 0x05, &[0x00]).unwrap_err();
        assert!(matches!(
            err,
            BusError::Transfer {
                address: ADDR,
                kind: ErrorKind::Bus
            }
        ));

        mock.done();
    }
}
