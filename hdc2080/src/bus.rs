#[cfg(feature = "linux-hal")]
pub mod i2c;

pub mod hal;

use crate::errors::BusResult;

#[cfg(feature = "linux-hal")]
pub use i2c::I2CBus;
pub use hal::HalBus;

/// First and last non-reserved 7-bit addresses, the range a bus scan probes.
pub const SCAN_FIRST_ADDRESS: u8 = 0x08;
pub const SCAN_LAST_ADDRESS: u8 = 0x77;

/// Minimal two-wire bus capability the driver consumes.
///
/// Implementations own clocking, arbitration and timeouts. Each call is one
/// bus transaction; a failure is reported once and not retried.
pub trait Transport {
    /// Addresses of every device that acknowledges on the bus.
    fn scan(&mut self) -> BusResult<Vec<u8>>;

    /// Write `bytes` starting at register `reg` of the device at `address`.
    fn write_bytes(&mut self, address: u8, reg: u8, bytes: &[u8]) -> BusResult<()>;

    /// Fill `buf` starting at register `reg` of the device at `address`.
    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()>;
}

/// Lets a caller lend its bus to a driver and keep using it afterwards.
impl<T: Transport + ?Sized> Transport for &mut T {
    fn scan(&mut self) -> BusResult<Vec<u8>> {
        (**self).scan()
    }

    fn write_bytes(&mut self, address: u8, reg: u8, bytes: &[u8]) -> BusResult<()> {
        (**self).write_bytes(address, reg, bytes)
    }

    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        (**self).read_bytes(address, reg, buf)
    }
}
