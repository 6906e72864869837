use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use tracing::{debug, trace};

use super::{Transport, SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS};
use crate::errors::{BusError, BusResult};

/// Linux `/dev/i2c-N` bus implementation
pub struct I2CBus {
    device: LinuxI2CDevice,
    /// Device node path, kept for logging
    path: String,
}

impl I2CBus {
    pub fn new(path: &str) -> BusResult<Self> {
        let device = LinuxI2CDevice::new(path, 0)?;
        debug!("[i2c] opened {}", path);
        Ok(Self {
            device,
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Transport for I2CBus {
    fn scan(&mut self) -> BusResult<Vec<u8>> {
        let mut found = Vec::new();
        for address in SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS {
            // Addresses claimed by a kernel driver refuse the slave address
            if self.device.set_slave_address(address as u16).is_err() {
                continue;
            }
            if self.device.smbus_read_byte().is_ok() {
                found.push(address);
            }
        }
        trace!("[i2c] {} scan found {:02x?}", self.path, found);
        Ok(found)
    }

    fn write_bytes(&mut self, address: u8, reg: u8, bytes: &[u8]) -> BusResult<()> {
        self.device.set_slave_address(address as u16)?;

        if let [byte] = bytes {
            self.device.smbus_write_byte_data(reg, *byte)?;
        } else {
            self.device.smbus_write_i2c_block_data(reg, bytes)?;
        }

        Ok(())
    }

    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        self.device.set_slave_address(address as u16)?;

        if buf.len() == 1 {
            // Use SMBus read byte data for single byte reads
            buf[0] = self.device.smbus_read_byte_data(reg)?;
        } else {
            // Use SMBus block read for multi-byte reads
            let data = self
                .device
                .smbus_read_i2c_block_data(reg, buf.len() as u8)?;
            if data.len() != buf.len() {
                return Err(BusError::ShortRead {
                    expected: buf.len(),
                    actual: data.len(),
                });
            }
            buf.copy_from_slice(&data);
        }

        Ok(())
    }
}
