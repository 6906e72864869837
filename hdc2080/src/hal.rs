/// Platform types the driver pairs with, selected by feature.
///
/// On Linux the bus is a `/dev/i2c-N` node and the settling delay is a
/// thread sleep. Other platforms bring their own `embedded-hal` bus (wrapped
/// in [`crate::HalBus`]) and `DelayNs` timer.

#[cfg(feature = "linux-hal")]
pub mod linux {
    pub use crate::bus::I2CBus;
    pub use i2cdev::linux::LinuxI2CError as I2CError;
    // Blocking `DelayNs` backed by `std::thread::sleep`
    pub use linux_embedded_hal::Delay;
}

// Re-export the active platform's HAL
#[cfg(feature = "linux-hal")]
pub use linux::*;
