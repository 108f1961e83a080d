//! Linux userspace transport
//!
//! Talks to the sensor through an i2c character device (`/dev/i2c-*`) using the
//! combined `I2C_RDWR` transfer of the i2c-dev interface.

use std::path::Path;

use i2cdev::core::{I2CMessage, I2CTransfer};
use i2cdev::linux::{I2CMessageFlags, LinuxI2CBus, LinuxI2CError, LinuxI2CMessage};

use crate::transport::{Message, Transport};
use crate::{Result, Veml7700, Veml7700Error};

/// An opened i2c character device. The device node is closed when this is dropped.
pub struct LinuxI2c {
    bus: LinuxI2CBus,
}

impl LinuxI2c {
    /// Opens the i2c bus at `path`, e.g. `/dev/i2c-1`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bus = LinuxI2CBus::new(path).map_err(|e| {
            log::error!("Unable to open i2c bus {}: {:?}", path.display(), e);
            Veml7700Error::TransportUnavailable
        })?;

        log::debug!("Opened i2c bus {}", path.display());

        Ok(Self { bus })
    }
}

impl core::fmt::Debug for LinuxI2c {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinuxI2c").finish_non_exhaustive()
    }
}

/// Flags of a read sub-message. `with_flags` replaces the flags set by
/// `LinuxI2CMessage::read`, so `READ` has to be part of them.
fn read_flags(no_start: bool) -> I2CMessageFlags {
    if no_start {
        I2CMessageFlags::READ | I2CMessageFlags::NO_START
    } else {
        I2CMessageFlags::READ
    }
}

impl Transport for LinuxI2c {
    type Error = LinuxI2CError;

    fn transfer(
        &mut self,
        address: u8,
        messages: &mut [Message<'_>],
    ) -> core::result::Result<(), Self::Error> {
        let address = u16::from(address);

        let mut msgs: Vec<LinuxI2CMessage<'_>> = messages
            .iter_mut()
            .map(|message| match message {
                Message::Write(data) => LinuxI2CMessage::write(*data).with_address(address),
                Message::Read { buffer, no_start } => LinuxI2CMessage::read(&mut buffer[..])
                    .with_address(address)
                    .with_flags(read_flags(*no_start)),
            })
            .collect();

        self.bus.transfer(&mut msgs[..])?;

        Ok(())
    }
}

impl Veml7700<LinuxI2c> {
    /// Opens the i2c bus at `path` and creates a driver for the sensor on it.
    ///
    /// No register is accessed, the sensor stays in whatever power state it is in.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LinuxI2c::open(path)?))
    }
}
