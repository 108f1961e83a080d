//! Bus transport seam.
//!
//! The VEML7700 needs its register reads issued as one combined transfer where
//! the data phase continues the pointer write without a new start condition.
//! The blocking `embedded-hal` 0.2 i2c traits cannot express that flag, so the
//! driver talks to the bus through this trait instead.

/// One sub-message of a combined bus transaction.
#[derive(Debug, PartialEq, Eq)]
pub enum Message<'a> {
    /// Write the payload to the device.
    Write(&'a [u8]),

    /// Read `buffer.len()` bytes from the device.
    Read {
        buffer: &'a mut [u8],
        /// Continue the current transaction instead of emitting a (repeated) start.
        no_start: bool,
    },
}

/// A bus able to run an ordered list of sub-messages against one device as a
/// single combined transaction.
pub trait Transport {
    /// Bus level error. It is logged by the driver but not passed on.
    type Error: core::fmt::Debug;

    /// Performs all `messages` in order against the 7-bit `address`.
    ///
    /// Either the whole transaction succeeds or an error is returned, there is
    /// no partial result.
    fn transfer(&mut self, address: u8, messages: &mut [Message<'_>]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transfer(&mut self, address: u8, messages: &mut [Message<'_>]) -> Result<(), Self::Error> {
        (**self).transfer(address, messages)
    }
}
