//! Register map and bit-level encodings of the VEML7700.
//!
//! Every register of the sensor is 16 bits wide and transferred low byte first.

use crate::{Result, Veml7700Error};

/// Shutdown bit of the configuration register (`ALS_SD`), set means powered down.
pub const ALS_SD: u16 = 1 << 0;

/// Interrupt enable bit of the configuration register (`ALS_INT_EN`).
pub const ALS_INT_EN: u16 = 1 << 1;

const GAIN_SHIFT: u16 = 11;
const IT_SHIFT: u16 = 6;
const PERS_SHIFT: u16 = 4;
const INT_EN_SHIFT: u16 = 1;

const PSM_SHIFT: u16 = 1;

// All registers of the VEML7700 sensor, addressed by their command code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// ALS configuration register
    Configuration = 0x00,

    /// High threshold window setting
    HighThreshold = 0x01,

    /// Low threshold window setting
    LowThreshold = 0x02,

    /// Power saving mode
    PowerSave = 0x03,

    /// ALS output data
    AlsData = 0x04,

    /// White channel output data
    WhiteData = 0x05,

    /// Interrupt status
    InterruptStatus = 0x06,
}

impl Register {
    /// The command code sent as the first byte of every transaction.
    pub fn command_code(self) -> u8 {
        self as u8
    }
}

/// The gain of the VEML7700 sensor (`ALS_GAIN`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Gain {
    X1 = 0x0,
    X2 = 0x1,
    /// Gain x 1/8
    Eighth = 0x2,
    /// Gain x 1/4
    Quarter = 0x3,
}

impl TryFrom<u8> for Gain {
    type Error = Veml7700Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x0 => Ok(Gain::X1),
            0x1 => Ok(Gain::X2),
            0x2 => Ok(Gain::Eighth),
            0x3 => Ok(Gain::Quarter),
            _ => Err(Veml7700Error::InvalidConfiguration),
        }
    }
}

/// The integration time of the VEML7700 sensor (`ALS_IT`).
///
/// The field is four bits wide but only these six patterns are defined.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum IntegrationTime {
    Ms25 = 0x0C,
    Ms50 = 0x08,
    Ms100 = 0x00,
    Ms200 = 0x01,
    Ms400 = 0x02,
    Ms800 = 0x03,
}

impl IntegrationTime {
    /// Duration of one measurement in milliseconds.
    pub fn as_ms(self) -> u32 {
        match self {
            IntegrationTime::Ms25 => 25,
            IntegrationTime::Ms50 => 50,
            IntegrationTime::Ms100 => 100,
            IntegrationTime::Ms200 => 200,
            IntegrationTime::Ms400 => 400,
            IntegrationTime::Ms800 => 800,
        }
    }
}

impl TryFrom<u8> for IntegrationTime {
    type Error = Veml7700Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x0C => Ok(IntegrationTime::Ms25),
            0x08 => Ok(IntegrationTime::Ms50),
            0x00 => Ok(IntegrationTime::Ms100),
            0x01 => Ok(IntegrationTime::Ms200),
            0x02 => Ok(IntegrationTime::Ms400),
            0x03 => Ok(IntegrationTime::Ms800),
            _ => Err(Veml7700Error::InvalidConfiguration),
        }
    }
}

/// Number of consecutive out-of-window readings before an interrupt is raised (`ALS_PERS`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Persistence {
    One = 0x0,
    Two = 0x1,
    Four = 0x2,
    Eight = 0x3,
}

impl TryFrom<u8> for Persistence {
    type Error = Veml7700Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x0 => Ok(Persistence::One),
            0x1 => Ok(Persistence::Two),
            0x2 => Ok(Persistence::Four),
            0x3 => Ok(Persistence::Eight),
            _ => Err(Veml7700Error::InvalidConfiguration),
        }
    }
}

/// Interrupt enable setting of the configuration register (`ALS_INT_EN`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptEnable {
    Disabled = 0x0,
    Enabled = 0x1,
}

impl TryFrom<u8> for InterruptEnable {
    type Error = Veml7700Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x0 => Ok(InterruptEnable::Disabled),
            0x1 => Ok(InterruptEnable::Enabled),
            _ => Err(Veml7700Error::InvalidConfiguration),
        }
    }
}

/// Power saving mode of the VEML7700 sensor (`PSM`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerSaveMode {
    Mode1 = 0x0,
    Mode2 = 0x1,
    Mode3 = 0x2,
    Mode4 = 0x3,
}

impl TryFrom<u8> for PowerSaveMode {
    type Error = Veml7700Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x0 => Ok(PowerSaveMode::Mode1),
            0x1 => Ok(PowerSaveMode::Mode2),
            0x2 => Ok(PowerSaveMode::Mode3),
            0x3 => Ok(PowerSaveMode::Mode4),
            _ => Err(Veml7700Error::InvalidConfiguration),
        }
    }
}

/// The fields packed into the configuration register.
///
/// The default is the power-on state of the sensor, which is also the setting
/// the lux conversion factor applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub gain: Gain,
    pub integration_time: IntegrationTime,
    pub persistence: Persistence,
    pub interrupt_enable: InterruptEnable,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            gain: Gain::X1,
            integration_time: IntegrationTime::Ms100,
            persistence: Persistence::One,
            interrupt_enable: InterruptEnable::Disabled,
        }
    }
}

impl Configuration {
    /// Packs the fields into a configuration word. The shutdown bit is left clear.
    pub fn word(&self) -> u16 {
        ((self.gain as u16) << GAIN_SHIFT)
            | ((self.integration_time as u16) << IT_SHIFT)
            | ((self.persistence as u16) << PERS_SHIFT)
            | ((self.interrupt_enable as u16) << INT_EN_SHIFT)
    }

    /// Decodes a configuration word read back from the sensor.
    ///
    /// The shutdown bit and reserved bits are ignored.
    pub fn from_word(word: u16) -> Result<Self> {
        Ok(Self {
            gain: Gain::try_from(((word >> GAIN_SHIFT) & 0x3) as u8)?,
            integration_time: IntegrationTime::try_from(((word >> IT_SHIFT) & 0xF) as u8)?,
            persistence: Persistence::try_from(((word >> PERS_SHIFT) & 0x3) as u8)?,
            interrupt_enable: InterruptEnable::try_from(
                ((word >> INT_EN_SHIFT) & 0x1) as u8,
            )?,
        })
    }
}

/// Packs a power saving mode and its enable flag into a power save register word.
pub fn power_save_word(mode: PowerSaveMode, enable: bool) -> u16 {
    ((mode as u16) << PSM_SHIFT) | enable as u16
}

/// Splits a register word into the (low, high) byte pair in transfer order.
pub(crate) fn to_bytes(word: u16) -> (u8, u8) {
    ((word & 0xFF) as u8, (word >> 8) as u8)
}

/// Reassembles a register word from the bytes in the order they arrive on the bus.
pub(crate) fn from_bytes(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}
