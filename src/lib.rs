//! This crate provides a platform agnostic no_std driver for the VEML7700 ambient light sensor,
//! plus a userspace transport for Linux i2c character devices (feature `linux`).
//!
//! The datasheet of the sensor can be found [here](https://www.vishay.com/docs/84286/veml7700.pdf).
//!
//! ## Supported features
//! * Raw 16-bit register reads and writes
//! * Power on / shut down
//! * Configurable gain, integration time, persistence and interrupt enable
//! * Encoding of the power saving mode word
//! * Converting the raw ALS value into the ambient light intensity in lux
//!   (at the power-on gain and integration time)
//!
//! ## Unsupported features
//! * Interrupt and threshold window functionality
//! * Automatic gain / integration time ranging
//! * Retrying failed transactions
//! * Async
//!
//! ## Usage
//!
//! ### Reading the ambient light intensity
//!
//! ```rust,ignore
//! use linux_embedded_hal::Delay;
//! use veml7700::Veml7700;
//!
//! fn main() {
//!     let mut delay = Delay;
//!     let mut sensor = Veml7700::open("/dev/i2c-1").unwrap();
//!
//!     // Power on, this blocks for the 5 ms warm-up time
//!     sensor.enable(&mut delay).unwrap();
//!
//!     let lux = sensor.read_lux().unwrap();
//!     println!("Ambient light intensity: {} lux", lux);
//!
//!     sensor.disable().unwrap();
//!     sensor.close();
//! }
//! ```
//!
//! ### Configuring the sensor
//!
//! Every configuration write replaces the whole configuration register. `enable`,
//! `disable` and `configure` therefore reset all fields they do not set:
//!
//! ```rust,ignore
//! use veml7700::{Gain, IntegrationTime, InterruptEnable, Persistence, Veml7700};
//!
//! let mut sensor = Veml7700::open("/dev/i2c-1").unwrap();
//! let word = sensor
//!     .configure(
//!         Gain::X2,
//!         IntegrationTime::Ms100,
//!         Persistence::Four,
//!         InterruptEnable::Enabled,
//!     )
//!     .unwrap();
//! assert_eq!(word, 0x0822);
//!
//! // Clears gain, integration time, persistence and interrupt enable again!
//! sensor.disable().unwrap();
//! ```
//!
//! Use [`Veml7700::power_on_preserving_config`] and [`Veml7700::shutdown_preserving_config`]
//! to toggle only the shutdown bit.

#![cfg_attr(not(any(test, feature = "linux")), no_std)]

#[cfg(feature = "linux")]
mod linux;
mod register;
mod transport;

#[cfg(feature = "linux")]
pub use linux::LinuxI2c;
pub use register::{
    power_save_word, Configuration, Gain, IntegrationTime, InterruptEnable, Persistence,
    PowerSaveMode, Register, ALS_INT_EN, ALS_SD,
};
pub use transport::{Message, Transport};

use register::{from_bytes, to_bytes};

/// I2C address for the VEML7700 sensor.
pub const VEML7700_ADDR: u8 = 0x10;

/// Time the sensor needs after power on before the first reading is valid.
const WARM_UP_MS: u32 = 5;

/// Resolution in lux per count at gain x1 and 100 ms integration time.
pub const LUX_PER_COUNT: f32 = 0.0576;

/// Represents a VEML7700 sensor on a bus.
///
/// The driver owns the bus transport, every register access needs `&mut self`
/// so transactions on one handle never interleave. Use one handle per thread.
#[derive(Debug)]
pub struct Veml7700<T> {
    /// Bus the sensor is connected to.
    transport: T,
}

impl<T> Veml7700<T>
where
    T: Transport,
{
    /// Creates a driver for the sensor reachable through `transport`.
    ///
    /// No register is accessed. The sensor comes out of reset shut down.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Destroys the driver and hands back the transport.
    ///
    /// Dropping the returned transport releases the bus.
    pub fn close(self) -> T {
        log::debug!("Releasing VEML7700 transport");
        self.transport
    }

    /// Powers the sensor on and waits for the warm-up time to pass.
    ///
    /// The configuration register is overwritten with the power-on word, so gain,
    /// integration time, persistence and interrupt enable are reset to their defaults.
    pub fn enable<D>(&mut self, delay: &mut D) -> Result<()>
    where
        D: embedded_hal::blocking::delay::DelayMs<u32>,
    {
        self.write_register(Register::Configuration, 0x00, 0x00)?;

        delay.delay_ms(WARM_UP_MS);

        log::info!("VEML7700 powered on");

        Ok(())
    }

    /// Shuts the sensor down.
    ///
    /// Like [`Self::enable`] this clears all other configuration fields.
    pub fn disable(&mut self) -> Result<()> {
        self.write_register(Register::Configuration, ALS_SD as u8, 0x00)?;

        log::info!("VEML7700 shut down");

        Ok(())
    }

    /// Powers the sensor on without touching the other configuration fields.
    ///
    /// Reads the configuration register, clears the shutdown bit, writes it back
    /// and waits for the warm-up time.
    pub fn power_on_preserving_config<D>(&mut self, delay: &mut D) -> Result<()>
    where
        D: embedded_hal::blocking::delay::DelayMs<u32>,
    {
        let word = self.read_register(Register::Configuration)? & !ALS_SD;
        let (low, high) = to_bytes(word);
        self.write_register(Register::Configuration, low, high)?;

        delay.delay_ms(WARM_UP_MS);

        log::info!("VEML7700 powered on, configuration 0x{:04X} kept", word);

        Ok(())
    }

    /// Shuts the sensor down without touching the other configuration fields.
    pub fn shutdown_preserving_config(&mut self) -> Result<()> {
        let word = self.read_register(Register::Configuration)? | ALS_SD;
        let (low, high) = to_bytes(word);
        self.write_register(Register::Configuration, low, high)?;

        log::info!("VEML7700 shut down, configuration 0x{:04X} kept", word);

        Ok(())
    }

    /// Writes gain, integration time, persistence and interrupt enable to the
    /// configuration register and returns the written word.
    ///
    /// The shutdown bit is written as 0, so this also powers the sensor on.
    pub fn configure(
        &mut self,
        gain: Gain,
        integration_time: IntegrationTime,
        persistence: Persistence,
        interrupt_enable: InterruptEnable,
    ) -> Result<u16> {
        self.apply(Configuration {
            gain,
            integration_time,
            persistence,
            interrupt_enable,
        })
    }

    /// Writes a whole [`Configuration`] and returns the written word.
    pub fn apply(&mut self, config: Configuration) -> Result<u16> {
        let word = config.word();
        log::debug!("Configuration {:?} packs to 0x{:04X}", config, word);

        let (low, high) = to_bytes(word);
        self.write_register(Register::Configuration, low, high)?;

        Ok(word)
    }

    /// Reads the configuration register back.
    pub fn read_configuration(&mut self) -> Result<Configuration> {
        let word = self.read_register(Register::Configuration)?;
        Configuration::from_word(word)
    }

    /// Computes the power save register word for `mode`.
    ///
    /// This does not access the bus, the word is only returned. Write it with
    /// [`Self::write_register`] and [`Register::PowerSave`] if needed.
    pub fn set_power_save_mode(&self, mode: PowerSaveMode, enable: bool) -> u16 {
        power_save_word(mode, enable)
    }

    /// Reads the raw ALS output.
    pub fn read_als(&mut self) -> Result<u16> {
        self.read_register(Register::AlsData)
    }

    /// Reads the ALS output and converts it to lux.
    ///
    /// Only correct at the power-on gain and integration time, see [`raw_to_lux`].
    pub fn read_lux(&mut self) -> Result<f32> {
        let raw = self.read_als()?;
        let lux = raw_to_lux(raw);

        log::info!("Read raw ALS value {} ({} lux)", raw, lux);

        Ok(lux)
    }

    /// Writes a new value to a specific register
    ///
    /// The command code and both data bytes go out in a single write message.
    pub fn write_register(&mut self, register: Register, low: u8, high: u8) -> Result<()> {
        let write_data = [register.command_code(), low, high];

        log::debug!("Writing {:02X?} to register {:?}", write_data, register);

        self.transport
            .transfer(VEML7700_ADDR, &mut [Message::Write(&write_data)])
            .map_err(|e| {
                log::error!("Write to register {:?} failed: {:?}", register, e);
                Veml7700Error::TransactionFailed
            })?;

        Ok(())
    }

    /// Reads the value of a specific register
    ///
    /// The command code is written and both data bytes are read back within one
    /// transaction, without a start condition in between.
    pub fn read_register(&mut self, register: Register) -> Result<u16> {
        let command = [register.command_code()];
        let mut read_data = [0; 2];

        self.transport
            .transfer(
                VEML7700_ADDR,
                &mut [
                    Message::Write(&command),
                    Message::Read {
                        buffer: &mut read_data,
                        no_start: true,
                    },
                ],
            )
            .map_err(|e| {
                log::error!("Read of register {:?} failed: {:?}", register, e);
                Veml7700Error::TransactionFailed
            })?;

        log::debug!("Read {:02X?} from register {:?}", read_data, register);

        Ok(from_bytes(read_data[0], read_data[1]))
    }
}

/// Converts a raw ALS value into lux.
///
/// Uses the resolution at gain x1 and 100 ms integration time, which is what
/// [`Veml7700::enable`] leaves the sensor in. Other settings are not accounted for.
pub fn raw_to_lux(raw: u16) -> f32 {
    raw as f32 * LUX_PER_COUNT
}

/// Shorthand for all functions returning an error in this crate.
pub type Result<T> = core::result::Result<T, Veml7700Error>;

/// Represents any error that may happen during communication.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum Veml7700Error {
    /// The bus could not be opened.
    TransportUnavailable,
    /// A read or write transaction with the sensor failed.
    TransactionFailed,
    /// A configuration field value is outside its defined set.
    InvalidConfiguration,
}

impl core::fmt::Display for Veml7700Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Veml7700Error::TransportUnavailable => f.write_str("i2c bus unavailable"),
            Veml7700Error::TransactionFailed => f.write_str("i2c transaction failed"),
            Veml7700Error::InvalidConfiguration => f.write_str("invalid configuration value"),
        }
    }
}

#[cfg(feature = "linux")]
impl std::error::Error for Veml7700Error {}
