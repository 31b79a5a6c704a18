//! Hardware interface abstraction
//!
//! This module provides the [`BusInterface`] trait and the [`I2cInterface`] struct
//! for talking to the PCF8574 bus expander that sits between the MCU and the
//! HD44780 controller.
//!
//! ## Hardware Requirements
//!
//! The backpack wires the expander outputs to the LCD as:
//!
//! | P7 | P6 | P5 | P4 | P3 | P2 | P1 | P0 |
//! |----|----|----|----|----|----|----|----|
//! | D7 | D6 | D5 | D4 | BL | EN | RW | RS |
//!
//! Every byte written to the expander is latched onto those eight lines.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
//! use hd44780_i2c::{BusInterface, I2cInterface};
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c<SevenBitAddress> for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! let mut interface = I2cInterface::new(MockI2c);
//!
//! // Backlight on, all other lines low
//! let _ = interface.write(0x08);
//!
//! // Check the expander acknowledges its address
//! let _ = interface.is_ready();
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::{I2c, SevenBitAddress};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default 7-bit address of PCF8574 backpacks (A0..A2 pulled high)
///
/// `embedded-hal` takes the 7-bit address; the HAL appends the R/W bit on the
/// wire, so this is the `0x4E` write address seen on a logic analyser.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x27;

/// Trait for the byte transport to the bus expander
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Lcd`](crate::display::Lcd) to work with any transport that
/// can push a single byte to a fixed device.
///
/// ## Implementing
///
/// For most cases, use the provided [`I2cInterface`] struct. Implement this
/// trait yourself when the expander sits behind something else (a bus
/// multiplexer, a shared-bus wrapper, a test double).
pub trait BusInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one byte to the expander outputs
    ///
    /// Blocks until the transfer completes or the transport gives up.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer is not acknowledged.
    fn write(&mut self, byte: u8) -> InterfaceResult<(), Self::Error>;

    /// Probe whether the expander answers on its address
    ///
    /// # Errors
    ///
    /// Returns an error if the bus itself faults. A device that simply does
    /// not answer yields `Ok(false)` where the transport can tell the two apart.
    fn is_ready(&mut self) -> InterfaceResult<bool, Self::Error>;
}

impl<T: BusInterface + ?Sized> BusInterface for &mut T {
    type Error = T::Error;

    fn write(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        T::write(self, byte)
    }

    fn is_ready(&mut self) -> InterfaceResult<bool, Self::Error> {
        T::is_ready(self)
    }
}

/// Hardware interface implementation for PCF8574 backpacks
///
/// Implements [`BusInterface`] for any embedded-hal v1.0 [`I2c`] bus.
///
/// ## Type Parameters
///
/// * `I2C` - bus implementing [`I2c`] with 7-bit addressing
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: SevenBitAddress,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c<SevenBitAddress>,
{
    /// Create a new interface at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a new interface at a specific 7-bit address
    ///
    /// PCF8574 boards use `0x20..=0x27`, PCF8574A boards `0x38..=0x3F`.
    pub fn with_address(i2c: I2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Get the 7-bit device address
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> BusInterface for I2cInterface<I2C>
where
    I2C: I2c<SevenBitAddress>,
{
    type Error = I2C::Error;

    fn write(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, &[byte])
    }

    fn is_ready(&mut self) -> InterfaceResult<bool, Self::Error> {
        use embedded_hal::i2c::{Error as _, ErrorKind};

        // A single-byte read of the expander port only succeeds if the
        // address is acknowledged; it does not disturb the outputs.
        let mut port = [0u8];
        match self.i2c.read(self.address, &mut port) {
            Ok(()) => Ok(true),
            Err(e) => match e.kind() {
                ErrorKind::NoAcknowledge(_) => Ok(false),
                _ => Err(e),
            },
        }
    }
}
