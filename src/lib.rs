//! HD44780 Character LCD Driver over I2C
//!
//! A driver for HD44780-compatible character displays wired to a PCF8574 I2C
//! backpack, running the controller in 4-bit mode.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - Fixed, ordered bring-up sequence with injectable delays
//! - Saturating cursor addressing for 1 to 4 rows
//! - Fixed-width line output that always overwrites the whole row
//! - Fixed-point number formatting without floats
//! - `core::fmt::Write` support
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
//! use hd44780_i2c::{Builder, Geometry, Lcd};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let i2c = MockI2c;
//! # let delay = MockDelay;
//! let config = Builder::new().address(0x27).build();
//! let mut lcd = Lcd::new_i2c(i2c, delay, config);
//!
//! if lcd.begin(Geometry::LCD2004).is_err() {
//!     return;
//! }
//! let _ = lcd.print_line(0, "Hello");
//! let _ = lcd.print_sensor_data(2345, -1578, 980);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// HD44780 instruction set
pub mod command;
/// Driver configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Fixed-width text and number formatting
pub mod format;
/// Hardware interface abstraction
pub mod interface;
/// 4-bit nibble transmission
pub mod protocol;

pub use command::{Command, DisplayControl, ROW_OFFSETS};
pub use config::{Builder, Config, Geometry, MAX_COLUMNS, MAX_ROWS};
pub use display::{Lcd, State};
pub use error::{BuilderError, Error, FatalErrorHandler, NoopHandler};
pub use format::{FixedPoint, Precision, format_fixed_point};
pub use interface::{BusInterface, DEFAULT_ADDRESS, I2cInterface};
