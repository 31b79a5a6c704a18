//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]), plus the [`FatalErrorHandler`] hook that
//! is notified when the bus fails.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during geometry/configuration construction
//! - [`Error`] - Runtime errors during display operations
//!
//! Out-of-range cursor coordinates are not errors. They are saturated to the
//! nearest visible cell.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::{BuilderError, Geometry};
//!
//! // Too many rows for an HD44780
//! let result = Geometry::new(20, 5);
//! assert!(matches!(
//!     result,
//!     Err(BuilderError::InvalidGeometry { columns: 20, rows: 5 })
//! ));
//! ```

use crate::interface::BusInterface;

/// Maximum number of rows an HD44780 can address
///
/// Bounded by the length of [`ROW_OFFSETS`](crate::command::ROW_OFFSETS).
pub const MAX_ROWS: u8 = 4;

/// Maximum number of columns an HD44780 can address
///
/// DDRAM holds 40 characters per logical line.
pub const MAX_COLUMNS: u8 = 40;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific bus error type.
pub enum Error<I: BusInterface> {
    /// Bus transport error
    ///
    /// Fatal. The [`FatalErrorHandler`] has already been notified by the time
    /// this reaches the caller.
    Bus(I::Error),
    /// The device did not acknowledge the ready probe
    ///
    /// Fatal, reported to the [`FatalErrorHandler`] like [`Error::Bus`].
    NotResponding,
    /// A text or cursor operation was issued before [`begin`](crate::Lcd::begin)
    /// completed
    NotInitialized,
}

impl<I: BusInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => f.debug_tuple("Bus").field(e).finish(),
            Self::NotResponding => f.write_str("NotResponding"),
            Self::NotInitialized => f.write_str("NotInitialized"),
        }
    }
}

impl<I: BusInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::NotResponding => write!(f, "Device did not respond to probe"),
            Self::NotInitialized => write!(f, "Display not initialized"),
        }
    }
}

impl<I: BusInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Geometry was not specified
    ///
    /// [`Builder::geometry()`](crate::config::Builder::geometry) must be called
    /// before [`Lcd::begin_with_config`](crate::Lcd::begin_with_config).
    MissingGeometry,
    /// Invalid geometry provided
    ///
    /// See [`Geometry::new()`](crate::config::Geometry::new) for constraints.
    InvalidGeometry {
        /// Number of columns requested
        columns: u8,
        /// Number of rows requested
        rows: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingGeometry => write!(f, "Geometry must be specified"),
            Self::InvalidGeometry { columns, rows } => write!(
                f,
                "Invalid geometry {columns}x{rows} (columns 1..={MAX_COLUMNS}, rows 1..={MAX_ROWS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Hook notified of unrecoverable bus failures
///
/// Called exactly once per failing operation, at the write or probe that
/// failed. The error is then returned to the caller and no further bus
/// traffic is generated by that operation.
///
/// The driver reports [`Error::Bus`] and [`Error::NotResponding`] through
/// `E = Error<I>`. Integrators that want a halt-on-failure policy put their
/// halt or reset inside the handler. Closures taking `&E` implement this
/// trait.
pub trait FatalErrorHandler<E> {
    /// Handle a bus failure
    fn on_fatal(&mut self, error: &E);
}

impl<E, F> FatalErrorHandler<E> for F
where
    F: FnMut(&E),
{
    fn on_fatal(&mut self, error: &E) {
        self(error);
    }
}

/// Handler that does nothing and leaves escalation to the returned error
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl<E> FatalErrorHandler<E> for NoopHandler {
    fn on_fatal(&mut self, _error: &E) {}
}
