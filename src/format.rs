//! Fixed-width text formatting
//!
//! Helpers that turn application values into exactly what the controller
//! should show, without floating point and without allocation:
//!
//! - [`FixedPoint`] renders an integer scaled by 100 as a decimal number
//! - [`pad_line`] truncates or space-pads text to the panel width
//! - [`sensor_lines`] builds the three telemetry lines used by
//!   [`Lcd::print_sensor_data`](crate::Lcd::print_sensor_data)
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::format::{format_fixed_point, pad_line, Precision};
//!
//! assert_eq!(format_fixed_point(1234, Precision::Two), "12.34");
//! assert_eq!(format_fixed_point(567, Precision::One), "5.6");
//! assert_eq!(pad_line("Hi", 4).as_slice(), b"Hi  ");
//! ```

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::error::MAX_COLUMNS;

/// Longest rendering of an `i32` scaled by 100: `-21474836.48`
pub const FIXED_POINT_CAPACITY: usize = 12;

/// Room for the widest telemetry line, `Gx: -21474836.48 deg/s`
pub const SENSOR_LINE_CAPACITY: usize = 32;

/// Character codes for one display row
pub type LineBuffer = Vec<u8, { MAX_COLUMNS as usize }>;

/// Rendered fixed-point value
pub type FixedPointString = String<FIXED_POINT_CAPACITY>;

/// One telemetry line before padding
pub type SensorLine = String<SENSOR_LINE_CAPACITY>;

/// Glyph shown for characters the A00 character ROM does not have
pub const REPLACEMENT: u8 = b'?';

/// Degree sign in the A00 character ROM
pub const DEGREE: u8 = 0xDF;

/// Number of decimals rendered from a value scaled by 100
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// One decimal, the hundredths digit is dropped (never rounded)
    One,
    /// Two decimals, zero padded
    Two,
}

/// Integer scaled by 100, displayed as a decimal number
///
/// Truncates rather than rounds when showing one decimal: `567` with
/// [`Precision::One`] is `5.6`, not `5.7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPoint {
    /// Quantity multiplied by 100
    pub value: i32,
    /// Decimals to show
    pub precision: Precision,
}

impl FixedPoint {
    /// Wrap a value scaled by 100
    pub const fn new(value: i32, precision: Precision) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.value.unsigned_abs();
        let whole = magnitude / 100;
        let fraction = magnitude % 100;
        let sign = if self.value < 0 { "-" } else { "" };

        match self.precision {
            Precision::Two => write!(f, "{sign}{whole}.{fraction:02}"),
            Precision::One => write!(f, "{sign}{whole}.{}", fraction / 10),
        }
    }
}

/// Render a value scaled by 100
pub fn format_fixed_point(value: i32, precision: Precision) -> FixedPointString {
    let mut out = FixedPointString::new();
    let written = write!(out, "{}", FixedPoint::new(value, precision));
    debug_assert!(written.is_ok(), "capacity covers i32::MIN");
    out
}

/// Map a character to its A00 ROM code
///
/// One `char` always maps to one display cell.
pub fn rom_code(c: char) -> u8 {
    match c {
        ' '..='}' => c as u8,
        '°' => DEGREE,
        _ => REPLACEMENT,
    }
}

/// Truncate or space-pad `text` to exactly `columns` cells
///
/// `columns` is capped at [`MAX_COLUMNS`].
pub fn pad_line(text: &str, columns: u8) -> LineBuffer {
    let width = usize::from(columns.min(MAX_COLUMNS));
    text.chars()
        .map(rom_code)
        .chain(core::iter::repeat(b' '))
        .take(width)
        .collect()
}

/// Telemetry lines for temperature, gyro X and accel X, all scaled by 100
///
/// Temperature gets one decimal, the other two get two.
pub fn sensor_lines(temp_x100: i16, gx_x100: i16, ax_x100: i16) -> [SensorLine; 3] {
    let temp = FixedPoint::new(i32::from(temp_x100), Precision::One);
    let gx = FixedPoint::new(i32::from(gx_x100), Precision::Two);
    let ax = FixedPoint::new(i32::from(ax_x100), Precision::Two);

    let [mut temp_line, mut gx_line, mut ax_line] =
        [SensorLine::new(), SensorLine::new(), SensorLine::new()];
    let written = write!(temp_line, "Temp: {temp} C")
        .and_then(|()| write!(gx_line, "Gx: {gx} deg/s"))
        .and_then(|()| write!(ax_line, "Ax: {ax} g"));
    // An i16 renders to at most 7 characters
    debug_assert!(written.is_ok(), "sensor line exceeds capacity");
    [temp_line, gx_line, ax_line]
}
