//! HD44780 instruction set
//!
//! This module defines the controller instructions as a closed [`Command`]
//! enum with a single encoding table ([`Command::encode`]), plus the
//! expander pin masks and the DDRAM row offset table.
//!
//! ## Command Structure
//!
//! Every instruction is one byte. The high bits select the instruction, the
//! low bits are its flags. In 4-bit mode the byte goes out as two nibbles,
//! high nibble first, with the RS line low.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::command::{Command, DisplayControl, EntryMode, FunctionSet};
//!
//! assert_eq!(Command::ClearDisplay.encode(), 0x01);
//! assert_eq!(Command::FunctionSet(FunctionSet::default()).encode(), 0x28);
//! assert_eq!(Command::EntryModeSet(EntryMode::default()).encode(), 0x06);
//! assert_eq!(Command::DisplayControl(DisplayControl::default()).encode(), 0x0C);
//! assert_eq!(Command::SetDdramAddress(0x54).encode(), 0xD4);
//! ```

// Expander pin masks (PCF8574 P0..P3)

/// Register select, high for character data
pub const RS: u8 = 0x01;

/// Enable line, the controller latches on its falling edge
pub const ENABLE: u8 = 0x04;

/// Backlight transistor
pub const BACKLIGHT: u8 = 0x08;

/// Data lines D4..D7 live in the upper half of the expander byte
pub const NIBBLE_MASK: u8 = 0xF0;

// Bring-up nibbles

/// Function set with the 8-bit interface flag, sent as a lone nibble
///
/// Repeated three times during bring-up to resynchronise the controller no
/// matter which interface width it powered up in.
pub const FUNCTION_SET_8BIT: u8 = 0x30;

/// Function set with the 4-bit interface flag, sent as a lone nibble
pub const FUNCTION_SET_4BIT: u8 = 0x20;

/// DDRAM base address of each display row
///
/// Lines 2 and 3 of a four-line panel are the continuation of lines 0 and 1
/// in DDRAM, hence the interleaving.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

// Execution times at 270kHz, in microseconds

/// Instruction execution time
pub const EXECUTION_TIME_US: u32 = 37;

/// Data write execution time, including the address counter update
pub const WRITE_EXECUTION_TIME_US: u32 = 41;

/// Execution time of clear display and return home
pub const CLEAR_HOME_EXECUTION_TIME_US: u32 = 1_520;

/// Controller instruction
///
/// All instructions the driver issues go through [`Command::encode`], so the
/// numeric layout lives in one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Clear DDRAM and return the cursor home (0x01)
    ClearDisplay,
    /// Return the cursor and display shift home without erasing (0x02)
    ReturnHome,
    /// Set cursor direction and display shift on write (0x04)
    EntryModeSet(EntryMode),
    /// Display, cursor and blink on/off (0x08)
    DisplayControl(DisplayControl),
    /// Move the cursor or shift the display without writing (0x10)
    Shift(Shift),
    /// Interface width, line count and font (0x20)
    FunctionSet(FunctionSet),
    /// Set the DDRAM address counter (0x80), 7-bit address
    SetDdramAddress(u8),
}

impl Command {
    /// Time the controller is busy after receiving this instruction
    pub const fn execution_time_us(self) -> u32 {
        match self {
            Self::ClearDisplay | Self::ReturnHome => CLEAR_HOME_EXECUTION_TIME_US,
            _ => EXECUTION_TIME_US,
        }
    }

    /// Encode the instruction byte
    pub const fn encode(self) -> u8 {
        match self {
            Self::ClearDisplay => 0x01,
            Self::ReturnHome => 0x02,
            Self::EntryModeSet(mode) => {
                0x04 | (if mode.increment { 0x02 } else { 0x00 })
                    | (if mode.shift_display { 0x01 } else { 0x00 })
            }
            Self::DisplayControl(control) => {
                0x08 | (if control.display { 0x04 } else { 0x00 })
                    | (if control.cursor { 0x02 } else { 0x00 })
                    | (if control.blink { 0x01 } else { 0x00 })
            }
            Self::Shift(shift) => {
                0x10 | (match shift.target {
                    ShiftTarget::Display => 0x08,
                    ShiftTarget::Cursor => 0x00,
                }) | (match shift.direction {
                    Direction::Right => 0x04,
                    Direction::Left => 0x00,
                })
            }
            Self::FunctionSet(function) => {
                0x20 | (match function.data_length {
                    DataLength::EightBit => 0x10,
                    DataLength::FourBit => 0x00,
                }) | (match function.lines {
                    Lines::Two => 0x08,
                    Lines::One => 0x00,
                }) | (match function.font {
                    Font::Dots5x10 => 0x04,
                    Font::Dots5x8 => 0x00,
                })
            }
            Self::SetDdramAddress(address) => 0x80 | (address & 0x7F),
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.encode()
    }
}

/// Entry mode flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryMode {
    /// Advance the cursor left-to-right after each write
    pub increment: bool,
    /// Shift the whole display on each write
    pub shift_display: bool,
}

impl Default for EntryMode {
    /// Left-to-right, no display shift
    fn default() -> Self {
        Self {
            increment: true,
            shift_display: false,
        }
    }
}

/// Display control flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayControl {
    /// Display visible
    pub display: bool,
    /// Underline cursor visible
    pub cursor: bool,
    /// Block cursor blinking
    pub blink: bool,
}

impl DisplayControl {
    /// Everything off; used while the controller is being configured
    pub const OFF: Self = Self {
        display: false,
        cursor: false,
        blink: false,
    };
}

impl Default for DisplayControl {
    /// Display on, cursor and blink off
    fn default() -> Self {
        Self {
            display: true,
            cursor: false,
            blink: false,
        }
    }
}

/// What a shift instruction moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftTarget {
    /// Move the cursor
    Cursor,
    /// Scroll the whole display
    Display,
}

/// Shift direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards column 0
    Left,
    /// Away from column 0
    Right,
}

/// Cursor/display shift parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift {
    /// What moves
    pub target: ShiftTarget,
    /// Which way
    pub direction: Direction,
}

/// Interface data length
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataLength {
    /// DB0..DB7
    EightBit,
    /// DB4..DB7, two transfers per byte
    FourBit,
}

/// Number of display lines as seen by the controller
///
/// Four-row panels are two controller lines folded in half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lines {
    /// One line
    One,
    /// Two lines
    Two,
}

/// Character font
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// 5x8 dots
    Dots5x8,
    /// 5x10 dots (single-line mode only)
    Dots5x10,
}

/// Function set parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionSet {
    /// Interface width
    pub data_length: DataLength,
    /// Line mode
    pub lines: Lines,
    /// Font
    pub font: Font,
}

impl Default for FunctionSet {
    /// 4-bit interface, two lines, 5x8 font
    fn default() -> Self {
        Self {
            data_length: DataLength::FourBit,
            lines: Lines::Two,
            font: Font::Dots5x8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_instructions() {
        assert_eq!(Command::ClearDisplay.encode(), 0x01);
        assert_eq!(Command::ReturnHome.encode(), 0x02);
    }

    #[test]
    fn test_bring_up_encodings() {
        assert_eq!(Command::FunctionSet(FunctionSet::default()).encode(), 0x28);
        assert_eq!(Command::DisplayControl(DisplayControl::OFF).encode(), 0x08);
        assert_eq!(Command::EntryModeSet(EntryMode::default()).encode(), 0x06);
        assert_eq!(
            Command::DisplayControl(DisplayControl::default()).encode(),
            0x0C
        );
    }

    #[test]
    fn test_display_control_flags() {
        let all = DisplayControl {
            display: true,
            cursor: true,
            blink: true,
        };
        assert_eq!(Command::DisplayControl(all).encode(), 0x0F);
    }

    #[test]
    fn test_shift_encodings() {
        let scroll_left = Shift {
            target: ShiftTarget::Display,
            direction: Direction::Left,
        };
        let cursor_right = Shift {
            target: ShiftTarget::Cursor,
            direction: Direction::Right,
        };
        assert_eq!(Command::Shift(scroll_left).encode(), 0x18);
        assert_eq!(Command::Shift(cursor_right).encode(), 0x14);
    }

    #[test]
    fn test_function_set_8bit_matches_bring_up_nibble() {
        let eight_bit = FunctionSet {
            data_length: DataLength::EightBit,
            lines: Lines::One,
            font: Font::Dots5x8,
        };
        assert_eq!(Command::FunctionSet(eight_bit).encode(), FUNCTION_SET_8BIT);
    }

    #[test]
    fn test_ddram_address_is_masked_to_seven_bits() {
        assert_eq!(Command::SetDdramAddress(0x00).encode(), 0x80);
        assert_eq!(Command::SetDdramAddress(0x67).encode(), 0xE7);
        assert_eq!(Command::SetDdramAddress(0xFF).encode(), 0xFF);
    }

    #[test]
    fn test_execution_times() {
        assert_eq!(Command::ClearDisplay.execution_time_us(), 1_520);
        assert_eq!(Command::ReturnHome.execution_time_us(), 1_520);
        assert_eq!(Command::SetDdramAddress(0).execution_time_us(), 37);
        assert_eq!(
            Command::DisplayControl(DisplayControl::OFF).execution_time_us(),
            37
        );
    }

    #[test]
    fn test_row_offsets() {
        assert_eq!(ROW_OFFSETS.len(), usize::from(crate::error::MAX_ROWS));
        assert_eq!(ROW_OFFSETS, [0x00, 0x40, 0x14, 0x54]);
    }
}
