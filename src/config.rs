//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};
use crate::command::{EXECUTION_TIME_US, WRITE_EXECUTION_TIME_US};
use crate::interface::DEFAULT_ADDRESS;

/// Shortest enable pulse accepted by [`Builder`], in microseconds
///
/// The controller needs 450ns; one microsecond is the finest step `DelayNs`
/// callers can rely on.
pub const MIN_ENABLE_SETTLE_US: u32 = 1;

/// Display geometry in character cells
///
/// Only obtainable through [`Geometry::new`] or the presets, so every value
/// is within the controller's addressing limits.
///
/// ```compile_fail
/// use hd44780_i2c::Geometry;
///
/// let geometry = Geometry { columns: 20, rows: 5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    columns: u8,
    rows: u8,
}

impl Geometry {
    /// 16x2 panel (LCD1602)
    pub const LCD1602: Self = Self {
        columns: 16,
        rows: 2,
    };

    /// 20x4 panel (LCD2004)
    pub const LCD2004: Self = Self {
        columns: 20,
        rows: 4,
    };

    /// Create new geometry with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGeometry` if:
    /// - columns == 0 or columns > MAX_COLUMNS
    /// - rows == 0 or rows > MAX_ROWS
    pub fn new(columns: u8, rows: u8) -> Result<Self, BuilderError> {
        if columns == 0 || columns > MAX_COLUMNS || rows == 0 || rows > MAX_ROWS {
            return Err(BuilderError::InvalidGeometry { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Characters per row
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Last addressable column
    pub fn last_column(&self) -> u8 {
        self.columns - 1
    }

    /// Last addressable row
    pub fn last_row(&self) -> u8 {
        self.rows - 1
    }
}

/// Driver configuration
///
/// Timing values are minimums the controller needs; slower is always safe.
/// Use `Builder` to create a Config. The driver never waits less than the
/// controller's execution times, whatever these fields hold.
#[derive(Clone, Debug)]
pub struct Config {
    /// Geometry used by [`Lcd::begin_with_config`](crate::Lcd::begin_with_config)
    pub geometry: Option<Geometry>,
    /// 7-bit bus address of the expander
    pub address: u8,
    /// Backlight state after construction
    pub backlight: bool,
    /// Time the enable line is held high for each nibble, in microseconds
    pub enable_settle_us: u32,
    /// Processing time after every instruction, in microseconds
    pub command_delay_us: u32,
    /// Processing time after every character, in microseconds
    pub data_delay_us: u32,
    /// Extra wait after clear, home and string writes, in milliseconds
    pub settle_ms: u32,
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use hd44780_i2c::{Builder, Geometry};
///
/// let config = Builder::new()
///     .geometry(Geometry::LCD2004)
///     .address(0x3F)
///     .backlight(false)
///     .build();
/// assert_eq!(config.address, 0x3F);
/// assert_eq!(config.geometry, Some(Geometry::LCD2004));
/// ```
#[must_use]
pub struct Builder {
    /// Geometry for `begin_with_config`
    geometry: Option<Geometry>,
    /// 7-bit bus address
    address: u8,
    /// Initial backlight state
    backlight: bool,
    /// Enable pulse settle time (us)
    enable_settle_us: u32,
    /// Instruction processing time (us)
    command_delay_us: u32,
    /// Character processing time (us)
    data_delay_us: u32,
    /// Clear/home/string settle time (ms)
    settle_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            geometry: None,
            address: DEFAULT_ADDRESS,
            backlight: true,
            // Generous for slow KS0066 clones; the datasheet asks for 450ns
            enable_settle_us: 5_000,
            command_delay_us: 2_000,
            data_delay_us: 1_000,
            settle_ms: 2,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display geometry
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set the 7-bit expander address
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the initial backlight state
    pub fn backlight(mut self, on: bool) -> Self {
        self.backlight = on;
        self
    }

    /// Set how long the enable line is held high per nibble
    ///
    /// Raised to [`MIN_ENABLE_SETTLE_US`] by [`build`](Self::build).
    pub fn enable_settle_us(mut self, us: u32) -> Self {
        self.enable_settle_us = us;
        self
    }

    /// Set the processing delay after each instruction
    ///
    /// Raised to the controller's 37us instruction time by
    /// [`build`](Self::build). Clear and home always get their full 1.52ms.
    pub fn command_delay_us(mut self, us: u32) -> Self {
        self.command_delay_us = us;
        self
    }

    /// Set the processing delay after each character
    ///
    /// Raised to the controller's 41us write time by [`build`](Self::build).
    pub fn data_delay_us(mut self, us: u32) -> Self {
        self.data_delay_us = us;
        self
    }

    /// Set the extra wait after clear, home and string writes
    pub fn settle_ms(mut self, ms: u32) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            geometry: self.geometry,
            address: self.address,
            backlight: self.backlight,
            enable_settle_us: self.enable_settle_us.max(MIN_ENABLE_SETTLE_US),
            command_delay_us: self.command_delay_us.max(EXECUTION_TIME_US),
            data_delay_us: self.data_delay_us.max(WRITE_EXECUTION_TIME_US),
            settle_ms: self.settle_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_bounds() {
        assert!(Geometry::new(1, 1).is_ok());
        assert!(Geometry::new(40, 4).is_ok());
        assert_eq!(
            Geometry::new(0, 2),
            Err(BuilderError::InvalidGeometry {
                columns: 0,
                rows: 2
            })
        );
        assert!(Geometry::new(41, 2).is_err());
        assert!(Geometry::new(16, 0).is_err());
        assert!(Geometry::new(20, 5).is_err());
    }

    #[test]
    fn test_geometry_presets_are_valid() {
        assert_eq!(Geometry::new(16, 2), Ok(Geometry::LCD1602));
        assert_eq!(Geometry::new(20, 4), Ok(Geometry::LCD2004));
    }

    #[test]
    fn test_last_cell() {
        let geometry = Geometry::LCD2004;
        assert_eq!(geometry.columns(), 20);
        assert_eq!(geometry.rows(), 4);
        assert_eq!(geometry.last_column(), 19);
        assert_eq!(geometry.last_row(), 3);
    }

    #[test]
    fn test_default_config_timing() {
        let config = Config::default();
        assert_eq!(config.geometry, None);
        assert_eq!(config.address, 0x27);
        assert!(config.backlight);
        assert_eq!(config.enable_settle_us, 5_000);
        assert_eq!(config.command_delay_us, 2_000);
        assert_eq!(config.data_delay_us, 1_000);
        assert_eq!(config.settle_ms, 2);
    }

    #[test]
    fn test_geometry_accessors_never_underflow() {
        for columns in 0..=u8::MAX {
            for rows in 0..=u8::MAX {
                if let Ok(geometry) = Geometry::new(columns, rows) {
                    assert!(geometry.last_column() < MAX_COLUMNS);
                    assert!(geometry.last_row() < MAX_ROWS);
                }
            }
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = Builder::new()
            .enable_settle_us(2)
            .command_delay_us(50)
            .data_delay_us(60)
            .settle_ms(0)
            .build();
        assert_eq!(config.enable_settle_us, 2);
        assert_eq!(config.command_delay_us, 50);
        assert_eq!(config.data_delay_us, 60);
        assert_eq!(config.settle_ms, 0);
    }

    #[test]
    fn test_builder_clamps_to_controller_minimums() {
        let config = Builder::new()
            .enable_settle_us(0)
            .command_delay_us(0)
            .data_delay_us(0)
            .build();
        assert_eq!(config.enable_settle_us, MIN_ENABLE_SETTLE_US);
        assert_eq!(config.command_delay_us, 37);
        assert_eq!(config.data_delay_us, 41);
    }
}
