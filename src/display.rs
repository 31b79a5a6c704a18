//! Core display operations

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::debug;

use crate::command::{
    Command, Direction, DisplayControl, EntryMode, FUNCTION_SET_4BIT, FUNCTION_SET_8BIT,
    FunctionSet, ROW_OFFSETS, Shift, ShiftTarget,
};
use crate::config::{Config, Geometry};
use crate::error::{BuilderError, Error, FatalErrorHandler, NoopHandler};
use crate::format::{self, rom_code};
use crate::interface::{BusInterface, I2cInterface};
use crate::protocol::{Mode, Protocol};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Controller lifecycle
///
/// `Ready` is only reachable by running [`Lcd::begin`] to completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// `begin` has not been called
    #[default]
    Uninitialized,
    /// Bring-up sequence in progress, or interrupted by a bus failure
    Initializing,
    /// Controller configured for 4-bit operation
    Ready,
}

/// Character LCD driver for an HD44780 behind a PCF8574 backpack
///
/// Holds its own geometry, so several panels can be driven side by side.
/// Every operation blocks until the controller has had time to process it.
pub struct Lcd<I, D, H = NoopHandler> {
    /// Byte transmitter
    protocol: Protocol<I, D, H>,
    /// Driver configuration
    config: Config,
    /// Geometry stored by `begin`
    geometry: Option<Geometry>,
    /// Lifecycle state
    state: State,
    /// Last display control value sent
    control: DisplayControl,
}

impl<I2C, D> Lcd<I2cInterface<I2C>, D, NoopHandler>
where
    I2C: I2c<SevenBitAddress>,
    D: DelayNs,
{
    /// Create a driver on an I2C bus, at the address in `config`
    pub fn new_i2c(i2c: I2C, delay: D, config: Config) -> Self {
        let interface = I2cInterface::with_address(i2c, config.address);
        Self::new(interface, delay, config)
    }
}

impl<I, D> Lcd<I, D, NoopHandler>
where
    I: BusInterface,
    D: DelayNs,
{
    /// Create a new driver
    ///
    /// No bus traffic happens until [`begin`](Self::begin).
    pub fn new(interface: I, delay: D, config: Config) -> Self {
        Self::with_handler(interface, delay, NoopHandler, config)
    }
}

impl<I, D, H> Lcd<I, D, H>
where
    I: BusInterface,
    D: DelayNs,
    H: FatalErrorHandler<Error<I>>,
{
    /// Create a new driver that reports bus failures to `handler`
    pub fn with_handler(interface: I, delay: D, handler: H, config: Config) -> Self {
        Self {
            protocol: Protocol::new(interface, delay, handler, &config),
            config,
            geometry: None,
            state: State::Uninitialized,
            control: DisplayControl::OFF,
        }
    }

    /// Store the geometry and run the controller bring-up sequence
    ///
    /// The steps and their order are fixed by the controller's reset logic.
    /// Three 8-bit function sets resynchronise the interface whatever width
    /// it powered up in, then the controller is moved to 4-bit mode and
    /// configured. On success the driver is [`State::Ready`]; on failure it
    /// stays [`State::Initializing`] and the panel is in an undefined state.
    pub fn begin(&mut self, geometry: Geometry) -> DisplayResult<I> {
        debug!(
            "begin: {}x{} at {:#04x}",
            geometry.columns(),
            geometry.rows(),
            self.config.address
        );
        self.geometry = Some(geometry);
        self.state = State::Initializing;

        self.protocol.probe()?;

        // Power-on settle, then force 8-bit mode three times
        self.protocol.delay_ms(50);
        self.protocol.send_nibble(FUNCTION_SET_8BIT, Mode::Command)?;
        self.protocol.delay_ms(5);
        self.protocol.send_nibble(FUNCTION_SET_8BIT, Mode::Command)?;
        self.protocol.delay_ms(5);
        self.protocol.send_nibble(FUNCTION_SET_8BIT, Mode::Command)?;
        self.protocol.delay_ms(1);

        // Switch to 4-bit; from here on every byte is two nibbles
        self.protocol.send_nibble(FUNCTION_SET_4BIT, Mode::Command)?;
        self.protocol.delay_ms(1);

        self.protocol
            .send_command(Command::FunctionSet(FunctionSet::default()))?;
        self.control = DisplayControl::OFF;
        self.protocol
            .send_command(Command::DisplayControl(self.control))?;
        self.protocol.send_command(Command::ClearDisplay)?;
        self.protocol.delay_ms(self.config.settle_ms);
        self.protocol
            .send_command(Command::EntryModeSet(EntryMode::default()))?;
        self.control = DisplayControl::default();
        self.protocol
            .send_command(Command::DisplayControl(self.control))?;

        self.state = State::Ready;
        debug!("begin: ready");
        Ok(())
    }

    /// Run [`begin`](Self::begin) with the geometry from the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingGeometry` without touching the bus if the
    /// configuration has no geometry.
    pub fn begin_with_config(
        &mut self,
    ) -> core::result::Result<DisplayResult<I>, BuilderError> {
        let geometry = self.config.geometry.ok_or(BuilderError::MissingGeometry)?;
        Ok(self.begin(geometry))
    }

    /// Geometry stored by the last successful `begin`, if `Ready`
    fn ready_geometry(&self) -> core::result::Result<Geometry, Error<I>> {
        match (self.state, self.geometry) {
            (State::Ready, Some(geometry)) => Ok(geometry),
            _ => Err(Error::NotInitialized),
        }
    }

    /// Clear the display and return the cursor home
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.ready_geometry()?;
        self.protocol.send_command(Command::ClearDisplay)?;
        self.protocol.delay_ms(self.config.settle_ms);
        Ok(())
    }

    /// Return the cursor home without erasing
    pub fn home(&mut self) -> DisplayResult<I> {
        self.ready_geometry()?;
        self.protocol.send_command(Command::ReturnHome)?;
        self.protocol.delay_ms(self.config.settle_ms);
        Ok(())
    }

    /// Move the cursor to `col`, `row`
    ///
    /// Out-of-range coordinates saturate to the last column/row; they never
    /// wrap and never fail.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> DisplayResult<I> {
        let geometry = self.ready_geometry()?;
        let address = ddram_address(geometry, col, row);
        self.protocol.send_command(Command::SetDdramAddress(address))
    }

    /// Write `text` at the cursor
    ///
    /// One character per cell, see [`rom_code`] for the mapping.
    pub fn send_string(&mut self, text: &str) -> DisplayResult<I> {
        self.ready_geometry()?;
        self.send_codes(text.chars().map(rom_code))?;
        self.protocol.delay_ms(self.config.settle_ms);
        Ok(())
    }

    fn send_codes(&mut self, codes: impl IntoIterator<Item = u8>) -> DisplayResult<I> {
        for code in codes {
            self.protocol.send_data(code)?;
        }
        Ok(())
    }

    /// Overwrite a whole row with `text`
    ///
    /// The text is cut or space-padded to the configured width, so exactly
    /// `columns` cells are written and nothing from a previous, longer line
    /// survives.
    pub fn print_line(&mut self, row: u8, text: &str) -> DisplayResult<I> {
        let geometry = self.ready_geometry()?;
        let line = format::pad_line(text, geometry.columns());
        self.set_cursor(0, row)?;
        self.send_codes(line)?;
        self.protocol.delay_ms(self.config.settle_ms);
        Ok(())
    }

    /// Clear the display and write `text` from the top-left cell
    pub fn print(&mut self, text: &str) -> DisplayResult<I> {
        self.clear()?;
        self.home()?;
        self.send_string(text)
    }

    /// Show temperature, gyro X and accel X readings on rows 0, 1 and 2
    ///
    /// All values are scaled by 100. On panels with fewer than three rows the
    /// later lines land on the last row.
    pub fn print_sensor_data(
        &mut self,
        temp_x100: i16,
        gx_x100: i16,
        ax_x100: i16,
    ) -> DisplayResult<I> {
        let [temp, gx, ax] = format::sensor_lines(temp_x100, gx_x100, ax_x100);
        self.print_line(0, &temp)?;
        self.print_line(1, &gx)?;
        self.print_line(2, &ax)
    }

    /// Send a display control value
    pub fn set_display_control(&mut self, control: DisplayControl) -> DisplayResult<I> {
        self.ready_geometry()?;
        self.protocol.send_command(Command::DisplayControl(control))?;
        self.control = control;
        Ok(())
    }

    /// Last display control value sent
    pub fn display_control(&self) -> DisplayControl {
        self.control
    }

    /// Show or hide the display contents (DDRAM is kept)
    pub fn set_display(&mut self, on: bool) -> DisplayResult<I> {
        self.set_display_control(DisplayControl {
            display: on,
            ..self.control
        })
    }

    /// Show or hide the underline cursor
    pub fn set_cursor_visible(&mut self, on: bool) -> DisplayResult<I> {
        self.set_display_control(DisplayControl {
            cursor: on,
            ..self.control
        })
    }

    /// Enable or disable the blinking block cursor
    pub fn set_blink(&mut self, on: bool) -> DisplayResult<I> {
        self.set_display_control(DisplayControl {
            blink: on,
            ..self.control
        })
    }

    fn shift(&mut self, target: ShiftTarget, direction: Direction) -> DisplayResult<I> {
        self.ready_geometry()?;
        self.protocol
            .send_command(Command::Shift(Shift { target, direction }))
    }

    /// Scroll the whole display one cell left
    pub fn scroll_display_left(&mut self) -> DisplayResult<I> {
        self.shift(ShiftTarget::Display, Direction::Left)
    }

    /// Scroll the whole display one cell right
    pub fn scroll_display_right(&mut self) -> DisplayResult<I> {
        self.shift(ShiftTarget::Display, Direction::Right)
    }

    /// Move the cursor one cell left
    pub fn move_cursor_left(&mut self) -> DisplayResult<I> {
        self.shift(ShiftTarget::Cursor, Direction::Left)
    }

    /// Move the cursor one cell right
    pub fn move_cursor_right(&mut self) -> DisplayResult<I> {
        self.shift(ShiftTarget::Cursor, Direction::Right)
    }

    /// Switch the backlight
    ///
    /// Works in any state, including before `begin`.
    pub fn set_backlight(&mut self, on: bool) -> DisplayResult<I> {
        self.protocol.set_backlight(on)
    }

    /// Current backlight state
    pub fn backlight(&self) -> bool {
        self.protocol.backlight()
    }

    /// Lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Geometry stored by `begin`
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the bus interface, delay and handler
    pub fn release(self) -> (I, D, H) {
        self.protocol.release()
    }
}

/// DDRAM address of a cell, saturating out-of-range coordinates
pub fn ddram_address(geometry: Geometry, col: u8, row: u8) -> u8 {
    let row = row.min(geometry.last_row());
    let col = col.min(geometry.last_column());
    ROW_OFFSETS[usize::from(row)] + col
}

impl<I, D, H> core::fmt::Write for Lcd<I, D, H>
where
    I: BusInterface,
    D: DelayNs,
    H: FatalErrorHandler<Error<I>>,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.send_string(s).map_err(|_| core::fmt::Error)
    }
}
