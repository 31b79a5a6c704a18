//! 4-bit nibble protocol over the bus expander
//!
//! The expander only gives us four data lines, so every byte reaches the
//! controller as two nibbles, high half first. Each nibble is one
//! [`NibbleFrame`] on the wire, written twice: once with the enable line high
//! and once with it low. The controller samples the data lines on the falling
//! edge.
//!
//! ```text
//! byte  = (nibble & 0xF0) | backlight (0x08) | RS (0x01 data / 0x00 command)
//! write   byte | ENABLE
//! wait    enable settle
//! write   byte & !ENABLE
//! ```

use embedded_hal::delay::DelayNs;
use log::{error, trace};

use crate::command::{
    BACKLIGHT, Command, ENABLE, EXECUTION_TIME_US, NIBBLE_MASK, RS, WRITE_EXECUTION_TIME_US,
};
use crate::config::{Config, MIN_ENABLE_SETTLE_US};
use crate::error::{Error, FatalErrorHandler};
use crate::interface::BusInterface;

type ProtocolResult<I> = core::result::Result<(), Error<I>>;

/// Register selected by a transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Instruction register (RS low)
    Command,
    /// Data register (RS high)
    Data,
}

/// One nibble as it appears on the expander outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NibbleFrame {
    /// Payload in the upper four bits; the lower four are ignored
    pub nibble: u8,
    /// Register select
    pub mode: Mode,
    /// Backlight line
    pub backlight: bool,
}

impl NibbleFrame {
    /// Wire byte with the enable line low
    pub const fn byte(&self) -> u8 {
        let mut byte = self.nibble & NIBBLE_MASK;
        if self.backlight {
            byte |= BACKLIGHT;
        }
        if let Mode::Data = self.mode {
            byte |= RS;
        }
        byte
    }

    /// The two writes that latch this frame: enable high, then enable low
    pub const fn latch_sequence(&self) -> [u8; 2] {
        let byte = self.byte();
        [byte | ENABLE, byte & !ENABLE]
    }
}

/// Byte-level transmitter
///
/// Owns the bus, the delay source and the fatal-error hook. Every bus access
/// goes through [`Protocol::write`], which is the single place failures are
/// reported to the hook.
pub struct Protocol<I, D, H> {
    interface: I,
    delay: D,
    handler: H,
    backlight: bool,
    enable_settle_us: u32,
    command_delay_us: u32,
    data_delay_us: u32,
}

impl<I, D, H> Protocol<I, D, H>
where
    I: BusInterface,
    D: DelayNs,
    H: FatalErrorHandler<Error<I>>,
{
    /// Create a transmitter with timing and backlight taken from `config`
    ///
    /// Timings below the controller's execution times are raised to them.
    pub fn new(interface: I, delay: D, handler: H, config: &Config) -> Self {
        Self {
            interface,
            delay,
            handler,
            backlight: config.backlight,
            enable_settle_us: config.enable_settle_us.max(MIN_ENABLE_SETTLE_US),
            command_delay_us: config.command_delay_us.max(EXECUTION_TIME_US),
            data_delay_us: config.data_delay_us.max(WRITE_EXECUTION_TIME_US),
        }
    }

    /// Write one raw byte to the expander
    ///
    /// On failure the fatal hook runs once and the error is returned.
    pub fn write(&mut self, byte: u8) -> ProtocolResult<I> {
        self.interface.write(byte).map_err(|e| self.fatal(e))
    }

    /// Probe the expander
    ///
    /// Both a device that does not answer ([`Error::NotResponding`]) and a
    /// faulting bus go through the fatal hook like a failed write.
    pub fn probe(&mut self) -> ProtocolResult<I> {
        match self.interface.is_ready() {
            Ok(true) => Ok(()),
            Ok(false) => {
                error!("expander did not acknowledge probe");
                Err(self.report(Error::NotResponding))
            }
            Err(e) => Err(self.fatal(e)),
        }
    }

    fn fatal(&mut self, e: I::Error) -> Error<I> {
        error!("bus failure: {:?}", e);
        self.report(Error::Bus(e))
    }

    fn report(&mut self, error: Error<I>) -> Error<I> {
        self.handler.on_fatal(&error);
        error
    }

    /// Latch one nibble (upper four bits of `nibble`)
    pub fn send_nibble(&mut self, nibble: u8, mode: Mode) -> ProtocolResult<I> {
        let frame = NibbleFrame {
            nibble,
            mode,
            backlight: self.backlight,
        };
        let [high, low] = frame.latch_sequence();
        self.write(high)?;
        self.delay.delay_us(self.enable_settle_us);
        self.write(low)
    }

    /// Send a full byte as two nibbles, high half first
    fn send_byte(&mut self, byte: u8, mode: Mode) -> ProtocolResult<I> {
        self.send_nibble(byte, mode)?;
        self.send_nibble(byte << 4, mode)
    }

    /// Send an instruction and wait for it to execute
    ///
    /// Clear and home wait at least their 1.52ms execution time even when a
    /// shorter instruction delay is configured.
    pub fn send_command(&mut self, command: Command) -> ProtocolResult<I> {
        let byte = command.encode();
        trace!("command {:#04x} ({:?})", byte, command);
        self.send_byte(byte, Mode::Command)?;
        self.delay
            .delay_us(self.command_delay_us.max(command.execution_time_us()));
        Ok(())
    }

    /// Send one character code and wait for it to be stored
    pub fn send_data(&mut self, byte: u8) -> ProtocolResult<I> {
        self.send_byte(byte, Mode::Data)?;
        self.delay.delay_us(self.data_delay_us);
        Ok(())
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Switch the backlight line
    ///
    /// Takes effect on the next write; one write with all other lines low is
    /// issued so the change is visible right away.
    pub fn set_backlight(&mut self, on: bool) -> ProtocolResult<I> {
        self.backlight = on;
        self.write(if on { BACKLIGHT } else { 0x00 })
    }

    /// Current backlight state
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Give back the bus, delay and hook
    pub fn release(self) -> (I, D, H) {
        (self.interface, self.delay, self.handler)
    }
}

#[cfg(test)]
impl<I, D, H> Protocol<I, D, H> {
    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }
}
