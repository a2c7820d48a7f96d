//! MCP23S17 16-bit SPI port expander
//!
//! Every register access is one 3-byte frame with chip select held for the
//! whole frame:
//!
//! ```text
//! write: [0x40, register, value]
//! read:  [0x41, register, 0x00]  -> value arrives in the third byte
//! ```
//!
//! The opcode carries the fixed device address 0b0100_000 (A2..A0 = 0) and
//! the R/W bit. The bus runs in SPI mode 1 at up to 10 MHz; the drive uses
//! 1 MHz.
//!
//! Phase GPIO `n` maps to bit `n % 8` of port A (`n < 8`) or port B
//! (`8 <= n < 16`). Only a forward-energized phase sets its bit; reverse and
//! off both leave it clear. The winding pair that is active, not an H-bridge
//! polarity bit, sets the rotation sense.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use embedded_hal_async::delay::DelayNs;
use pentastep_core::config::EXPANDER_LINES;
use pentastep_core::pattern::{PhaseRow, PhaseState, PHASE_COUNT};

/// MCP23S17 register addresses (IOCON.BANK = 0)
pub mod reg {
    /// Port A direction (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// Port B direction (1 = input)
    pub const IODIRB: u8 = 0x01;
    /// Port A levels
    pub const GPIOA: u8 = 0x12;
    /// Port B levels
    pub const GPIOB: u8 = 0x13;
}

/// Write opcode for hardware address 0
pub const OPCODE_WRITE: u8 = 0x40;

/// Read opcode for hardware address 0
pub const OPCODE_READ: u8 = 0x41;

/// Time the reset line is held in each state during bring-up (ms)
pub const RESET_HOLD_MS: u32 = 20;

/// Build a register write frame
pub const fn build_write_frame(register: u8, value: u8) -> [u8; 3] {
    [OPCODE_WRITE, register, value]
}

/// Build a register read frame
pub const fn build_read_frame(register: u8) -> [u8; 3] {
    [OPCODE_READ, register, 0x00]
}

/// Extract the register value from a completed read frame
pub const fn parse_read_response(response: &[u8; 3]) -> u8 {
    response[2]
}

/// Expander communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError<E> {
    /// SPI transfer failed
    Bus(E),
}

/// Output levels of both 8-bit ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortBytes {
    /// Port A (GPIOA), lines 0-7
    pub low: u8,
    /// Port B (GPIOB), lines 8-15
    pub high: u8,
}

impl PortBytes {
    /// Compose port levels for a pattern row
    ///
    /// `phases[i]` is the expander line for table column `i`. Lines past the
    /// expander range are skipped; the board pin map rejects them up front.
    pub fn from_row(row: &PhaseRow, phases: &[u8; PHASE_COUNT]) -> Self {
        let mut ports = Self::default();
        for (state, &line) in row.iter().zip(phases) {
            if *state != PhaseState::Forward || line >= EXPANDER_LINES {
                continue;
            }
            if line < 8 {
                ports.low |= 1 << line;
            } else {
                ports.high |= 1 << (line - 8);
            }
        }
        ports
    }

    /// Both ports as one 16-bit word (port B in the upper byte)
    pub const fn as_u16(&self) -> u16 {
        ((self.high as u16) << 8) | self.low as u16
    }
}

/// Port levels written and then read back in one push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readback {
    /// Levels sent to the expander
    pub written: PortBytes,
    /// Levels the expander reported afterwards
    pub read: PortBytes,
}

impl Readback {
    /// Check if the expander holds what was written
    pub fn is_verified(&self) -> bool {
        self.written == self.read
    }
}

/// MCP23S17 driver over an SPI device
///
/// The device handles chip select; each method issues whole frames.
pub struct Mcp23s17<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp23s17<SPI> {
    /// Wrap an SPI device
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Write one register
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), ExpanderError<SPI::Error>> {
        self.spi
            .write(&build_write_frame(register, value))
            .map_err(ExpanderError::Bus)
    }

    /// Read one register
    pub fn read_register(&mut self, register: u8) -> Result<u8, ExpanderError<SPI::Error>> {
        let mut frame = build_read_frame(register);
        self.spi
            .transfer_in_place(&mut frame)
            .map_err(ExpanderError::Bus)?;
        Ok(parse_read_response(&frame))
    }

    /// Configure all 16 lines as outputs
    pub fn configure_outputs(&mut self) -> Result<(), ExpanderError<SPI::Error>> {
        self.write_register(reg::IODIRA, 0x00)?;
        self.write_register(reg::IODIRB, 0x00)
    }

    /// Set the levels of both ports
    pub fn write_ports(&mut self, ports: PortBytes) -> Result<(), ExpanderError<SPI::Error>> {
        self.write_register(reg::GPIOA, ports.low)?;
        self.write_register(reg::GPIOB, ports.high)
    }

    /// Read the levels of both ports
    pub fn read_ports(&mut self) -> Result<PortBytes, ExpanderError<SPI::Error>> {
        let low = self.read_register(reg::GPIOA)?;
        let high = self.read_register(reg::GPIOB)?;
        Ok(PortBytes { low, high })
    }

    /// Write both ports, then read them back
    ///
    /// A read-back that differs from the written value is not an error;
    /// check [`Readback::is_verified`].
    pub fn push(&mut self, ports: PortBytes) -> Result<Readback, ExpanderError<SPI::Error>> {
        self.write_ports(ports)?;
        let read = self.read_ports()?;
        Ok(Readback {
            written: ports,
            read,
        })
    }
}

/// Pulse the expander reset line
///
/// Drives the line high, low, then high again, holding each state for
/// [`RESET_HOLD_MS`]. The expander registers are at their power-on values
/// afterwards (all lines inputs).
pub async fn hardware_reset<P, D>(pin: &mut P, delay: &mut D) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    pin.set_high()?;
    delay.delay_ms(RESET_HOLD_MS).await;
    pin.set_low()?;
    delay.delay_ms(RESET_HOLD_MS).await;
    pin.set_high()?;
    delay.delay_ms(RESET_HOLD_MS).await;
    Ok(())
}
