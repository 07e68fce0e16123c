// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART1 transmit-only driver.
//!
//! Brings the peripheral up at a fixed baud rate, 8 data bits, no parity, 1 stop bit, and sends
//! bytes by polling TXE before each write to the data register. There is no receive path and no
//! interrupt use.
//!
//! The blocking calls wait forever if the transmitter never reports ready (clock or pin
//! misconfigured, peripheral absent). Use the `_bounded` variants to get [`Error::TxTimeout`]
//! instead.
//!
//! Note: line endings on the wire are CR LF. `println` appends both.
//!
//! To watch the output on the host, wire PA9 to a USB-serial adapter and use
//! ```text
//! $ screen /dev/ttyUSB0 9600
//! ```

use core::convert::Infallible;
use core::fmt;
use nb::block;

use super::reg::{Bus, Field, Register};
use crate::config::SerialConfig;
use crate::error::Error;

pub const USART1_BASE: u32 = 0x4001_3800;

/// Status register (read-only flags).
pub const SR: Register = Register::at(USART1_BASE, 0x00);
/// Data register. Writing starts a transmission.
pub const DR: Register = Register::at(USART1_BASE, 0x04);
/// Baud-rate divisor.
pub const BRR: Register = Register::at(USART1_BASE, 0x08);
pub const CR1: Register = Register::at(USART1_BASE, 0x0C);
pub const CR2: Register = Register::at(USART1_BASE, 0x10);

/// Transmit data register empty.
pub const SR_TXE: u32 = 1 << 7;
/// Transmission complete.
pub const SR_TC: u32 = 1 << 6;

pub const CR1_UE: u32 = 1 << 13;
/// Word length (0 = 8 data bits).
pub const CR1_M: u32 = 1 << 12;
/// Parity control enable.
pub const CR1_PCE: u32 = 1 << 10;
pub const CR1_TE: u32 = 1 << 3;

/// Stop bits (0b00 = 1 stop bit).
pub const CR2_STOP: Field = Field::new(12, 2);

pub const BRR_MANTISSA: Field = Field::new(4, 12);
pub const BRR_FRACTION: Field = Field::new(0, 4);

/// BRR value for `baud` from a `pclk_hz` kernel clock.
///
/// USARTDIV = pclk / (16 * baud) is stored as a 12.4 fixed-point number. Rounding is done on the
/// x16 value, so a fraction that rounds up to 16 carries into the mantissa.
pub const fn brr(pclk_hz: u32, baud: u32) -> Result<u16, Error> {
    if baud == 0 {
        return Err(Error::InvalidBaudRate { pclk_hz, baud });
    }
    let div_x16 = (pclk_hz as u64 + baud as u64 / 2) / baud as u64;
    if div_x16 < 0x10 || div_x16 > 0xFFFF {
        return Err(Error::InvalidBaudRate { pclk_hz, baud });
    }
    Ok(div_x16 as u16)
}

/// Configured USART1 transmitter. Owns the register bus it was built on.
pub struct Usart<B: Bus> {
    bus: B,
    brr: u16,
}

impl<B: Bus> Usart<B> {
    /// Configure and enable the transmitter.
    ///
    /// GPIOA, AFIO and USART1 clocks must be on and PA9 set to alternate function. Nothing is
    /// written if `cfg` describes an unreachable baud rate.
    pub fn new(mut bus: B, cfg: SerialConfig) -> Result<Self, Error> {
        let brr = brr(cfg.pclk_hz, cfg.baud)?;

        // BRR and frame bits may only change while UE is clear.
        bus.clear_bits(CR1, CR1_UE);
        bus.clear_bits(CR1, CR1_M | CR1_PCE);
        bus.modify(CR2, |r| CR2_STOP.set(r, 0b00));
        bus.write(BRR, brr as u32);
        bus.set_bits(CR1, CR1_TE | CR1_UE);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "usart1: {=u32} baud from {=u32} Hz, BRR={=u16:#x}",
            cfg.baud,
            cfg.pclk_hz,
            brr
        );

        Ok(Self { bus, brr })
    }

    /// Programmed BRR value.
    #[inline]
    pub fn brr(&self) -> u16 {
        self.brr
    }

    /// Write `b` if the data register is empty.
    pub fn try_write_byte(&mut self, b: u8) -> nb::Result<(), Infallible> {
        if self.bus.read(SR) & SR_TXE == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.bus.write(DR, b as u32);
        Ok(())
    }

    /// Wait for TXE, then write `b`. Never returns if TXE never sets.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.try_write_byte(b));
    }

    /// Like [`write_byte`](Self::write_byte) but reads the status register at most `max_polls`
    /// times. On timeout the byte is not written.
    pub fn write_byte_bounded(&mut self, b: u8, max_polls: u32) -> Result<(), Error> {
        for _ in 0..max_polls {
            match self.try_write_byte(b) {
                Ok(()) => return Ok(()),
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(e)) => match e {},
            }
        }
        Err(Error::TxTimeout { polls: max_polls })
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Bounded [`write_str`](Self::write_str). Stops at the first byte that times out.
    pub fn write_str_bounded(&mut self, s: &str, max_polls: u32) -> Result<(), Error> {
        for &b in s.as_bytes() {
            self.write_byte_bounded(b, max_polls)?;
        }
        Ok(())
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn try_flush(&mut self) -> nb::Result<(), Infallible> {
        if self.bus.read(SR) & SR_TC == 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Block until the last frame has left the shift register.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.try_flush());
    }

    pub fn free(self) -> B {
        self.bus
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<B: Bus> fmt::Write for Usart<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
