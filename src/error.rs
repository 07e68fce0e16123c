// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by serial configuration and bounded transmission.

use core::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The baud-rate divisor does not fit BRR (mantissa must be 1..=0xFFF).
    InvalidBaudRate { pclk_hz: u32, baud: u32 },
    /// TXE was not observed within the allowed number of status polls.
    TxTimeout { polls: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidBaudRate { pclk_hz, baud } => {
                write!(f, "baud rate {baud} not reachable from {pclk_hz} Hz")
            }
            Error::TxTimeout { polls } => write!(f, "transmitter not ready after {polls} polls"),
        }
    }
}
