// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration of the beacon.
//!
//! The reference board runs from the 8 MHz HSI oscillator with no PLL, so PCLK2 (the USART1
//! kernel clock) is 8 MHz.

/// USART1 kernel clock after reset.
pub const PCLK2_HZ: u32 = 8_000_000;

pub const BAUD_RATE: u32 = 9_600;

/// Message sent every period. CR LF is appended on the wire.
pub const MESSAGE: &str = "hellokitty";

/// Busy-wait iterations between messages, roughly one second at 8 MHz.
pub const PERIOD_SPINS: u32 = 800_000;

/// USART frame and clock settings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SerialConfig {
    pub pclk_hz: u32,
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            pclk_hz: PCLK2_HZ,
            baud: BAUD_RATE,
        }
    }
}

/// Everything the main loop needs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BeaconConfig {
    pub serial: SerialConfig,
    pub message: &'static str,
    pub period_spins: u32,
    /// Give up on a byte after this many TXE polls. `None` waits forever.
    pub tx_poll_limit: Option<u32>,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            message: MESSAGE,
            period_spins: PERIOD_SPINS,
            tx_poll_limit: None,
        }
    }
}
