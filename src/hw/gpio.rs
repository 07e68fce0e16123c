// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIO port configuration (STM32F1 CRL/CRH layout).
//!
//! Each pin owns one 4-bit group: `MODE[1:0]` in the low half, `CNF[1:0]` in the high half.
//! Pins 0..=7 live in CRL, pins 8..=15 in CRH.

use super::reg::{Bus, Field, Register};

pub const GPIOA_BASE: u32 = 0x4001_0800;

/// Output drive strength (`MODE` bits).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Speed {
    Mhz10 = 0b01,
    Mhz2 = 0b10,
    Mhz50 = 0b11,
}

/// Electrical configuration of one pin.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PinConfig {
    Analog,
    FloatingInput,
    PullInput,
    PushPull(Speed),
    OpenDrain(Speed),
    AlternatePushPull(Speed),
    AlternateOpenDrain(Speed),
}

impl PinConfig {
    /// 4-bit `CNF:MODE` pattern.
    pub const fn bits(self) -> u32 {
        let (cnf, mode) = match self {
            PinConfig::Analog => (0b00, 0b00),
            PinConfig::FloatingInput => (0b01, 0b00),
            PinConfig::PullInput => (0b10, 0b00),
            PinConfig::PushPull(s) => (0b00, s as u32),
            PinConfig::OpenDrain(s) => (0b01, s as u32),
            PinConfig::AlternatePushPull(s) => (0b10, s as u32),
            PinConfig::AlternateOpenDrain(s) => (0b11, s as u32),
        };
        (cnf << 2) | mode
    }
}

/// A GPIO port identified by its base address.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Port {
    base: u32,
}

pub const GPIOA: Port = Port::at(GPIOA_BASE);

impl Port {
    pub const fn at(base: u32) -> Self {
        Self { base }
    }

    /// Port configuration register low (pins 0..=7).
    pub const fn crl(self) -> Register {
        Register::at(self.base, 0x00)
    }

    /// Port configuration register high (pins 8..=15).
    pub const fn crh(self) -> Register {
        Register::at(self.base, 0x04)
    }

    /// Register and nibble governing `pin`.
    pub const fn config_field(self, pin: u8) -> (Register, Field) {
        assert!(pin < 16);
        let reg = if pin < 8 { self.crl() } else { self.crh() };
        (reg, Field::new((pin % 8) * 4, 4))
    }

    /// Reconfigure `pin`, leaving every other pin of the port untouched.
    ///
    /// Done as two accesses, clear then set, following the reference manual's sequence. The port
    /// clock must already be enabled.
    pub fn configure<B: Bus>(self, bus: &mut B, pin: u8, cfg: PinConfig) {
        let (reg, field) = self.config_field(pin);
        bus.clear_bits(reg, field.mask());
        bus.set_bits(reg, field.place(cfg.bits()));

        #[cfg(feature = "defmt")]
        defmt::debug!("gpio: pin {=u8} cfg {=u32:#b}", pin, cfg.bits());
    }
}

/// PA9, the USART1 transmit pin.
pub const USART1_TX_PIN: u8 = 9;

/// Hand PA9 over to USART1: alternate-function push-pull, 50 MHz.
pub fn configure_usart1_tx<B: Bus>(bus: &mut B) {
    GPIOA.configure(
        bus,
        USART1_TX_PIN,
        PinConfig::AlternatePushPull(Speed::Mhz50),
    );
}
