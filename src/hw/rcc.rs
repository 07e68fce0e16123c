// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reset and clock control: peripheral clock gating on the APB2 bus.

use super::reg::{Bus, Register};

pub const RCC_BASE: u32 = 0x4002_1000;

/// APB2 peripheral clock enable register.
pub const APB2ENR: Register = Register::at(RCC_BASE, 0x18);

/// Alternate function I/O.
pub const APB2ENR_AFIOEN: u32 = 1 << 0;
/// GPIO port A.
pub const APB2ENR_IOPAEN: u32 = 1 << 2;
/// USART1.
pub const APB2ENR_USART1EN: u32 = 1 << 14;

/// Gate on the clocks of every APB2 peripheral in `mask`. Other enable bits are left alone.
#[inline]
pub fn enable_apb2<B: Bus>(bus: &mut B, mask: u32) {
    bus.set_bits(APB2ENR, mask);
}

/// Enable GPIOA, AFIO and USART1 so their registers become live.
pub fn enable_usart1_clocks<B: Bus>(bus: &mut B) {
    let mask = APB2ENR_IOPAEN | APB2ENR_USART1EN | APB2ENR_AFIOEN;
    enable_apb2(bus, mask);

    #[cfg(feature = "defmt")]
    defmt::debug!("rcc: APB2ENR |= {=u32:#x}", mask);
}
