// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay.
//!
//! The spin loop is uncalibrated: its duration depends on core clock, flash wait states and
//! optimization level. For precise timing use a hardware timer (SysTick) instead.

/// Something that can stall the caller for a number of loop iterations.
pub trait Pause {
    fn pause(&mut self, iterations: u32);
}

/// Spin on `nop` for the requested iteration count.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpinDelay;

impl Pause for SpinDelay {
    #[inline]
    fn pause(&mut self, iterations: u32) {
        spin(iterations);
    }
}

/// Execute `iterations` no-op loop turns. The loop is never optimized out.
#[inline(never)]
pub fn spin(iterations: u32) {
    for _ in 0..iterations {
        nop();
    }
}

#[cfg(target_arch = "arm")]
#[inline(always)]
fn nop() {
    cortex_m::asm::nop();
}

#[cfg(not(target_arch = "arm"))]
#[inline(always)]
fn nop() {
    core::hint::spin_loop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_returns() {
        spin(0);
        spin(1_000);
        SpinDelay.pause(10);
    }
}
