// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Typed memory-mapped register access.
//!
//! - [`Register`] names one 32-bit register by its absolute address.
//! - [`Field`] describes a contiguous bit-field inside a register value.
//! - [`Bus`] is the access seam. On the MCU it is implemented by [`Mmio`], which performs
//!   volatile loads and stores; in unit tests it is implemented by a simulated register file.
//!
//! Every access through [`Mmio`] reaches the hardware in program order. Nothing is cached.

use core::sync::atomic::{AtomicBool, Ordering};

/// A fixed-address, 32-bit wide hardware register.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Register {
    addr: u32,
}

impl Register {
    /// Register at `base + offset`.
    pub const fn at(base: u32, offset: u32) -> Self {
        Self {
            addr: base + offset,
        }
    }

    #[inline]
    pub const fn addr(self) -> u32 {
        self.addr
    }
}

/// Bit-field of `width` bits starting at bit `offset`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Field {
    offset: u8,
    width: u8,
}

impl Field {
    pub const fn new(offset: u8, width: u8) -> Self {
        assert!(width > 0 && offset as u32 + width as u32 <= 32);
        Self { offset, width }
    }

    /// Single-bit field.
    pub const fn bit(offset: u8) -> Self {
        Self::new(offset, 1)
    }

    #[inline]
    pub const fn offset(self) -> u8 {
        self.offset
    }

    /// Mask of the field in register position.
    #[inline]
    pub const fn mask(self) -> u32 {
        let low = if self.width == 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        };
        low << self.offset
    }

    /// Extract the field from a register value.
    #[inline]
    pub const fn get(self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.offset
    }

    /// Place `value` into the field position. Excess high bits are dropped.
    #[inline]
    pub const fn place(self, value: u32) -> u32 {
        (value << self.offset) & self.mask()
    }

    /// Return `reg` with the field replaced by `value`.
    #[inline]
    pub const fn set(self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | self.place(value)
    }
}

/// Register access backend.
///
/// Implementations must perform every call as exactly one hardware access, in call order.
pub trait Bus {
    fn read(&mut self, reg: Register) -> u32;

    fn write(&mut self, reg: Register, value: u32);

    /// Read-modify-write.
    #[inline]
    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// OR `mask` into the register, preserving the other bits.
    #[inline]
    fn set_bits(&mut self, reg: Register, mask: u32) {
        self.modify(reg, |r| r | mask);
    }

    /// Clear `mask` in the register, preserving the other bits.
    #[inline]
    fn clear_bits(&mut self, reg: Register, mask: u32) {
        self.modify(reg, |r| r & !mask);
    }

    /// True when every bit of `mask` reads as 1.
    #[inline]
    fn is_set(&mut self, reg: Register, mask: u32) -> bool {
        self.read(reg) & mask == mask
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    #[inline]
    fn read(&mut self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u32) {
        (**self).write(reg, value)
    }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Owned handle to the real memory-mapped peripherals.
///
/// There is at most one `Mmio` per program (see [`Mmio::take`]). All bring-up and transmit code
/// receives it explicitly instead of touching absolute addresses on its own.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Claim the hardware. Returns `None` if it was already claimed.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { _private: () })
        }
    }

    /// Create a handle without claiming it.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other context accesses the same registers concurrently.
    pub unsafe fn steal() -> Self {
        TAKEN.store(true, Ordering::Release);
        Self { _private: () }
    }
}

impl Bus for Mmio {
    #[inline]
    fn read(&mut self, reg: Register) -> u32 {
        // SAFETY: `Register` addresses are peripheral registers of the target MCU and `Mmio`
        // is the single owner of them.
        unsafe { core::ptr::read_volatile(reg.addr() as usize as *const u32) }
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u32) {
        // SAFETY: see `read`.
        unsafe { core::ptr::write_volatile(reg.addr() as usize as *mut u32, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::sim::SimBus;

    const REG: Register = Register::at(0x4000_0000, 0x0C);

    #[test]
    fn register_address_is_base_plus_offset() {
        assert_eq!(REG.addr(), 0x4000_000C);
    }

    #[test]
    fn field_mask_get_set() {
        let f = Field::new(4, 4);
        assert_eq!(f.mask(), 0x0000_00F0);
        assert_eq!(f.get(0x1234_56B7), 0xB);
        assert_eq!(f.set(0xFFFF_FFFF, 0x0), 0xFFFF_FF0F);
        assert_eq!(f.set(0x0000_0000, 0x1B), 0x0000_00B0);
        assert_eq!(Field::new(0, 32).mask(), u32::MAX);
        assert_eq!(Field::bit(13).mask(), 1 << 13);
    }

    #[test]
    fn set_and_clear_bits_preserve_neighbours() {
        let mut bus = SimBus::new();
        bus.poke(REG, 0xA5A5_0000);
        bus.set_bits(REG, 0x0000_0101);
        assert_eq!(bus.peek(REG), 0xA5A5_0101);
        bus.clear_bits(REG, 0x8000_0001);
        assert_eq!(bus.peek(REG), 0x25A5_0100);
    }

    #[test]
    fn is_set_requires_every_bit() {
        let mut bus = SimBus::new();
        bus.poke(REG, 0b0110);
        assert!(bus.is_set(REG, 0b0010));
        assert!(!bus.is_set(REG, 0b0011));
    }

    #[test]
    fn bus_works_through_mutable_reference() {
        fn store<B: Bus>(mut bus: B) {
            bus.write(REG, 7);
        }

        let mut bus = SimBus::new();
        store(&mut bus);
        assert_eq!(bus.peek(REG), 7);
    }

    #[test]
    fn mmio_can_be_taken_once() {
        let first = Mmio::take();
        assert!(first.is_some());
        assert!(Mmio::take().is_none());
    }
}
