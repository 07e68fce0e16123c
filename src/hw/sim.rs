// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Simulated register file for host-side unit tests.
//!
//! Registers read as zero until written. Every access is logged in order. The USART1 status
//! register is modelled: TXE and TC read as set unless the transmitter is configured to be busy,
//! and each write to the data register is captured as a transmitted byte.

use std::collections::HashMap;

use super::reg::{Bus, Register};
use super::usart::{DR, SR, SR_TC, SR_TXE};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Access {
    Read(Register, u32),
    Write(Register, u32),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum TxReady {
    /// TXE reads clear for this many polls after every data write (and before the first one).
    After(usize),
    Never,
}

pub struct SimBus {
    regs: HashMap<u32, u32>,
    log: Vec<Access>,
    tx: Vec<u8>,
    ready: TxReady,
    busy_polls: usize,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            regs: HashMap::new(),
            log: Vec::new(),
            tx: Vec::new(),
            ready: TxReady::After(0),
            busy_polls: 0,
        }
    }

    /// Transmitter reports busy for `polls` status reads before each byte.
    pub fn with_tx_latency(mut self, polls: usize) -> Self {
        self.ready = TxReady::After(polls);
        self.busy_polls = polls;
        self
    }

    /// Transmitter never becomes ready.
    pub fn with_stuck_tx(mut self) -> Self {
        self.ready = TxReady::Never;
        self
    }

    /// Set a register without logging the access.
    pub fn poke(&mut self, reg: Register, value: u32) {
        self.regs.insert(reg.addr(), value);
    }

    /// Current register contents without logging the access.
    pub fn peek(&self, reg: Register) -> u32 {
        self.regs.get(&reg.addr()).copied().unwrap_or(0)
    }

    pub fn log(&self) -> &[Access] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.tx.clear();
    }

    /// Bytes written to the USART data register, in order.
    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx
    }

    /// Values written to `reg`, in order.
    pub fn writes_to(&self, reg: Register) -> Vec<u32> {
        self.log
            .iter()
            .filter_map(|a| match *a {
                Access::Write(r, v) if r == reg => Some(v),
                _ => None,
            })
            .collect()
    }

    /// Number of logged reads of `reg`.
    pub fn reads_of(&self, reg: Register) -> usize {
        self.log
            .iter()
            .filter(|a| matches!(a, Access::Read(r, _) if *r == reg))
            .count()
    }

    fn status(&mut self) -> u32 {
        let stored = self.peek(SR) & !(SR_TXE | SR_TC);
        let ready = match self.ready {
            TxReady::Never => false,
            TxReady::After(_) if self.busy_polls > 0 => {
                self.busy_polls -= 1;
                false
            }
            TxReady::After(_) => true,
        };
        if ready {
            stored | SR_TXE | SR_TC
        } else {
            stored
        }
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimBus {
    fn read(&mut self, reg: Register) -> u32 {
        let value = if reg == SR { self.status() } else { self.peek(reg) };
        self.log.push(Access::Read(reg, value));
        value
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.log.push(Access::Write(reg, value));
        if reg == SR {
            return;
        }
        if reg == DR {
            self.tx.push(value as u8);
            if let TxReady::After(n) = self.ready {
                self.busy_polls = n;
            }
        }
        self.regs.insert(reg.addr(), value);
    }
}
