// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The beacon: bring up USART1 once, then send a fixed line forever.
//!
//! [`Beacon::init`] is the only way to obtain a `Beacon`, so the bring-up sequence (clocks, then
//! PA9, then USART1) runs exactly once per handle. [`Beacon::run`] never returns.

use crate::config::BeaconConfig;
use crate::error::Error;
use crate::hw::delay::Pause;
use crate::hw::reg::Bus;
use crate::hw::usart::{self, Usart};
use crate::hw::{gpio, rcc};

pub struct Beacon<B: Bus, P: Pause> {
    usart: Usart<B>,
    pause: P,
    cfg: BeaconConfig,
}

impl<B: Bus, P: Pause> Beacon<B, P> {
    /// Run the bring-up sequence.
    ///
    /// The serial configuration is checked before any register is written.
    pub fn init(mut bus: B, pause: P, cfg: BeaconConfig) -> Result<Self, Error> {
        usart::brr(cfg.serial.pclk_hz, cfg.serial.baud)?;

        rcc::enable_usart1_clocks(&mut bus);
        gpio::configure_usart1_tx(&mut bus);
        let usart = Usart::new(bus, cfg.serial)?;

        Ok(Self { usart, pause, cfg })
    }

    /// One period: send the message and CR LF, then wait.
    ///
    /// With `tx_poll_limit` set, a byte that times out aborts the rest of the line and the error
    /// is returned after the wait.
    pub fn tick(&mut self) -> Result<(), Error> {
        let sent = match self.cfg.tx_poll_limit {
            None => {
                self.usart.println(self.cfg.message);
                Ok(())
            }
            Some(limit) => self
                .usart
                .write_str_bounded(self.cfg.message, limit)
                .and_then(|()| self.usart.write_str_bounded("\r\n", limit)),
        };
        self.pause.pause(self.cfg.period_spins);
        sent
    }

    pub fn run(mut self) -> ! {
        loop {
            if let Err(_e) = self.tick() {
                #[cfg(feature = "defmt")]
                defmt::warn!("beacon: {}", _e);
            }
        }
    }

    pub fn usart(&mut self) -> &mut Usart<B> {
        &mut self.usart
    }

    pub fn free(self) -> (B, P) {
        (self.usart.free(), self.pause)
    }
}
