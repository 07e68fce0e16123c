// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Kitty Beacon Firmware
//!
//! Bare-metal firmware for an STM32F103 that brings up USART1 on PA9 at 9600 8N1 and sends
//! `hellokitty\r\n` roughly once per second, forever.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Register access plus RCC, GPIO, USART1 and delay helpers |
//! | [`beacon`] | Bring-up sequence and the transmit loop |
//! | [`config`] | Clock, baud rate, message and period |
//! | [`error`] | Configuration and bounded-poll errors |
//!
//! All register access goes through the [`hw::Bus`] trait. The firmware binary uses
//! [`hw::Mmio`]; unit tests run on the host against a simulated register file.
//!
//! ## Getting Started
//!
//! Run the unit tests on the host:
//!
//! ```bash
//! cargo test --lib
//! ```
//!
//! Build and flash the board:
//!
//! ```bash
//! cargo build --release --target thumbv7m-none-eabi
//! probe-rs run --chip STM32F103C8 target/thumbv7m-none-eabi/release/kitty-beacon
//! ```
//!
//! Enable RTT diagnostics with `--features defmt`.
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod beacon;
pub mod config;
pub mod error;
pub mod hw;

pub use beacon::Beacon;
pub use error::Error;
