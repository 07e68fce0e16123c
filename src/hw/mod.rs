pub mod delay;
pub mod gpio;
pub mod rcc;
pub mod reg;
pub mod usart;

#[cfg(test)]
pub(crate) mod sim;

pub use delay::{Pause, SpinDelay};
pub use reg::{Bus, Field, Mmio, Register};
pub use usart::Usart;
