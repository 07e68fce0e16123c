#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

use kitty_beacon::{
    config::BeaconConfig,
    hw::{Mmio, SpinDelay},
    Beacon,
};

#[entry]
fn main() -> ! {
    // Peripherals
    let mmio = Mmio::take().unwrap();

    // Clocks, PA9, USART1 (9600 8N1 from the 8 MHz HSI)
    let beacon = Beacon::init(mmio, SpinDelay, BeaconConfig::default()).unwrap();

    beacon.run()
}
