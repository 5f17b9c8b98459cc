//! Shift bus implementations
//!
//! - Bit-banged: any three output pins, slow but board independent
//! - SPI: hardware shifter for DIN/CLK, GPIO for LOAD

pub mod bitbang;
pub mod spi;

pub use bitbang::BitBangBus;
pub use spi::{BusError, SpiLatchBus};
