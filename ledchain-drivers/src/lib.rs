//! Shift bus implementations
//!
//! This crate provides concrete implementations of the `ShiftBus` trait
//! defined in ledchain-core:
//!
//! - Bit-banged bus over three GPIO lines (DIN, CLK, LOAD)
//! - Hardware SPI bus with a separate LOAD pin
//! - Adapters from `embedded-hal` 1.0 pins and SPI buses

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod eh;

pub use bus::{BitBangBus, BusError, SpiLatchBus};
pub use eh::{EhPin, EhSpi};
