//! ledchain Hardware Abstraction Layer
//!
//! This crate defines the pin and SPI traits a display bus is built from.
//! Chip-specific HALs (or the `embedded-hal` adapters in `ledchain-drivers`)
//! implement them, so the same bus code runs on any board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledchain-core (topology, chain writer) │
//! └─────────────────────────────────────────┘
//!                     │ ShiftBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledchain-drivers (bit-bang, SPI+latch) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledchain-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (DIN, CLK, LOAD lines)
//! - [`spi::SpiBus`] - Write-only SPI master

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{Mode, SpiBus, SpiConfig};
