//! Chain wire protocol for MAX7219/MAX7221 display controllers
//!
//! Every chip in a chain has a 16-bit shift register; DOUT of one chip feeds
//! DIN of the next, and all chips share one LOAD (latch) line. A write is
//! therefore always a whole-chain frame:
//!
//! ```text
//!  shifted first                                    shifted last
//! ┌──────────────┬──────────────┬─────┬──────────────┐
//! │ chip N-1     │ chip N-2     │ ... │ chip 0       │
//! │ ADDR │ VALUE │ ADDR │ VALUE │     │ ADDR │ VALUE │
//! └──────────────┴──────────────┴─────┴──────────────┘
//! ```
//!
//! Chips that must not change receive the no-op word `0x00 0x00`. Pulsing
//! LOAD once commits every chip's word at the same time.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod model;
pub mod registers;

pub use frame::{ChainFrame, FrameError, BYTES_PER_CHIP, MAX_CHIPS, MAX_FRAME_SIZE};
pub use model::ShiftChainModel;
pub use registers::{digit_register, RegisterWrite, DIGITS_PER_CHIP};
