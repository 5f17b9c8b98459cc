//! Reference model of a physical chip chain
//!
//! Bytes shifted in enter chip 0 and push older bytes toward the far end of
//! the chain; whatever leaves the last chip is lost. On a latch every chip
//! decodes the 16 bits currently sitting in its own shift register.
//!
//! This is how the hardware behaves, so host tests can check what a write
//! sequence actually does to each chip instead of comparing raw bytes.

use crate::frame::{BYTES_PER_CHIP, MAX_CHIPS, MAX_FRAME_SIZE};
use crate::registers::{reg, RegisterWrite, DIGITS_PER_CHIP};

/// Addressable registers per chip (low nibble of the address byte)
const REGISTER_SPACE: usize = 16;

/// Simulated chain of MAX7219/MAX7221 chips
#[derive(Debug, Clone)]
pub struct ShiftChainModel {
    chips: usize,
    /// shift[2k + 1] is chip k's ADDR byte, shift[2k] its VALUE byte
    shift: [u8; MAX_FRAME_SIZE],
    registers: [[u8; REGISTER_SPACE]; MAX_CHIPS],
    latches: u32,
    bytes_since_latch: usize,
}

impl ShiftChainModel {
    /// Create a model with all registers at their power-on value of zero
    ///
    /// The chain length is clamped to `1..=MAX_CHIPS`.
    pub fn new(chip_count: usize) -> Self {
        Self {
            chips: chip_count.clamp(1, MAX_CHIPS),
            shift: [0u8; MAX_FRAME_SIZE],
            registers: [[0u8; REGISTER_SPACE]; MAX_CHIPS],
            latches: 0,
            bytes_since_latch: 0,
        }
    }

    /// Number of chips in the chain
    pub fn chip_count(&self) -> usize {
        self.chips
    }

    /// Shift one byte into chip 0
    pub fn shift_in(&mut self, byte: u8) {
        let len = self.chips * BYTES_PER_CHIP;
        self.shift.copy_within(0..len - 1, 1);
        self.shift[0] = byte;
        self.bytes_since_latch += 1;
    }

    /// Pulse LOAD: every chip commits its current word
    pub fn latch(&mut self) {
        for chip in 0..self.chips {
            let word = self.pending(chip);
            if !word.is_noop() {
                self.registers[chip][(word.register & 0x0F) as usize] = word.value;
            }
        }
        self.latches += 1;
        self.bytes_since_latch = 0;
    }

    /// Word currently held in a chip's shift register
    pub fn pending(&self, chip: usize) -> RegisterWrite {
        let base = chip * BYTES_PER_CHIP;
        RegisterWrite::new(self.shift[base + 1], self.shift[base])
    }

    /// Latched register value
    pub fn register(&self, chip: usize, register: u8) -> u8 {
        self.registers[chip][(register & 0x0F) as usize]
    }

    /// Latched digit register value by raw index (0-7)
    pub fn digit(&self, chip: usize, raw: u8) -> u8 {
        self.register(chip, reg::DIGIT0 + raw)
    }

    /// All eight digit registers of a chip
    pub fn digits(&self, chip: usize) -> [u8; DIGITS_PER_CHIP] {
        let mut out = [0u8; DIGITS_PER_CHIP];
        for (raw, slot) in out.iter_mut().enumerate() {
            *slot = self.digit(chip, raw as u8);
        }
        out
    }

    /// Number of latch pulses seen
    pub fn latch_count(&self) -> u32 {
        self.latches
    }

    /// Bytes shifted since the last latch
    pub fn bytes_since_latch(&self) -> usize {
        self.bytes_since_latch
    }
}
