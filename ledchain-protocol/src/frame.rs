//! Chain frame encoding and decoding.
//!
//! Frame format for a chain of N chips:
//! - 2 * N bytes, one ADDR/VALUE pair per chip
//! - pair 0 belongs to chip N-1 (farthest from the controller)
//! - pair N-1 belongs to chip 0 (nearest, shifted in last)
//!
//! Frames live on the stack; there is no shared buffer between writes.

use crate::registers::RegisterWrite;

/// Longest supported chain
pub const MAX_CHIPS: usize = 16;

/// Bytes each chip consumes from a frame
pub const BYTES_PER_CHIP: usize = 2;

/// Largest frame in bytes
pub const MAX_FRAME_SIZE: usize = MAX_CHIPS * BYTES_PER_CHIP;

/// Errors that can occur while building or decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Chain is empty or longer than MAX_CHIPS
    ChainTooLong,
    /// Addressed chip is not part of the chain
    ChipOutOfRange,
    /// Byte count does not match the chain length
    LengthMismatch,
}

/// A complete frame for one latch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainFrame {
    bytes: [u8; MAX_FRAME_SIZE],
    chips: u8,
}

impl ChainFrame {
    /// A frame of no-ops for every chip
    pub fn noop(chip_count: usize) -> Result<Self, FrameError> {
        if chip_count == 0 || chip_count > MAX_CHIPS {
            return Err(FrameError::ChainTooLong);
        }

        Ok(Self {
            bytes: [0u8; MAX_FRAME_SIZE],
            chips: chip_count as u8,
        })
    }

    /// A frame addressing exactly one chip
    ///
    /// Every other slot carries the no-op word.
    pub fn single(chip_count: usize, chip: usize, write: RegisterWrite) -> Result<Self, FrameError> {
        let mut frame = Self::noop(chip_count)?;
        frame.set(chip, write)?;
        Ok(frame)
    }

    /// A frame carrying the same word to every chip
    pub fn broadcast(chip_count: usize, write: RegisterWrite) -> Result<Self, FrameError> {
        let mut frame = Self::noop(chip_count)?;
        for chip in 0..chip_count {
            frame.set(chip, write)?;
        }
        Ok(frame)
    }

    /// Decode a frame captured from the bus
    pub fn from_bytes(chip_count: usize, bytes: &[u8]) -> Result<Self, FrameError> {
        let mut frame = Self::noop(chip_count)?;
        if bytes.len() != chip_count * BYTES_PER_CHIP {
            return Err(FrameError::LengthMismatch);
        }
        frame.bytes[..bytes.len()].copy_from_slice(bytes);
        Ok(frame)
    }

    /// Number of chips this frame spans
    pub fn chip_count(&self) -> usize {
        self.chips as usize
    }

    /// Byte offset of a chip's pair inside the frame
    ///
    /// The farthest chip is shifted first, so chip indices run backwards.
    pub fn slot_offset(&self, chip: usize) -> Result<usize, FrameError> {
        if chip >= self.chip_count() {
            return Err(FrameError::ChipOutOfRange);
        }
        Ok((self.chip_count() - 1 - chip) * BYTES_PER_CHIP)
    }

    /// Place a word in a chip's slot
    pub fn set(&mut self, chip: usize, write: RegisterWrite) -> Result<(), FrameError> {
        let offset = self.slot_offset(chip)?;
        self.bytes[offset] = write.register;
        self.bytes[offset + 1] = write.value;
        Ok(())
    }

    /// Word carried to a chip
    pub fn write_for(&self, chip: usize) -> Result<RegisterWrite, FrameError> {
        let offset = self.slot_offset(chip)?;
        Ok(RegisterWrite::new(self.bytes[offset], self.bytes[offset + 1]))
    }

    /// Iterate over `(chip, word)` pairs, chip 0 first
    pub fn slots(&self) -> impl Iterator<Item = (usize, RegisterWrite)> + '_ {
        (0..self.chip_count()).filter_map(move |chip| self.write_for(chip).ok().map(|w| (chip, w)))
    }

    /// Bytes in shift order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.chip_count() * BYTES_PER_CHIP]
    }
}
