//! Display session
//!
//! A session starts with [`ChainDisplay::begin`], which programs every chip,
//! and ends with [`ChainDisplay::end`], which blanks and powers down every
//! chip and hands the bus back. `end` consumes the session, so the power-down
//! happens exactly once and at a point the caller chooses.
//!
//! A failing `begin` or `end` drops the bus it owns. To keep the pins after
//! a bus error, run the session on `&mut bus` instead; `ShiftBus` is
//! implemented for mutable references.

use core::iter;

use heapless::Vec;
use ledchain_protocol::registers::{flag, reg, DIGITS_PER_CHIP};
use ledchain_protocol::MAX_CHIPS;

use super::encode::{bar_pattern, seven_segment_pattern};
use super::DisplayError;
use crate::chain::ChainWriter;
use crate::config::DisplaySettings;
use crate::topology::{DigitAddress, Mode, Topology};
use crate::traits::{CodeBGlyphs, GlyphTable, ShiftBus};

/// Most digits a single element can span
pub const MAX_ELEMENT_DIGITS: usize = MAX_CHIPS * DIGITS_PER_CHIP;

/// A chain of display chips behind a logical display model
pub struct ChainDisplay<B, G = CodeBGlyphs> {
    writer: ChainWriter<B>,
    topology: Topology,
    glyphs: G,
}

impl<B: ShiftBus> ChainDisplay<B, CodeBGlyphs> {
    /// Start a session using the built-in Code-B glyphs
    ///
    /// On error the bus is dropped; pass `&mut bus` to keep it.
    pub fn begin(
        bus: B,
        topology: Topology,
        settings: DisplaySettings,
    ) -> Result<Self, DisplayError<B::Error>> {
        Self::begin_with_glyphs(bus, topology, CodeBGlyphs, settings)
    }
}

impl<B: ShiftBus, G: GlyphTable> ChainDisplay<B, G> {
    /// Start a session with a custom glyph table
    ///
    /// Every chip leaves display test, gets raw (undecoded) digits, the
    /// configured intensity and its topology scan limit. All digits except
    /// those of `Off` elements are cleared before the chips are woken up.
    pub fn begin_with_glyphs(
        bus: B,
        topology: Topology,
        glyphs: G,
        settings: DisplaySettings,
    ) -> Result<Self, DisplayError<B::Error>> {
        if settings.intensity > flag::INTENSITY_MAX {
            return Err(DisplayError::ValueOutOfRange);
        }

        let writer = ChainWriter::new(bus, topology.chip_count())?;
        let mut display = Self {
            writer,
            topology,
            glyphs,
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Starting display chain: {} chips, {} elements",
            display.topology.chip_count(),
            display.topology.element_count()
        );

        display.init(settings)?;
        Ok(display)
    }

    fn init(&mut self, settings: DisplaySettings) -> Result<(), DisplayError<B::Error>> {
        self.writer
            .write_all(reg::DISPLAY_TEST, flag::DISPLAY_TEST_OFF)?;
        self.writer.write_all(reg::DECODE_MODE, flag::DECODE_NONE)?;
        self.writer.write_all(reg::INTENSITY, settings.intensity)?;

        for chip in 0..self.topology.chip_count() {
            let limit = self.topology.scan_limit_of(chip)?;
            self.writer.write_one(chip, reg::SCAN_LIMIT, limit)?;
        }

        for raw in 0..DIGITS_PER_CHIP as u8 {
            let register = reg::DIGIT0 + raw;
            let address = |chip: usize| DigitAddress {
                chip: chip as u8,
                register,
            };

            let chips = self.topology.chip_count();
            if (0..chips).any(|chip| self.topology.is_untouched(address(chip))) {
                for chip in 0..chips {
                    if !self.topology.is_untouched(address(chip)) {
                        self.writer.write_one(chip, register, 0)?;
                    }
                }
            } else {
                self.writer.write_all(register, 0)?;
            }
        }

        self.writer.write_all(reg::SHUTDOWN, flag::SHUTDOWN_OFF)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Display chain ready, intensity {}", settings.intensity);

        Ok(())
    }

    /// End the session
    ///
    /// Clears every digit register on every chip, shuts every chip down and
    /// returns the bus. On error the bus is dropped with the session.
    pub fn end(mut self) -> Result<B, DisplayError<B::Error>> {
        for raw in 0..DIGITS_PER_CHIP as u8 {
            self.writer.write_all(reg::DIGIT0 + raw, 0)?;
        }
        self.writer.write_all(reg::SHUTDOWN, flag::SHUTDOWN_ON)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Display chain shut down");

        Ok(self.writer.into_bus())
    }

    /// The topology this session was started with
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Number of chips in the chain
    pub fn chip_count(&self) -> usize {
        self.topology.chip_count()
    }

    /// Borrow the bus
    pub fn bus(&self) -> &B {
        self.writer.bus()
    }

    fn expect_mode(&self, element: usize, mode: Mode) -> Result<(), DisplayError<B::Error>> {
        if self.topology.mode_of(element)? != mode {
            return Err(DisplayError::ModeMismatch);
        }
        Ok(())
    }

    fn expect_len(&self, element: usize, len: usize) -> Result<(), DisplayError<B::Error>> {
        if self.topology.digit_count_of(element)? != len {
            return Err(DisplayError::LengthMismatch);
        }
        Ok(())
    }

    /// Write already validated values to an element's digits, in order
    fn write_digits<I>(&mut self, element: usize, values: I) -> Result<(), DisplayError<B::Error>>
    where
        I: IntoIterator<Item = u8>,
    {
        let digits = self.topology.digits_of(element)?;
        for (address, value) in digits.iter().zip(values) {
            self.writer
                .write_one(address.chip as usize, address.register, value)?;
        }
        Ok(())
    }

    /// Switch every LED of an element off, whatever its mode
    pub fn clear(&mut self, element: usize) -> Result<(), DisplayError<B::Error>> {
        let count = self.topology.digit_count_of(element)?;
        self.write_digits(element, iter::repeat(0).take(count))
    }

    /// Show the element's "meaningful zero"
    ///
    /// Seven-segment shows `0` on its first digit, a bargraph lights the
    /// lowest bar of its first column and a matrix lights the first pixel of
    /// its first row. Everything else on the element is blanked.
    pub fn zero(&mut self, element: usize) -> Result<(), DisplayError<B::Error>> {
        let first = match self.topology.mode_of(element)? {
            Mode::SevenSegment => seven_segment_pattern(&self.glyphs, b'0')
                .ok_or(DisplayError::UnsupportedGlyph)?,
            Mode::BarGraph => bar_pattern(1, false).ok_or(DisplayError::ValueOutOfRange)?,
            Mode::Matrix => 0x01,
            Mode::Off | Mode::NotConnected => return Err(DisplayError::ModeMismatch),
        };

        let count = self.topology.digit_count_of(element)?;
        self.write_digits(
            element,
            iter::once(first).chain(iter::repeat(0)).take(count),
        )
    }

    /// Show characters on a seven-segment element
    ///
    /// One character per digit, in logical order. Set bit 7 of a character
    /// to light that digit's decimal point.
    pub fn set_seven_segment(
        &mut self,
        element: usize,
        characters: &[u8],
    ) -> Result<(), DisplayError<B::Error>> {
        self.expect_mode(element, Mode::SevenSegment)?;
        self.expect_len(element, characters.len())?;

        let mut patterns: Vec<u8, MAX_ELEMENT_DIGITS> = Vec::new();
        for &character in characters {
            let pattern = seven_segment_pattern(&self.glyphs, character)
                .ok_or(DisplayError::UnsupportedGlyph)?;
            patterns
                .push(pattern)
                .map_err(|_| DisplayError::LengthMismatch)?;
        }

        self.write_digits(element, patterns)
    }

    /// Show column values (0-8) on a bargraph element
    ///
    /// With `dots` set, each column lights a single segment at its value
    /// instead of a bar up to it.
    pub fn set_bargraph(
        &mut self,
        element: usize,
        values: &[u8],
        dots: bool,
    ) -> Result<(), DisplayError<B::Error>> {
        self.expect_mode(element, Mode::BarGraph)?;
        self.expect_len(element, values.len())?;

        let mut patterns: Vec<u8, MAX_ELEMENT_DIGITS> = Vec::new();
        for &value in values {
            let pattern = bar_pattern(value, dots).ok_or(DisplayError::ValueOutOfRange)?;
            patterns
                .push(pattern)
                .map_err(|_| DisplayError::LengthMismatch)?;
        }

        self.write_digits(element, patterns)
    }

    /// Show row pixel masks on a matrix element
    pub fn set_matrix(&mut self, element: usize, rows: &[u8]) -> Result<(), DisplayError<B::Error>> {
        self.expect_mode(element, Mode::Matrix)?;
        self.expect_len(element, rows.len())?;
        self.write_digits(element, rows.iter().copied())
    }

    /// Blank a chip without losing its registers
    pub fn shutdown(&mut self, chip: usize) -> Result<(), DisplayError<B::Error>> {
        Ok(self.writer.write_one(chip, reg::SHUTDOWN, flag::SHUTDOWN_ON)?)
    }

    /// Return a chip to normal operation
    pub fn no_shutdown(&mut self, chip: usize) -> Result<(), DisplayError<B::Error>> {
        Ok(self.writer.write_one(chip, reg::SHUTDOWN, flag::SHUTDOWN_OFF)?)
    }

    /// Light every LED of a chip
    pub fn display_test(&mut self, chip: usize) -> Result<(), DisplayError<B::Error>> {
        Ok(self
            .writer
            .write_one(chip, reg::DISPLAY_TEST, flag::DISPLAY_TEST_ON)?)
    }

    /// Leave display test
    pub fn no_display_test(&mut self, chip: usize) -> Result<(), DisplayError<B::Error>> {
        Ok(self
            .writer
            .write_one(chip, reg::DISPLAY_TEST, flag::DISPLAY_TEST_OFF)?)
    }

    /// Scan digits `0..=limit` on a chip
    ///
    /// Fewer scanned digits means brighter digits; see the datasheet before
    /// going below 3 with high segment currents.
    pub fn set_scan_limit(&mut self, chip: usize, limit: u8) -> Result<(), DisplayError<B::Error>> {
        if limit > flag::SCAN_LIMIT_MAX {
            return Err(DisplayError::ValueOutOfRange);
        }
        Ok(self.writer.write_one(chip, reg::SCAN_LIMIT, limit)?)
    }

    /// Set a chip's brightness (0-15)
    pub fn set_intensity(&mut self, chip: usize, intensity: u8) -> Result<(), DisplayError<B::Error>> {
        if intensity > flag::INTENSITY_MAX {
            return Err(DisplayError::ValueOutOfRange);
        }
        Ok(self.writer.write_one(chip, reg::INTENSITY, intensity)?)
    }
}
