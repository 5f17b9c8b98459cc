//! SPI bus abstractions
//!
//! Provides a write-only SPI master trait. The display chips have no data
//! output worth reading back, so transfers are never needed.

/// Highest serial clock the chip family accepts
pub const MAX_CLOCK_HZ: u32 = 10_000_000;

/// SPI bus master
///
/// `write` must clock every byte out MSB first and return once the last
/// bit has left the shift register, so a following latch pulse cannot
/// overtake it.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until all queued words have been shifted out
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    /// Mode 0 at 1 MHz, well inside the chip's timing limits
    fn default() -> Self {
        Self::from_mode(Mode::Mode0, 1_000_000)
    }
}

impl SpiConfig {
    /// Build a configuration from a combined SPI mode
    pub fn from_mode(mode: Mode, frequency: u32) -> Self {
        let (polarity, phase) = mode.into();
        Self {
            frequency,
            polarity,
            phase,
        }
    }

    /// Check the settings against what the chip family can latch
    ///
    /// The chips sample DIN on the rising CLK edge with CLK idling low,
    /// which is mode 0 only.
    pub fn is_supported(&self) -> bool {
        self.frequency > 0
            && self.frequency <= MAX_CLOCK_HZ
            && self.polarity == Polarity::IdleLow
            && self.phase == Phase::CaptureOnFirstTransition
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}
