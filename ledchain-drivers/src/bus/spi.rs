//! SPI shift bus
//!
//! MOSI feeds DIN and SCK feeds CLK. LOAD stays a GPIO so the latch is only
//! pulsed after the whole frame has left the shifter.

use ledchain_core::ShiftBus;
use ledchain_hal::{OutputPin, SpiBus, SpiConfig};

/// Error from either half of an SPI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<SpiE, PinE> {
    /// The SPI transfer failed
    Spi(SpiE),
    /// The LOAD pin could not be driven
    Pin(PinE),
    /// The SPI settings are outside what the chips can latch
    UnsupportedConfig,
}

/// Shift bus on a hardware SPI master plus a LOAD pin
pub struct SpiLatchBus<SPI, LOAD> {
    spi: SPI,
    load: LOAD,
    config: SpiConfig,
}

impl<SPI: SpiBus, LOAD: OutputPin> SpiLatchBus<SPI, LOAD> {
    /// Create a bus and drive LOAD to its idle level
    ///
    /// `config` describes how the SPI master has been set up. Anything but
    /// mode 0 at up to [`ledchain_hal::spi::MAX_CLOCK_HZ`] is rejected
    /// before LOAD is touched.
    pub fn new(
        spi: SPI,
        mut load: LOAD,
        config: SpiConfig,
    ) -> Result<Self, BusError<SPI::Error, LOAD::Error>> {
        if !config.is_supported() {
            #[cfg(feature = "defmt")]
            defmt::error!("Unsupported SPI settings for display chain: {}", config);
            return Err(BusError::UnsupportedConfig);
        }
        load.set_low().map_err(BusError::Pin)?;
        Ok(Self { spi, load, config })
    }

    /// SPI settings the bus was created with
    pub fn config(&self) -> SpiConfig {
        self.config
    }

    /// Give the SPI master and pin back
    pub fn release(self) -> (SPI, LOAD) {
        (self.spi, self.load)
    }
}

impl<SPI: SpiBus, LOAD: OutputPin> ShiftBus for SpiLatchBus<SPI, LOAD> {
    type Error = BusError<SPI::Error, LOAD::Error>;

    fn shift_out_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.spi.write(&[value]).map_err(BusError::Spi)
    }

    fn shift_out(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(BusError::Spi)
    }

    fn pulse_latch(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(BusError::Spi)?;
        self.load.pulse().map_err(BusError::Pin)
    }
}
