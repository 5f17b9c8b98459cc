//! embedded-hal 1.0 adapters
//!
//! Wrap a board's `embedded-hal` pin or SPI bus so it can drive a
//! [`BitBangBus`](crate::BitBangBus) or [`SpiLatchBus`](crate::SpiLatchBus).

use embedded_hal::digital;
use embedded_hal::spi;

/// An `embedded-hal` output pin used as a ledchain pin
#[derive(Debug)]
pub struct EhPin<P>(pub P);

impl<P: digital::OutputPin> ledchain_hal::OutputPin for EhPin<P> {
    type Error = P::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }
}

/// An `embedded-hal` SPI bus used as a ledchain SPI master
#[derive(Debug)]
pub struct EhSpi<S>(pub S);

impl<S: spi::SpiBus<u8>> ledchain_hal::SpiBus for EhSpi<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}
