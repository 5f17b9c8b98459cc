//! GPIO pin abstractions
//!
//! The display bus only ever drives lines, so only outputs are modelled.

/// Digital output pin
///
/// Implementations handle the actual hardware register manipulation
/// for the specific chip. Pins on GPIO expanders can fail, hence the
/// associated error type.
pub trait OutputPin {
    /// Error type for pin operations
    type Error;

    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Drive a full low-high-low pulse
    ///
    /// Used for clock and latch strobes, which the chip family samples on
    /// the rising edge.
    fn pulse(&mut self) -> Result<(), Self::Error> {
        self.set_low()?;
        self.set_high()?;
        self.set_low()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    type Error = T::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        T::set_high(self)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        T::set_low(self)
    }
}
