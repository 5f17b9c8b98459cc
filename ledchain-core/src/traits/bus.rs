//! Shift bus trait
//!
//! The chain has no chip select. Implementations only have to move bytes
//! onto the data line and strobe the shared latch.

/// Synchronous bit-serial bus driving a chip chain
///
/// Bytes go out MSB first. Nothing reaches the chips' output registers
/// until [`ShiftBus::pulse_latch`] is called.
pub trait ShiftBus {
    /// Error type for bus operations
    type Error;

    /// Clock one byte onto the data line, MSB first
    fn shift_out_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Toggle LOAD so every chip commits its shift register
    fn pulse_latch(&mut self) -> Result<(), Self::Error>;

    /// Clock a whole frame, in order
    ///
    /// Buses with a hardware shifter can override this to send the frame
    /// in a single transfer.
    fn shift_out(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.shift_out_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: ShiftBus + ?Sized> ShiftBus for &mut T {
    type Error = T::Error;

    fn shift_out_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        T::shift_out_byte(self, value)
    }

    fn pulse_latch(&mut self) -> Result<(), Self::Error> {
        T::pulse_latch(self)
    }

    fn shift_out(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::shift_out(self, bytes)
    }
}
