//! Bit-banged shift bus
//!
//! Drives DIN, CLK and LOAD as plain GPIO. The chips sample DIN on the rising
//! CLK edge and copy the shift register to the outputs on the rising LOAD
//! edge. Both lines idle low.

use ledchain_core::ShiftBus;
use ledchain_hal::OutputPin;

/// Shift bus on three output pins
///
/// All three pins must share one error type, which is also the bus error.
pub struct BitBangBus<DIN, CLK, LOAD> {
    din: DIN,
    clk: CLK,
    load: LOAD,
}

impl<DIN, CLK, LOAD> BitBangBus<DIN, CLK, LOAD>
where
    DIN: OutputPin,
    CLK: OutputPin<Error = DIN::Error>,
    LOAD: OutputPin<Error = DIN::Error>,
{
    /// Create a bus and drive CLK and LOAD to their idle level
    pub fn new(din: DIN, clk: CLK, load: LOAD) -> Result<Self, DIN::Error> {
        let mut bus = Self { din, clk, load };
        bus.clk.set_low()?;
        bus.load.set_low()?;
        Ok(bus)
    }

    /// Give the pins back
    pub fn release(self) -> (DIN, CLK, LOAD) {
        (self.din, self.clk, self.load)
    }
}

impl<DIN, CLK, LOAD> ShiftBus for BitBangBus<DIN, CLK, LOAD>
where
    DIN: OutputPin,
    CLK: OutputPin<Error = DIN::Error>,
    LOAD: OutputPin<Error = DIN::Error>,
{
    type Error = DIN::Error;

    fn shift_out_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        for bit in (0..8).rev() {
            self.din.set_state(value & (1 << bit) != 0)?;
            self.clk.pulse()?;
        }
        Ok(())
    }

    fn pulse_latch(&mut self) -> Result<(), Self::Error> {
        self.load.pulse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock pin counting rising edges
    #[derive(Default)]
    struct MockPin {
        high: bool,
        rising_edges: usize,
        fail: bool,
    }

    impl OutputPin for MockPin {
        type Error = ();

        fn set_high(&mut self) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_new_idles_low() {
        let clk = MockPin {
            high: true,
            ..MockPin::default()
        };
        let load = MockPin {
            high: true,
            ..MockPin::default()
        };
        let bus = BitBangBus::new(MockPin::default(), clk, load).unwrap();
        let (_, clk, load) = bus.release();

        assert!(!clk.high);
        assert!(!load.high);
    }

    #[test]
    fn test_one_clock_per_bit() {
        let mut bus = BitBangBus::new(MockPin::default(), MockPin::default(), MockPin::default())
            .unwrap();
        bus.shift_out(&[0x0C, 0x01]).unwrap();
        bus.pulse_latch().unwrap();

        let (din, clk, load) = bus.release();
        assert_eq!(clk.rising_edges, 16);
        assert_eq!(load.rising_edges, 1);
        // last bit of 0x01 leaves DIN high
        assert!(din.high);
        assert!(!clk.high);
        assert!(!load.high);
    }

    #[test]
    fn test_latch_untouched_while_shifting() {
        let mut bus = BitBangBus::new(MockPin::default(), MockPin::default(), MockPin::default())
            .unwrap();
        bus.shift_out_byte(0xFF).unwrap();

        let (_, _, load) = bus.release();
        assert_eq!(load.rising_edges, 0);
    }

    #[test]
    fn test_pin_error_propagates() {
        let din = MockPin::default();
        let clk = MockPin::default();
        let load = MockPin::default();
        let mut bus = BitBangBus::new(din, clk, load).unwrap();
        bus.din.fail = true;

        assert_eq!(bus.shift_out_byte(0x80), Err(()));
    }
}
