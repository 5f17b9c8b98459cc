//! Register map of the MAX7219/MAX7221
//!
//! Only the low nibble of the address byte is decoded by the chip.

/// Digit registers per chip
pub const DIGITS_PER_CHIP: usize = 8;

/// Register addresses
pub mod reg {
    /// No operation, safe to send to any chip
    pub const NOOP: u8 = 0x00;
    /// First digit register (digit 0)
    pub const DIGIT0: u8 = 0x01;
    pub const DIGIT1: u8 = 0x02;
    pub const DIGIT2: u8 = 0x03;
    pub const DIGIT3: u8 = 0x04;
    pub const DIGIT4: u8 = 0x05;
    pub const DIGIT5: u8 = 0x06;
    pub const DIGIT6: u8 = 0x07;
    /// Last digit register (digit 7)
    pub const DIGIT7: u8 = 0x08;
    /// Code-B decode enable, one bit per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// PWM brightness (0x00-0x0F)
    pub const INTENSITY: u8 = 0x0A;
    /// Highest scanned digit (0-7)
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// Shutdown / normal operation
    pub const SHUTDOWN: u8 = 0x0C;
    /// Display test (all segments on)
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Register value flags
pub mod flag {
    /// Decimal point segment
    pub const SEG_DP: u8 = 0x80;
    pub const SEG_A: u8 = 0x40;
    pub const SEG_B: u8 = 0x20;
    pub const SEG_C: u8 = 0x10;
    pub const SEG_D: u8 = 0x08;
    pub const SEG_E: u8 = 0x04;
    pub const SEG_F: u8 = 0x02;
    pub const SEG_G: u8 = 0x01;

    /// DECODE_MODE: every digit raw (no Code-B decoding)
    pub const DECODE_NONE: u8 = 0x00;

    /// SHUTDOWN: chip blanked, register contents kept
    pub const SHUTDOWN_ON: u8 = 0x00;
    /// SHUTDOWN: normal operation
    pub const SHUTDOWN_OFF: u8 = 0x01;

    /// DISPLAY_TEST: all LEDs on
    pub const DISPLAY_TEST_ON: u8 = 0x01;
    /// DISPLAY_TEST: normal operation
    pub const DISPLAY_TEST_OFF: u8 = 0x00;

    /// Highest INTENSITY value
    pub const INTENSITY_MAX: u8 = 0x0F;
    /// Highest SCAN_LIMIT value
    pub const SCAN_LIMIT_MAX: u8 = 0x07;
}

/// Map a raw digit index (0-7) to its register address
pub fn digit_register(raw: u8) -> Option<u8> {
    if (raw as usize) < DIGITS_PER_CHIP {
        Some(reg::DIGIT0 + raw)
    } else {
        None
    }
}

/// One address/value word as latched by a single chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Register address
    pub register: u8,
    /// Value to store
    pub value: u8,
}

impl RegisterWrite {
    /// The word that leaves a chip untouched
    pub const NOOP: Self = Self {
        register: reg::NOOP,
        value: 0x00,
    };

    /// Create a register write
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }

    /// Check whether the chip will ignore this word
    pub fn is_noop(&self) -> bool {
        self.register & 0x0F == reg::NOOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_register_range() {
        assert_eq!(digit_register(0), Some(reg::DIGIT0));
        assert_eq!(digit_register(7), Some(reg::DIGIT7));
        assert_eq!(digit_register(8), None);
    }

    #[test]
    fn test_noop_detection_uses_low_nibble() {
        assert!(RegisterWrite::NOOP.is_noop());
        assert!(RegisterWrite::new(0xF0, 0x55).is_noop());
        assert!(!RegisterWrite::new(reg::DIGIT3, 0x00).is_noop());
    }
}
