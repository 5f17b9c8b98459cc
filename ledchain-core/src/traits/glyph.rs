//! Glyph lookup for seven-segment digits
//!
//! Segment layout: bit 7 = DP, bits 6..0 = segments A..G.
//!
//! ```text
//!    A
//!   ───
//! F│ G │B
//!   ───
//! E│   │C
//!   ───  .DP
//!    D
//! ```

use ledchain_protocol::registers::flag::{
    SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F, SEG_G,
};

/// Character to segment pattern lookup
pub trait GlyphTable {
    /// Segment pattern for a 7-bit character, DP bit clear
    ///
    /// Returns `None` if the character cannot be shown.
    fn segments_for(&self, character: u8) -> Option<u8>;
}

impl<T: GlyphTable + ?Sized> GlyphTable for &T {
    fn segments_for(&self, character: u8) -> Option<u8> {
        T::segments_for(self, character)
    }
}

/// The chip's Code-B character set rendered as raw segments
///
/// Covers `0-9 - E e H h L l P p` and space, the same characters the chip
/// can decode on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeBGlyphs;

impl GlyphTable for CodeBGlyphs {
    fn segments_for(&self, character: u8) -> Option<u8> {
        let segments = match character {
            b'0' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
            b'1' => SEG_B | SEG_C,
            b'2' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
            b'3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
            b'4' => SEG_B | SEG_C | SEG_F | SEG_G,
            b'5' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
            b'6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
            b'7' => SEG_A | SEG_B | SEG_C,
            b'8' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
            b'9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
            b'-' => SEG_G,
            b'E' | b'e' => SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,
            b'H' | b'h' => SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
            b'L' | b'l' => SEG_D | SEG_E | SEG_F,
            b'P' | b'p' => SEG_A | SEG_B | SEG_E | SEG_F | SEG_G,
            b' ' => 0,
            _ => return None,
        };
        Some(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_match_datasheet() {
        let glyphs = CodeBGlyphs;
        assert_eq!(glyphs.segments_for(b'0'), Some(0b0111_1110));
        assert_eq!(glyphs.segments_for(b'1'), Some(0b0011_0000));
        assert_eq!(glyphs.segments_for(b'8'), Some(0b0111_1111));
        assert_eq!(glyphs.segments_for(b'-'), Some(0b0000_0001));
    }

    #[test]
    fn test_letters_case_insensitive() {
        let glyphs = CodeBGlyphs;
        for (upper, lower) in [(b'E', b'e'), (b'H', b'h'), (b'L', b'l'), (b'P', b'p')] {
            assert_eq!(glyphs.segments_for(upper), glyphs.segments_for(lower));
            assert!(glyphs.segments_for(upper).is_some());
        }
    }

    #[test]
    fn test_unsupported_characters() {
        let glyphs = CodeBGlyphs;
        assert_eq!(glyphs.segments_for(b' '), Some(0));
        assert_eq!(glyphs.segments_for(b'A'), None);
        assert_eq!(glyphs.segments_for(b'.'), None);
        assert_eq!(glyphs.segments_for(0x80 | b'1'), None);
    }
}
