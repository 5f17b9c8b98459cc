//! Register value encoding for each display mode

use ledchain_protocol::registers::flag::SEG_DP;

use crate::traits::GlyphTable;

/// Highest bargraph value (all eight segments lit)
pub const BAR_MAX: u8 = 8;

/// Column pattern for a bargraph value
///
/// A bar lights bits `0..value`; a dot lights bit `value - 1` only. Zero is
/// blank in both styles. Returns `None` above [`BAR_MAX`].
pub fn bar_pattern(value: u8, dots: bool) -> Option<u8> {
    match value {
        0 => Some(0),
        1..=BAR_MAX if dots => Some(1 << (value - 1)),
        1..=BAR_MAX => Some(((1u16 << value) - 1) as u8),
        _ => None,
    }
}

/// Digit pattern for a character
///
/// Bit 7 of `character` is the decimal point and is carried over to the
/// pattern; the lower seven bits are looked up in the glyph table.
pub fn seven_segment_pattern<G: GlyphTable + ?Sized>(glyphs: &G, character: u8) -> Option<u8> {
    let segments = glyphs.segments_for(character & !SEG_DP)?;
    Some((segments & !SEG_DP) | (character & SEG_DP))
}
