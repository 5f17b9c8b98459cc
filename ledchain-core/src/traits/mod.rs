//! Collaborator traits
//!
//! These traits define the interface between the display logic and the
//! outside world: the wire the chips hang off and the character set.

pub mod bus;
pub mod glyph;

pub use bus::ShiftBus;
pub use glyph::{CodeBGlyphs, GlyphTable};
