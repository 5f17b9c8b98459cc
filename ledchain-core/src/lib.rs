//! Board-agnostic core of the ledchain display driver
//!
//! This crate turns a logical display model into register writes on a chain
//! of MAX7219/MAX7221 chips:
//!
//! - Collaborator traits (shift bus, glyph table)
//! - Topology resolution (elements → chip/digit-register addresses)
//! - Chain writer (no-op padded frames, one latch per write)
//! - Display operations and the begin/end session
//! - Configuration types and the text configuration parser
//!
//! A typical session:
//!
//! ```ignore
//! let topology = Topology::build(vec![Node::matrix(0), Node::seven_segment(1)])?;
//! let mut display = ChainDisplay::begin(bus, topology, DisplaySettings::default())?;
//! display.set_matrix(0, &[0x18, 0x3C, 0x7E, 0xFF, 0xFF, 0x7E, 0x3C, 0x18])?;
//! display.set_seven_segment(1, b"12345678")?;
//! let bus = display.end()?;
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod chain;
pub mod config;
pub mod display;
pub mod topology;
pub mod traits;

pub use chain::{ChainError, ChainWriter};
pub use config::{parse_config, ChainConfig, ConfigError, DisplaySettings};
pub use display::{ChainDisplay, DisplayError};
pub use topology::{DigitAddress, IndexOutOfRange, Mode, Node, Topology, TopologyError};
pub use traits::{CodeBGlyphs, GlyphTable, ShiftBus};
