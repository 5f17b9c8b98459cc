//! Configuration
//!
//! Chain settings and topology description, loadable from postcard binary
//! data (with the `serde` feature) or from a small TOML-like text format.

pub mod text;
pub mod types;

pub use text::parse_config;
pub use types::*;
