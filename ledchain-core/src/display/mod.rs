//! Logical display operations
//!
//! [`ChainDisplay`] owns the bus for the lifetime of a session and maps
//! element-level requests onto chip register writes. Every request is fully
//! validated before the first byte goes out, so caller errors never leave a
//! half-written element behind.

pub mod encode;
pub mod session;

pub use session::ChainDisplay;

use crate::chain::ChainError;
use crate::topology::{IndexOutOfRange, TopologyError};

/// Errors that can occur with display operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The topology could not be used for this chain
    InvalidTopology(TopologyError),
    /// Element, digit or chip index beyond bounds
    IndexOutOfRange,
    /// Operation not supported by the element's mode
    ModeMismatch,
    /// Payload length differs from the element's digit count
    LengthMismatch,
    /// Value outside the register's accepted range
    ValueOutOfRange,
    /// Character missing from the glyph table
    UnsupportedGlyph,
    /// The bus failed
    Bus(E),
}

impl<E> From<ChainError<E>> for DisplayError<E> {
    fn from(e: ChainError<E>) -> Self {
        match e {
            ChainError::IndexOutOfRange => DisplayError::IndexOutOfRange,
            ChainError::ChainTooLong => DisplayError::InvalidTopology(TopologyError::TooManyChips),
            ChainError::Bus(e) => DisplayError::Bus(e),
        }
    }
}

impl<E> From<IndexOutOfRange> for DisplayError<E> {
    fn from(_: IndexOutOfRange) -> Self {
        DisplayError::IndexOutOfRange
    }
}

impl<E> From<TopologyError> for DisplayError<E> {
    fn from(e: TopologyError) -> Self {
        DisplayError::InvalidTopology(e)
    }
}
