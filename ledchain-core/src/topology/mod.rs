//! Display topology
//!
//! A topology describes how caller-visible display elements decompose into
//! chip digit registers. It is written once as a [`Node`] tree and resolved
//! into a [`Topology`] that answers address lookups in constant time.

pub mod node;
pub mod resolver;

pub use node::{Mode, Node};
pub use resolver::{DigitAddress, IndexOutOfRange, Topology, TopologyError};
