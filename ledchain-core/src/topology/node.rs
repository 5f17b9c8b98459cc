//! Topology description tree

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the digits of an element are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// 7-segment digits with decimal point
    #[default]
    SevenSegment,
    /// One matrix row per digit register
    Matrix,
    /// One bargraph column per digit register
    BarGraph,
    /// Digits are wired but must not be touched at startup
    Off,
    /// Digits are not wired and are excluded from scanning
    NotConnected,
}

impl Mode {
    /// Name used in text configuration
    pub fn name(self) -> &'static str {
        match self {
            Mode::SevenSegment => "seven_segment",
            Mode::Matrix => "matrix",
            Mode::BarGraph => "bargraph",
            Mode::Off => "off",
            Mode::NotConnected => "not_connected",
        }
    }

    /// Parse a text configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "seven_segment" => Some(Mode::SevenSegment),
            "matrix" => Some(Mode::Matrix),
            "bargraph" => Some(Mode::BarGraph),
            "off" => Some(Mode::Off),
            "not_connected" => Some(Mode::NotConnected),
            _ => None,
        }
    }
}

/// One node of a topology description
///
/// A node is either a container of other nodes or a leaf listing raw digit
/// indices, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// Ordered group of child nodes sharing one mode
    Container {
        /// Display mode of every digit below this node
        mode: Mode,
        /// Children in declaration order
        children: Vec<Node>,
    },
    /// Run of raw digit indices (0-7) on one chip
    Leaf {
        /// Chip the digits belong to
        chip: u8,
        /// Raw digit indices in logical order
        raw: Vec<u8>,
    },
}

/// Raw indices of all eight digits, in order
const FULL_CHIP: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

impl Node {
    /// Container node
    pub fn container(mode: Mode, children: Vec<Node>) -> Self {
        Node::Container { mode, children }
    }

    /// Leaf node
    pub fn leaf(chip: u8, raw: &[u8]) -> Self {
        Node::Leaf {
            chip,
            raw: raw.to_vec(),
        }
    }

    /// Element covering all eight digits of one chip
    pub fn full_chip(mode: Mode, chip: u8) -> Self {
        Node::container(mode, vec![Node::leaf(chip, &FULL_CHIP)])
    }

    /// 8-digit seven-segment element on one chip
    pub fn seven_segment(chip: u8) -> Self {
        Self::full_chip(Mode::SevenSegment, chip)
    }

    /// 8x8 matrix element on one chip
    pub fn matrix(chip: u8) -> Self {
        Self::full_chip(Mode::Matrix, chip)
    }

    /// 8-column bargraph element on one chip
    pub fn bargraph(chip: u8) -> Self {
        Self::full_chip(Mode::BarGraph, chip)
    }

    /// Mode of a container, `None` for leaves
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Node::Container { mode, .. } => Some(*mode),
            Node::Leaf { .. } => None,
        }
    }

    /// Number of digits below this node
    pub fn digit_count(&self) -> usize {
        match self {
            Node::Container { children, .. } => children.iter().map(Node::digit_count).sum(),
            Node::Leaf { raw, .. } => raw.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_span_one_chip() {
        for node in [Node::seven_segment(2), Node::matrix(2), Node::bargraph(2)] {
            assert_eq!(node.digit_count(), 8);
            match &node {
                Node::Container { children, .. } => {
                    assert_eq!(children, &vec![Node::leaf(2, &FULL_CHIP)]);
                }
                Node::Leaf { .. } => panic!("preset must be a container"),
            }
        }
        assert_eq!(Node::matrix(0).mode(), Some(Mode::Matrix));
        assert_eq!(Node::leaf(0, &[1]).mode(), None);
    }

    #[test]
    fn test_nested_digit_count() {
        let node = Node::container(
            Mode::SevenSegment,
            vec![
                Node::leaf(0, &[0, 1, 2]),
                Node::container(Mode::SevenSegment, vec![Node::leaf(0, &[3, 4])]),
            ],
        );
        assert_eq!(node.digit_count(), 5);
    }

    #[test]
    fn test_mode_names() {
        for mode in [
            Mode::SevenSegment,
            Mode::Matrix,
            Mode::BarGraph,
            Mode::Off,
            Mode::NotConnected,
        ] {
            assert_eq!(Mode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(Mode::from_name("segments"), None);
    }
}
