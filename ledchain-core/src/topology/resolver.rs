//! Topology resolution
//!
//! One depth-first pass over the description assigns every leaf digit a
//! running address in declaration order. The chip of a digit is its running
//! address divided by eight, so chips fill up in chain order and a chain of
//! N chips always spans `8 * (N - 1) + 1 ..= 8 * N` digits.

use alloc::vec;
use alloc::vec::Vec;

use ledchain_protocol::registers::{digit_register, reg, DIGITS_PER_CHIP};
use ledchain_protocol::MAX_CHIPS;

use super::node::{Mode, Node};

/// Reasons a topology description is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopologyError {
    /// No elements at all
    Empty,
    /// An element spans no digits
    EmptyElement,
    /// A top-level element is a bare leaf (no mode)
    LeafElement,
    /// A leaf names a raw digit index above 7
    DigitIndex,
    /// A leaf's digits do not fall on the chip it declares
    ChipSpan,
    /// A raw digit is used twice on the same chip
    DuplicateDigit,
    /// A nested container's mode differs from its element's mode
    ModeConflict,
    /// More than MAX_CHIPS chips referenced
    TooManyChips,
}

/// An element, digit or chip index beyond the topology's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndexOutOfRange;

/// Absolute location of one digit register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitAddress {
    /// Chip index, 0 nearest the controller
    pub chip: u8,
    /// Register address (DIGIT0..=DIGIT7)
    pub register: u8,
}

impl DigitAddress {
    /// Raw digit index (0-7) on the chip
    ///
    /// `None` if `register` is not one of the digit registers.
    pub fn raw(&self) -> Option<u8> {
        self.register
            .checked_sub(reg::DIGIT0)
            .filter(|raw| (*raw as usize) < DIGITS_PER_CHIP)
    }
}

/// Resolved data of one element
#[derive(Debug, Clone)]
struct Element {
    mode: Mode,
    digits: Vec<DigitAddress>,
}

/// A validated, immutable topology
#[derive(Debug, Clone)]
pub struct Topology {
    elements: Vec<Element>,
    chips: usize,
    total_digits: usize,
    /// Per chip, digits belonging to `Off` elements
    untouched: Vec<u8>,
    /// Per chip, highest raw digit that is scanned
    scan_limits: Vec<u8>,
}

impl Default for Topology {
    /// One chip, one 8-digit seven-segment element
    fn default() -> Self {
        let digits = (0..DIGITS_PER_CHIP as u8)
            .map(|raw| DigitAddress {
                chip: 0,
                register: reg::DIGIT0 + raw,
            })
            .collect();

        Self {
            elements: vec![Element {
                mode: Mode::SevenSegment,
                digits,
            }],
            chips: 1,
            total_digits: DIGITS_PER_CHIP,
            untouched: vec![0],
            scan_limits: vec![(DIGITS_PER_CHIP - 1) as u8],
        }
    }
}

/// Depth-first walk state
struct Walk {
    running: usize,
    used: [u8; MAX_CHIPS],
}

impl Walk {
    fn visit(
        &mut self,
        node: &Node,
        mode: Mode,
        out: &mut Vec<DigitAddress>,
    ) -> Result<(), TopologyError> {
        match node {
            Node::Container {
                mode: node_mode,
                children,
            } => {
                if *node_mode != mode {
                    return Err(TopologyError::ModeConflict);
                }
                for child in children {
                    self.visit(child, mode, out)?;
                }
                Ok(())
            }
            Node::Leaf { chip, raw } => {
                for &index in raw {
                    let register = digit_register(index).ok_or(TopologyError::DigitIndex)?;

                    let slot_chip = self.running / DIGITS_PER_CHIP;
                    if slot_chip >= MAX_CHIPS {
                        return Err(TopologyError::TooManyChips);
                    }
                    if slot_chip != *chip as usize {
                        return Err(TopologyError::ChipSpan);
                    }

                    let mask = 1u8 << index;
                    if self.used[slot_chip] & mask != 0 {
                        return Err(TopologyError::DuplicateDigit);
                    }
                    self.used[slot_chip] |= mask;
                    self.running += 1;

                    out.push(DigitAddress {
                        chip: *chip,
                        register,
                    });
                }
                Ok(())
            }
        }
    }
}

impl Topology {
    /// Validate and flatten a description
    ///
    /// `elements` are the children of the implicit root; each must be a
    /// container, and its position is the element index used by every
    /// lookup.
    ///
    /// Digits fill chips in declaration order, eight per chip, and every
    /// leaf must name the chip its digits land on. A chip that is only
    /// partly used and is not the last one in the chain needs its unused
    /// digits declared as an `Off` or `NotConnected` element, otherwise the
    /// next chip's leaves report `ChipSpan`.
    pub fn build(elements: Vec<Node>) -> Result<Self, TopologyError> {
        if elements.is_empty() {
            return Err(TopologyError::Empty);
        }

        let mut walk = Walk {
            running: 0,
            used: [0u8; MAX_CHIPS],
        };
        let mut resolved = Vec::with_capacity(elements.len());

        for node in &elements {
            let mode = node.mode().ok_or(TopologyError::LeafElement)?;
            let mut digits = Vec::with_capacity(node.digit_count());
            walk.visit(node, mode, &mut digits)?;
            if digits.is_empty() {
                return Err(TopologyError::EmptyElement);
            }
            resolved.push(Element { mode, digits });
        }

        let total_digits = walk.running;
        let chips = total_digits.div_ceil(DIGITS_PER_CHIP);

        let mut untouched = vec![0u8; chips];
        let mut scanned: Vec<Option<u8>> = vec![None; chips];
        for element in &resolved {
            for digit in &element.digits {
                let chip = digit.chip as usize;
                let Some(raw) = digit.raw() else { continue };
                match element.mode {
                    Mode::Off => {
                        untouched[chip] |= 1 << raw;
                        scanned[chip] = scanned[chip].max(Some(raw));
                    }
                    Mode::NotConnected => {}
                    _ => scanned[chip] = scanned[chip].max(Some(raw)),
                }
            }
        }
        let scan_limits = scanned.into_iter().map(|s| s.unwrap_or(0)).collect();

        Ok(Self {
            elements: resolved,
            chips,
            total_digits,
            untouched,
            scan_limits,
        })
    }

    /// Number of chips in the chain
    pub fn chip_count(&self) -> usize {
        self.chips
    }

    /// Number of caller-visible elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Total digits referenced by the description
    pub fn total_digits(&self) -> usize {
        self.total_digits
    }

    fn element(&self, element: usize) -> Result<&Element, IndexOutOfRange> {
        self.elements.get(element).ok_or(IndexOutOfRange)
    }

    /// Digits spanned by an element
    pub fn digit_count_of(&self, element: usize) -> Result<usize, IndexOutOfRange> {
        Ok(self.element(element)?.digits.len())
    }

    /// Mode of an element
    pub fn mode_of(&self, element: usize) -> Result<Mode, IndexOutOfRange> {
        Ok(self.element(element)?.mode)
    }

    /// Absolute address of an element's `logical_digit`-th digit
    pub fn resolve(
        &self,
        element: usize,
        logical_digit: usize,
    ) -> Result<DigitAddress, IndexOutOfRange> {
        self.element(element)?
            .digits
            .get(logical_digit)
            .copied()
            .ok_or(IndexOutOfRange)
    }

    /// All addresses of an element in logical order
    pub fn digits_of(&self, element: usize) -> Result<&[DigitAddress], IndexOutOfRange> {
        Ok(&self.element(element)?.digits)
    }

    /// Highest raw digit the chip should scan
    ///
    /// `NotConnected` digits do not count; a chip with nothing to scan
    /// reports 0, the smallest limit the chip accepts.
    pub fn scan_limit_of(&self, chip: usize) -> Result<u8, IndexOutOfRange> {
        self.scan_limits.get(chip).copied().ok_or(IndexOutOfRange)
    }

    /// Whether a digit belongs to an `Off` element
    ///
    /// Addresses off the chain or outside the digit registers are never
    /// untouched.
    pub fn is_untouched(&self, address: DigitAddress) -> bool {
        let Some(raw) = address.raw() else {
            return false;
        };
        self.untouched
            .get(address.chip as usize)
            .is_some_and(|mask| mask & (1 << raw) != 0)
    }
}
