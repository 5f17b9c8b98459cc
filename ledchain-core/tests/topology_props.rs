//! Property tests for topology resolution and chain addressing

use std::collections::HashSet;

use ledchain_core::{ChainWriter, Mode, Node, ShiftBus, Topology};
use ledchain_protocol::{ChainFrame, RegisterWrite, DIGITS_PER_CHIP, MAX_CHIPS};
use proptest::prelude::*;

/// Bus collecting the bytes of the most recent frame
#[derive(Default)]
struct FrameBus {
    pending: Vec<u8>,
    frames: Vec<Vec<u8>>,
}

impl ShiftBus for FrameBus {
    type Error = ();

    fn shift_out_byte(&mut self, value: u8) -> Result<(), ()> {
        self.pending.push(value);
        Ok(())
    }

    fn pulse_latch(&mut self) -> Result<(), ()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::SevenSegment),
        Just(Mode::Matrix),
        Just(Mode::BarGraph),
        Just(Mode::Off),
        Just(Mode::NotConnected),
    ]
}

/// Elements filling the chain in order, split into leaves at chip edges
fn elements() -> impl Strategy<Value = (Vec<Node>, usize)> {
    prop::collection::vec((mode(), 1usize..=12), 1..=12).prop_map(|elements| {
        let limit = MAX_CHIPS * DIGITS_PER_CHIP;
        let mut running = 0;
        let mut nodes = Vec::new();

        for (mode, count) in elements {
            let count = count.min(limit - running);
            if count == 0 {
                break;
            }
            let mut leaves = Vec::new();
            let mut remaining = count;
            while remaining > 0 {
                let chip = running / DIGITS_PER_CHIP;
                let first = running % DIGITS_PER_CHIP;
                let take = remaining.min(DIGITS_PER_CHIP - first);
                let raw: Vec<u8> = (first..first + take).map(|r| r as u8).collect();
                leaves.push(Node::leaf(chip as u8, &raw));
                running += take;
                remaining -= take;
            }
            nodes.push(Node::container(mode, leaves));
        }

        (nodes, running)
    })
}

proptest! {
    #[test]
    fn chip_count_covers_every_digit((nodes, total) in elements()) {
        let topology = Topology::build(nodes).unwrap();

        prop_assert_eq!(topology.total_digits(), total);
        prop_assert_eq!(topology.chip_count(), total.div_ceil(DIGITS_PER_CHIP));

        let summed: usize = (0..topology.element_count())
            .map(|e| topology.digit_count_of(e).unwrap())
            .sum();
        prop_assert_eq!(summed, total);
    }

    #[test]
    fn resolved_addresses_are_unique((nodes, total) in elements()) {
        let topology = Topology::build(nodes).unwrap();
        let mut seen = HashSet::new();

        for element in 0..topology.element_count() {
            let count = topology.digit_count_of(element).unwrap();
            for digit in 0..count {
                let address = topology.resolve(element, digit).unwrap();
                prop_assert!((address.chip as usize) < topology.chip_count());
                prop_assert!(address.raw().is_some());
                prop_assert!(seen.insert(address));
            }
            prop_assert!(topology.resolve(element, count).is_err());
        }
        prop_assert_eq!(seen.len(), total);
    }

    #[test]
    fn digit_write_lands_in_its_chip_slot(
        (nodes, _total) in elements(),
        pick in any::<prop::sample::Index>(),
        value in 1u8..=255,
    ) {
        let topology = Topology::build(nodes).unwrap();
        let addresses: Vec<_> = (0..topology.element_count())
            .flat_map(|e| topology.digits_of(e).unwrap().to_vec())
            .collect();
        let address = addresses[pick.index(addresses.len())];

        let mut writer = ChainWriter::new(FrameBus::default(), topology.chip_count()).unwrap();
        writer
            .write_one(address.chip as usize, address.register, value)
            .unwrap();

        let bus = writer.into_bus();
        prop_assert_eq!(bus.frames.len(), 1);
        let frame = ChainFrame::from_bytes(topology.chip_count(), &bus.frames[0]).unwrap();
        for (chip, slot) in frame.slots() {
            if chip == address.chip as usize {
                prop_assert_eq!(slot, RegisterWrite::new(address.register, value));
            } else {
                prop_assert_eq!(slot, RegisterWrite::NOOP);
            }
        }
    }
}
