//! Chain writer
//!
//! The chips share one shift register line and one latch, with no chip
//! select. Addressing chip K means shifting its word into K's position, the
//! no-op word into every other position, and latching once. Nothing else may
//! reach the bus between the first shifted byte and the latch; `&mut self`
//! on every write keeps it that way inside one program.

use ledchain_protocol::{ChainFrame, FrameError, RegisterWrite, MAX_CHIPS};

use crate::traits::ShiftBus;

/// Errors that can occur while writing to the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainError<E> {
    /// Chip index beyond the chain
    IndexOutOfRange,
    /// Chain length is zero or above MAX_CHIPS
    ChainTooLong,
    /// The bus failed mid-frame
    Bus(E),
}

impl<E> From<FrameError> for ChainError<E> {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::ChainTooLong => ChainError::ChainTooLong,
            FrameError::ChipOutOfRange | FrameError::LengthMismatch => ChainError::IndexOutOfRange,
        }
    }
}

/// Writes registers on individual chips of a chain
#[derive(Debug)]
pub struct ChainWriter<B> {
    bus: B,
    chips: usize,
}

impl<B: ShiftBus> ChainWriter<B> {
    /// Create a writer for a chain of `chip_count` chips
    pub fn new(bus: B, chip_count: usize) -> Result<Self, ChainError<B::Error>> {
        if chip_count == 0 || chip_count > MAX_CHIPS {
            return Err(ChainError::ChainTooLong);
        }
        Ok(Self {
            bus,
            chips: chip_count,
        })
    }

    /// Number of chips in the chain
    pub fn chip_count(&self) -> usize {
        self.chips
    }

    /// Write one register on one chip
    ///
    /// The frame carries `(register, value)` in `chip`'s slot and no-ops
    /// everywhere else.
    pub fn write_one(
        &mut self,
        chip: usize,
        register: u8,
        value: u8,
    ) -> Result<(), ChainError<B::Error>> {
        let frame = ChainFrame::single(self.chips, chip, RegisterWrite::new(register, value))?;
        self.send(&frame)
    }

    /// Write several registers on one chip, one frame each
    ///
    /// Writes are issued in order. A bus failure leaves earlier writes
    /// committed.
    pub fn write_many<I>(&mut self, chip: usize, writes: I) -> Result<(), ChainError<B::Error>>
    where
        I: IntoIterator<Item = RegisterWrite>,
    {
        if chip >= self.chips {
            return Err(ChainError::IndexOutOfRange);
        }
        for write in writes {
            let frame = ChainFrame::single(self.chips, chip, write)?;
            self.send(&frame)?;
        }
        Ok(())
    }

    /// Write the same register on every chip with a single latch
    pub fn write_all(&mut self, register: u8, value: u8) -> Result<(), ChainError<B::Error>> {
        let frame = ChainFrame::broadcast(self.chips, RegisterWrite::new(register, value))?;
        self.send(&frame)
    }

    fn send(&mut self, frame: &ChainFrame) -> Result<(), ChainError<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("chain frame: {=[u8]:x}", frame.as_bytes());

        self.bus.shift_out(frame.as_bytes()).map_err(ChainError::Bus)?;
        self.bus.pulse_latch().map_err(ChainError::Bus)
    }

    /// Borrow the bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Give the bus back
    pub fn into_bus(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use ledchain_protocol::registers::reg;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum BusEvent {
        Byte(u8),
        Latch,
    }

    /// Bus recording every call, optionally failing after N bytes
    #[derive(Default)]
    struct RecordingBus {
        events: Vec<BusEvent>,
        fail_after: Option<usize>,
    }

    impl ShiftBus for RecordingBus {
        type Error = ();

        fn shift_out_byte(&mut self, value: u8) -> Result<(), ()> {
            let sent = self.events.iter().filter(|e| matches!(e, BusEvent::Byte(_))).count();
            if self.fail_after == Some(sent) {
                return Err(());
            }
            self.events.push(BusEvent::Byte(value));
            Ok(())
        }

        fn pulse_latch(&mut self) -> Result<(), ()> {
            self.events.push(BusEvent::Latch);
            Ok(())
        }
    }

    #[test]
    fn test_write_one_sequence() {
        let mut writer = ChainWriter::new(RecordingBus::default(), 2).unwrap();
        writer.write_one(0, reg::DIGIT0, 0xFF).unwrap();

        assert_eq!(
            writer.bus().events,
            [
                BusEvent::Byte(0x00),
                BusEvent::Byte(0x00),
                BusEvent::Byte(reg::DIGIT0),
                BusEvent::Byte(0xFF),
                BusEvent::Latch,
            ]
        );
    }

    #[test]
    fn test_write_one_chip_out_of_range() {
        let mut writer = ChainWriter::new(RecordingBus::default(), 2).unwrap();
        let result = writer.write_one(2, reg::DIGIT0, 0xFF);

        assert_eq!(result, Err(ChainError::IndexOutOfRange));
        assert!(writer.bus().events.is_empty());
    }

    #[test]
    fn test_write_many_one_frame_per_pair() {
        let mut writer = ChainWriter::new(RecordingBus::default(), 3).unwrap();
        let writes = [
            RegisterWrite::new(reg::DIGIT0, 1),
            RegisterWrite::new(reg::DIGIT1, 2),
        ];
        writer.write_many(1, writes).unwrap();

        let events = &writer.bus().events;
        assert_eq!(events.len(), 2 * (6 + 1));
        assert_eq!(events[6], BusEvent::Latch);
        // chip 1 sits in the middle slot of a 3-chip frame
        assert_eq!(events[2], BusEvent::Byte(reg::DIGIT0));
        assert_eq!(events[7 + 2], BusEvent::Byte(reg::DIGIT1));
    }

    #[test]
    fn test_write_many_keeps_earlier_writes_on_failure() {
        let bus = RecordingBus {
            events: Vec::new(),
            fail_after: Some(3),
        };
        let mut writer = ChainWriter::new(bus, 1).unwrap();
        let writes = [
            RegisterWrite::new(reg::DIGIT0, 1),
            RegisterWrite::new(reg::DIGIT1, 2),
        ];

        assert_eq!(writer.write_many(0, writes), Err(ChainError::Bus(())));
        let latches = writer.bus().events.iter().filter(|e| **e == BusEvent::Latch).count();
        assert_eq!(latches, 1);
    }

    #[test]
    fn test_write_all_single_latch() {
        let mut writer = ChainWriter::new(RecordingBus::default(), 2).unwrap();
        writer.write_all(reg::SHUTDOWN, 0x00).unwrap();

        assert_eq!(
            writer.bus().events,
            [
                BusEvent::Byte(reg::SHUTDOWN),
                BusEvent::Byte(0x00),
                BusEvent::Byte(reg::SHUTDOWN),
                BusEvent::Byte(0x00),
                BusEvent::Latch,
            ]
        );
    }

    #[test]
    fn test_chain_length_checked() {
        assert!(matches!(
            ChainWriter::new(RecordingBus::default(), 0),
            Err(ChainError::ChainTooLong)
        ));
        assert!(matches!(
            ChainWriter::new(RecordingBus::default(), MAX_CHIPS + 1),
            Err(ChainError::ChainTooLong)
        ));
    }
}
