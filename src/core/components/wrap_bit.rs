use crate::core::components::traits::{gate, initialize_settled, Controller};
use crate::core::pointer::WrapPointer;
use crate::core::types::{Flags, Requests, Settled};

/// FIFO controller that derives full/empty from two generation-bit pointers.
///
/// Each pointer is one bit wider than a slot index. Equal slots with equal
/// generation bits mean empty, equal slots with differing generation bits
/// mean full. No occupancy counter is kept; occupancy is reconstructed from
/// the pointer difference when asked for.
///
/// Capacity must be a power of two so the pointer increment is a plain binary
/// increment; `FifoConfig::validate` enforces this before construction.
#[derive(Debug, Clone)]
pub struct WrapBitController {
    capacity: usize,
    write_pointer: WrapPointer,
    read_pointer: WrapPointer,
}

impl WrapBitController {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            capacity,
            write_pointer: WrapPointer::new(capacity),
            read_pointer: WrapPointer::new(capacity),
        }
    }

    pub fn write_pointer(&self) -> WrapPointer {
        self.write_pointer
    }

    pub fn read_pointer(&self) -> WrapPointer {
        self.read_pointer
    }

    /// Settle against the logical flags, with `hold_empty` forcing the read
    /// side shut for this tick.
    pub(crate) fn settle_held(&self, requests: &Requests, hold_empty: bool) -> Settled {
        if requests.initialize {
            return initialize_settled();
        }
        let mut flags = self.flags();
        flags.empty |= hold_empty;
        flags.empty_extend = hold_empty;
        let (write_enable, read_enable) = gate(requests, &flags);
        Settled {
            initialize: false,
            flags,
            occupancy: self.occupancy(),
            write_enable,
            read_enable,
            write_address: self.write_pointer.slot(),
            head_address: self.read_pointer.slot(),
            read_address: self.read_pointer.slot(),
            suppress_next_read: false,
        }
    }
}

impl Controller for WrapBitController {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn occupancy(&self) -> usize {
        self.write_pointer.distance_from(&self.read_pointer)
    }

    fn flags(&self) -> Flags {
        let same_slot = self.write_pointer.slot() == self.read_pointer.slot();
        let same_generation = self.write_pointer.generation() == self.read_pointer.generation();
        Flags {
            full: same_slot && !same_generation,
            empty: same_slot && same_generation,
            ..Flags::default()
        }
    }

    fn settle(&self, requests: &Requests) -> Settled {
        self.settle_held(requests, false)
    }

    fn latch(&mut self, settled: &Settled) {
        if settled.initialize {
            self.initialize();
            return;
        }
        if settled.write_enable {
            self.write_pointer = self.write_pointer.advance();
        }
        if settled.read_enable {
            self.read_pointer = self.read_pointer.advance();
        }
    }

    fn initialize(&mut self) {
        self.write_pointer.reset();
        self.read_pointer.reset();
    }

    fn name(&self) -> &'static str {
        "wrap_bit"
    }
}
