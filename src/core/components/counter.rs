use crate::core::components::traits::{gate, initialize_settled, Controller};
use crate::core::pointer::RingPointer;
use crate::core::types::{Flags, Requests, Settled};

/// FIFO controller that tracks occupancy with an explicit bounded counter.
///
/// Works for any capacity >= 1. A simultaneous accepted write and read
/// advances both pointers and leaves the count unchanged.
#[derive(Debug, Clone)]
pub struct CounterController {
    capacity: usize,
    write_pointer: RingPointer,
    read_pointer: RingPointer,
    occupancy_count: usize,
}

impl CounterController {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            write_pointer: RingPointer::new(capacity),
            read_pointer: RingPointer::new(capacity),
            occupancy_count: 0,
        }
    }

    pub fn write_pointer(&self) -> usize {
        self.write_pointer.slot()
    }

    pub fn read_pointer(&self) -> usize {
        self.read_pointer.slot()
    }

    fn next_count(&self, write_enable: bool, read_enable: bool) -> usize {
        match (write_enable, read_enable) {
            (true, false) => self.occupancy_count + 1,
            (false, true) => self.occupancy_count - 1,
            _ => self.occupancy_count,
        }
    }
}

impl Controller for CounterController {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn occupancy(&self) -> usize {
        self.occupancy_count
    }

    fn flags(&self) -> Flags {
        Flags {
            full: self.occupancy_count == self.capacity,
            empty: self.occupancy_count == 0,
            ..Flags::default()
        }
    }

    fn settle(&self, requests: &Requests) -> Settled {
        if requests.initialize {
            return initialize_settled();
        }
        let flags = self.flags();
        let (write_enable, read_enable) = gate(requests, &flags);
        Settled {
            initialize: false,
            flags,
            occupancy: self.occupancy_count,
            write_enable,
            read_enable,
            write_address: self.write_pointer.slot(),
            head_address: self.read_pointer.slot(),
            read_address: self.read_pointer.slot(),
            suppress_next_read: false,
        }
    }

    fn latch(&mut self, settled: &Settled) {
        if settled.initialize {
            self.initialize();
            return;
        }
        self.occupancy_count = self.next_count(settled.write_enable, settled.read_enable);
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
        self.occupancy_count = 0;
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}
