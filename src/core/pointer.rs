//! Shared pointer and width utilities for the FIFO controllers.
//!
//! Hardware pointers never use a modulus operator. The counter family wraps
//! with an explicit compare against the last slot; the wrap-bit family relies
//! on plain binary overflow of a pointer one bit wider than the slot index.

/// Ceiling of log2, with `clog2(0) == clog2(1) == 0`.
pub fn clog2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// Number of bits needed to address `capacity` slots.
pub fn pointer_width(capacity: usize) -> u32 {
    clog2(capacity)
}

/// Slot index for the counter family; valid for any capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingPointer {
    value: usize,
    capacity: usize,
}

impl RingPointer {
    pub fn new(capacity: usize) -> Self {
        Self { value: 0, capacity }
    }

    pub fn slot(&self) -> usize {
        self.value
    }

    /// Next slot, wrapping from the last slot back to zero.
    pub fn advance(self) -> Self {
        let value = if self.value + 1 == self.capacity { 0 } else { self.value + 1 };
        Self { value, ..self }
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Pointer extended by one generation bit above the slot bits.
///
/// `2 * capacity` distinct values map onto `capacity` physical slots; the top
/// bit counts laps modulo two. Only meaningful for power-of-two capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapPointer {
    value: usize,
    slot_bits: u32,
}

impl WrapPointer {
    pub fn new(capacity: usize) -> Self {
        Self {
            value: 0,
            slot_bits: pointer_width(capacity),
        }
    }

    fn mask(&self) -> usize {
        (1usize << (self.slot_bits + 1)) - 1
    }

    /// Full extended value, slot bits plus generation bit.
    pub fn raw(&self) -> usize {
        self.value
    }

    /// Low bits only: the storage address.
    pub fn slot(&self) -> usize {
        self.value & ((1usize << self.slot_bits) - 1)
    }

    /// The generation (lap parity) bit.
    pub fn generation(&self) -> bool {
        (self.value >> self.slot_bits) & 1 == 1
    }

    /// Wrapping increment of the extended value; the generation bit flips
    /// when the slot bits overflow.
    pub fn advance(self) -> Self {
        Self {
            value: self.value.wrapping_add(1) & self.mask(),
            ..self
        }
    }

    /// Entries between `other` (read side) and `self` (write side).
    pub fn distance_from(&self, other: &WrapPointer) -> usize {
        self.value.wrapping_sub(other.value) & self.mask()
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}
