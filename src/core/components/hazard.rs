use crate::core::components::traits::Controller;
use crate::core::components::wrap_bit::WrapBitController;
use crate::core::types::{Flags, ReadLatency, Requests, Settled};

/// Wrap-bit controller for a backing store with a registered read port.
///
/// The store's output register is loaded at the end of each tick from the
/// address presented during that tick, so the controller presents the read
/// pointer it will hold next tick: the advanced pointer when a read is
/// accepted, the current one otherwise. The output register then always
/// holds the head entry on the tick it is consumed.
///
/// A write landing in the slot being fetched races the fetch: the register
/// captures the old contents. For exactly one tick afterwards `empty` is
/// forced high (`empty_extend`) so the stale value is never handed out. The
/// flag is recomputed every tick and never accumulates.
#[derive(Debug, Clone)]
pub struct LatencyCompensated {
    inner: WrapBitController,
    suppress_next_read: bool,
}

impl LatencyCompensated {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: WrapBitController::new(capacity),
            suppress_next_read: false,
        }
    }

}

impl Controller for LatencyCompensated {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn occupancy(&self) -> usize {
        self.inner.occupancy()
    }

    fn flags(&self) -> Flags {
        let mut flags = self.inner.flags();
        flags.empty |= self.suppress_next_read;
        flags.empty_extend = self.suppress_next_read;
        flags
    }

    fn read_latency(&self) -> ReadLatency {
        ReadLatency::Registered
    }

    fn settle(&self, requests: &Requests) -> Settled {
        let mut settled = self.inner.settle_held(requests, self.suppress_next_read);
        if settled.initialize {
            return settled;
        }
        let read_pointer = self.inner.read_pointer();
        settled.read_address = if settled.read_enable {
            read_pointer.advance().slot()
        } else {
            read_pointer.slot()
        };
        settled.suppress_next_read =
            settled.write_enable && settled.write_address == settled.read_address;
        if settled.suppress_next_read {
            log::trace!(
                "write to slot {} races registered read, holding empty one tick",
                settled.write_address
            );
        }
        settled
    }

    fn latch(&mut self, settled: &Settled) {
        self.inner.latch(settled);
        self.suppress_next_read = settled.suppress_next_read;
    }

    fn initialize(&mut self) {
        self.inner.initialize();
        self.suppress_next_read = false;
    }

    fn name(&self) -> &'static str {
        "latency_compensated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_into_empty_holds_empty_one_tick() {
        let mut ctrl = LatencyCompensated::new(4);
        let settled = ctrl.tick(&Requests::write());
        assert!(settled.write_enable);
        assert!(settled.suppress_next_read);

        // logical occupancy is one, but the fetch is stale
        assert_eq!(ctrl.occupancy(), 1);
        let flags = ctrl.flags();
        assert!(flags.empty && flags.empty_extend);
        let settled = ctrl.tick(&Requests::read());
        assert!(!settled.read_enable);

        // self-clears without being re-armed
        let flags = ctrl.flags();
        assert!(!flags.empty && !flags.empty_extend);
        assert!(ctrl.tick(&Requests::read()).read_enable);
    }

    #[test]
    fn test_read_presents_lookahead_address() {
        let mut ctrl = LatencyCompensated::new(4);
        ctrl.tick(&Requests::write());
        ctrl.tick(&Requests::write());
        ctrl.tick(&Requests::idle());
        let settled = ctrl.settle(&Requests::idle());
        assert_eq!(settled.read_address, 0);
        let settled = ctrl.settle(&Requests::read());
        assert_eq!(settled.head_address, 0);
        assert_eq!(settled.read_address, 1);
    }

    #[test]
    fn test_read_and_write_racing_same_slot() {
        let mut ctrl = LatencyCompensated::new(8);
        ctrl.tick(&Requests::write());
        ctrl.tick(&Requests::idle());
        assert_eq!(ctrl.occupancy(), 1);
        assert!(!ctrl.flags().empty);

        let settled = ctrl.tick(&Requests::write_read());
        assert!(settled.write_enable && settled.read_enable);
        assert_eq!(settled.write_address, settled.read_address);
        assert!(settled.suppress_next_read);

        assert_eq!(ctrl.occupancy(), 1);
        assert!(ctrl.flags().empty);
        ctrl.tick(&Requests::idle());
        assert!(!ctrl.flags().empty);
    }

    #[test]
    fn test_no_hazard_when_write_targets_other_slot() {
        let mut ctrl = LatencyCompensated::new(8);
        ctrl.tick(&Requests::write());
        ctrl.tick(&Requests::write());
        ctrl.tick(&Requests::idle());
        let settled = ctrl.tick(&Requests::write_read());
        assert!(!settled.suppress_next_read);
        assert!(!ctrl.flags().empty);
    }

    #[test]
    fn test_initialize_clears_suppression() {
        let mut ctrl = LatencyCompensated::new(2);
        ctrl.tick(&Requests::write());
        assert!(ctrl.flags().empty_extend);
        ctrl.tick(&Requests::initialize());
        assert!(!ctrl.flags().empty_extend);
        assert_eq!(ctrl.occupancy(), 0);
    }

    #[test]
    fn test_full_never_double_counts_phantom() {
        let mut ctrl = LatencyCompensated::new(2);
        ctrl.tick(&Requests::write());
        ctrl.tick(&Requests::write());
        let flags = ctrl.flags();
        assert!(flags.full);
        assert!(!flags.empty);
    }
}
