use crate::core::types::{Flags, ReadLatency, Requests, Settled};

/// Per-tick control logic shared by every FIFO controller variant.
///
/// A tick is split the way a clocked circuit settles and then latches:
/// `settle` is a pure function of the state left by the previous tick and the
/// requests sampled this tick; `latch` applies the settled transition so it
/// becomes visible on the next tick. Nothing written during `settle` is read
/// back within the same tick.
///
/// Requests are never rejected with an error. A write while full or a read
/// while empty is dropped: `write_enable`/`read_enable` stay low and the state
/// does not change. Callers that do not check `full`/`empty` lose data
/// silently, as the hardware would.
pub trait Controller: Send {
    /// Number of slots addressed.
    fn capacity(&self) -> usize;

    /// Logical occupancy held in the current state.
    fn occupancy(&self) -> usize;

    /// Flags as of the current state, with no requests applied.
    fn flags(&self) -> Flags;

    /// Read latency of the store this controller must drive.
    fn read_latency(&self) -> ReadLatency {
        ReadLatency::Combinational
    }

    /// Compute this tick's flags, gated enables, addresses and next-state
    /// inputs. An initialization pulse takes priority over every request and
    /// describes the zero state.
    fn settle(&self, requests: &Requests) -> Settled;

    /// Latch a settled transition into the state seen next tick.
    fn latch(&mut self, settled: &Settled);

    /// Force the zero state.
    fn initialize(&mut self);

    /// Settle and latch in one step.
    fn tick(&mut self, requests: &Requests) -> Settled {
        let settled = self.settle(requests);
        self.latch(&settled);
        settled
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn occupancy(&self) -> usize {
        (**self).occupancy()
    }

    fn flags(&self) -> Flags {
        (**self).flags()
    }

    fn read_latency(&self) -> ReadLatency {
        (**self).read_latency()
    }

    fn settle(&self, requests: &Requests) -> Settled {
        (**self).settle(requests)
    }

    fn latch(&mut self, settled: &Settled) {
        (**self).latch(settled)
    }

    fn initialize(&mut self) {
        (**self).initialize()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Gate raw requests against the flags sampled this tick.
///
/// Returns `(write_enable, read_enable)`.
pub fn gate(requests: &Requests, flags: &Flags) -> (bool, bool) {
    let write_enable = requests.write && !flags.full;
    let read_enable = requests.read && !flags.empty;
    if requests.write && !write_enable {
        log::trace!("write request dropped: full");
    }
    if requests.read && !read_enable {
        log::trace!("read request dropped: empty");
    }
    (write_enable, read_enable)
}

/// Settled transition for an initialization tick: zero state, nothing enabled.
pub fn initialize_settled() -> Settled {
    Settled {
        initialize: true,
        flags: Flags {
            full: false,
            empty: true,
            ..Flags::default()
        },
        occupancy: 0,
        write_enable: false,
        read_enable: false,
        write_address: 0,
        head_address: 0,
        read_address: 0,
        suppress_next_read: false,
    }
}
