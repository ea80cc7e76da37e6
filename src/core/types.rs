use serde::{Deserialize, Serialize};

/// Read latency of a backing store: how long after an address is presented
/// its payload appears on the read port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadLatency {
    /// Payload available in the same tick the address is presented.
    Combinational,
    /// Payload available one tick after the address is presented.
    Registered,
}

/// Request signals sampled by a controller for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requests {
    pub write: bool,
    pub read: bool,
    pub initialize: bool,
}

impl Requests {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn write() -> Self {
        Self { write: true, ..Self::default() }
    }

    pub fn read() -> Self {
        Self { read: true, ..Self::default() }
    }

    pub fn write_read() -> Self {
        Self { write: true, read: true, initialize: false }
    }

    pub fn initialize() -> Self {
        Self { initialize: true, ..Self::default() }
    }
}

/// Occupancy flags visible during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub full: bool,
    pub empty: bool,
    /// `None` unless thresholds are configured.
    pub almost_full: Option<bool>,
    /// `None` unless thresholds are configured.
    pub almost_empty: Option<bool>,
    /// Phantom empty latched by the latency-compensated controller.
    pub empty_extend: bool,
}

/// Everything a controller settles on during one tick, before latching.
///
/// All fields are pure functions of the state at the start of the tick and
/// the sampled requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// Initialization pulse was sampled; every other field describes the zero state.
    pub initialize: bool,
    pub flags: Flags,
    /// Logical occupancy at the start of the tick.
    pub occupancy: usize,
    /// Gated write: request asserted and not full.
    pub write_enable: bool,
    /// Gated read: request asserted and not empty.
    pub read_enable: bool,
    /// Slot a gated write lands in.
    pub write_address: usize,
    /// Slot holding the head entry.
    pub head_address: usize,
    /// Address presented to the backing store this tick.
    pub read_address: usize,
    /// Phantom empty to assert next tick (latency-compensated variant only).
    pub suppress_next_read: bool,
}

/// Per-tick input signals of the complete FIFO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInputs<T> {
    /// Payload to write; `Some` asserts the write request.
    pub write: Option<T>,
    pub read: bool,
    pub initialize: bool,
}

impl<T> TickInputs<T> {
    pub fn idle() -> Self {
        Self { write: None, read: false, initialize: false }
    }

    pub fn write(payload: T) -> Self {
        Self { write: Some(payload), read: false, initialize: false }
    }

    pub fn read() -> Self {
        Self { write: None, read: true, initialize: false }
    }

    pub fn write_read(payload: T) -> Self {
        Self { write: Some(payload), read: true, initialize: false }
    }

    pub fn initialize() -> Self {
        Self { write: None, read: false, initialize: true }
    }

    pub fn requests(&self) -> Requests {
        Requests {
            write: self.write.is_some(),
            read: self.read,
            initialize: self.initialize,
        }
    }
}

impl<T> Default for TickInputs<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Per-tick output signals of the complete FIFO.
///
/// A request that is not accepted is dropped: nothing is queued and no error
/// is raised. Callers must watch `full`/`empty` (or the accepted flags) and
/// re-assert a request on a later tick themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutputs<T> {
    pub write_accepted: bool,
    pub read_accepted: bool,
    /// Present only when `read_accepted` is true, and delivered on that same
    /// tick for both store latencies: the latency-compensated controller
    /// addresses a registered store one tick ahead. The registered store's
    /// latency instead shows up as a one-tick phantom `empty`
    /// (`flags.empty_extend`) after a write lands in the slot being fetched.
    pub read_payload: Option<T>,
    pub flags: Flags,
    /// Logical occupancy sampled at the start of the tick.
    pub occupancy: usize,
}

impl<T> TickOutputs<T> {
    pub fn full(&self) -> bool {
        self.flags.full
    }

    pub fn empty(&self) -> bool {
        self.flags.empty
    }
}
