use crate::core::types::ReadLatency;

/// Marker trait for payload types held in a backing store.
/// The controllers never inspect payloads.
pub trait MemoryData: Send + Clone + 'static {}

impl MemoryData for u8 {}
impl MemoryData for u16 {}
impl MemoryData for u32 {}
impl MemoryData for u64 {}
impl MemoryData for i64 {}
impl MemoryData for bool {}
impl MemoryData for String {}
impl MemoryData for Vec<u8> {}

/// Storage array addressed directly by controller pointers.
///
/// Writes go to the current state and only become readable after
/// `end_cycle` copies it into the snapshot; reads always sample the snapshot
/// taken at the previous tick boundary.
pub trait BackingStore<T: MemoryData>: Send {
    fn slots(&self) -> usize;

    fn read_latency(&self) -> ReadLatency;

    /// Present the read address for this tick.
    fn present(&mut self, address: usize);

    /// Value on the read port this tick. `None` while the addressed slot has
    /// never been written.
    fn output(&self) -> Option<T>;

    /// Commit a write; visible from the next tick.
    fn write(&mut self, address: usize, payload: T);

    /// Tick boundary.
    fn end_cycle(&mut self);
}

/// Double-buffered slot array shared by both store models.
#[derive(Debug, Clone)]
struct SlotArray<T> {
    /// Written during the tick
    current_state: Vec<Option<T>>,
    /// Read during the tick
    snapshot: Vec<Option<T>>,
}

impl<T: MemoryData> SlotArray<T> {
    fn new(slots: usize) -> Self {
        Self {
            current_state: vec![None; slots],
            snapshot: vec![None; slots],
        }
    }

    fn read(&self, address: usize) -> Option<T> {
        self.snapshot.get(address).cloned().flatten()
    }

    fn write(&mut self, address: usize, payload: T) {
        if let Some(slot) = self.current_state.get_mut(address) {
            *slot = Some(payload);
        } else {
            log::warn!(
                "write to slot {} outside store of {} slots ignored",
                address,
                self.current_state.len()
            );
        }
    }

    fn create_snapshot(&mut self) {
        self.snapshot.clone_from(&self.current_state);
    }
}

/// Store whose read port returns the addressed slot in the same tick.
#[derive(Debug, Clone)]
pub struct CombinationalStore<T> {
    slots: SlotArray<T>,
    address: usize,
}

impl<T: MemoryData> CombinationalStore<T> {
    pub fn new(slots: usize) -> Self {
        Self {
            slots: SlotArray::new(slots),
            address: 0,
        }
    }
}

impl<T: MemoryData> BackingStore<T> for CombinationalStore<T> {
    fn slots(&self) -> usize {
        self.slots.snapshot.len()
    }

    fn read_latency(&self) -> ReadLatency {
        ReadLatency::Combinational
    }

    fn present(&mut self, address: usize) {
        self.address = address;
    }

    fn output(&self) -> Option<T> {
        self.slots.read(self.address)
    }

    fn write(&mut self, address: usize, payload: T) {
        self.slots.write(address, payload);
    }

    fn end_cycle(&mut self) {
        self.slots.create_snapshot();
    }
}

/// Store with a registered read port: the output register is loaded at the
/// tick boundary from the address presented during the tick, sampling the
/// contents before that tick's write lands.
#[derive(Debug, Clone)]
pub struct RegisteredStore<T> {
    slots: SlotArray<T>,
    address: usize,
    output_register: Option<T>,
}

impl<T: MemoryData> RegisteredStore<T> {
    pub fn new(slots: usize) -> Self {
        Self {
            slots: SlotArray::new(slots),
            address: 0,
            output_register: None,
        }
    }
}

impl<T: MemoryData> BackingStore<T> for RegisteredStore<T> {
    fn slots(&self) -> usize {
        self.slots.snapshot.len()
    }

    fn read_latency(&self) -> ReadLatency {
        ReadLatency::Registered
    }

    fn present(&mut self, address: usize) {
        self.address = address;
    }

    fn output(&self) -> Option<T> {
        self.output_register.clone()
    }

    fn write(&mut self, address: usize, payload: T) {
        self.slots.write(address, payload);
    }

    fn end_cycle(&mut self) {
        // read-before-write: load from the old snapshot first
        self.output_register = self.slots.read(self.address);
        self.slots.create_snapshot();
    }
}

/// Build an empty store of the given latency.
pub fn build_store<T: MemoryData>(latency: ReadLatency, slots: usize) -> Box<dyn BackingStore<T>> {
    match latency {
        ReadLatency::Combinational => Box::new(CombinationalStore::new(slots)),
        ReadLatency::Registered => Box::new(RegisteredStore::new(slots)),
    }
}
