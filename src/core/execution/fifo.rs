use crate::core::components::factory::build_controller;
use crate::core::components::traits::Controller;
use crate::core::config::{ConfigError, FifoConfig};
use crate::core::memory::store::{build_store, BackingStore, MemoryData};
use crate::core::types::{Flags, TickInputs, TickOutputs};

/// A FIFO controller wired to its backing store, advanced one tick at a time.
///
/// Each tick the controller settles on the sampled requests, the store is
/// addressed, the read port is sampled (only when the read was accepted), the
/// gated write is committed, and then controller and store latch together.
///
/// Writes while full and reads while empty are silently dropped. Use
/// [`Fifo::status`] or the accepted flags of [`TickOutputs`] for backpressure.
pub struct Fifo<T: MemoryData> {
    controller: Box<dyn Controller>,
    store: Box<dyn BackingStore<T>>,
    current_cycle: u64,
}

impl<T: MemoryData> Fifo<T> {
    /// Build controller and store from a validated config.
    pub fn new(config: &FifoConfig) -> Result<Self, ConfigError> {
        let controller = build_controller(config)?;
        let store = build_store(config.read_latency(), config.capacity);
        Self::from_parts(controller, store)
    }

    /// Wire a custom controller to a custom store.
    pub fn from_parts(
        controller: Box<dyn Controller>,
        store: Box<dyn BackingStore<T>>,
    ) -> Result<Self, ConfigError> {
        if controller.read_latency() != store.read_latency() {
            return Err(ConfigError::LatencyMismatch {
                controller: controller.read_latency(),
                store: store.read_latency(),
            });
        }
        if store.slots() < controller.capacity() {
            return Err(ConfigError::StoreTooSmall {
                slots: store.slots(),
                capacity: controller.capacity(),
            });
        }
        Ok(Self {
            controller,
            store,
            current_cycle: 0,
        })
    }

    /// Advance one tick.
    pub fn tick(&mut self, inputs: TickInputs<T>) -> TickOutputs<T> {
        let settled = self.controller.settle(&inputs.requests());

        self.store.present(settled.read_address);
        let read_payload = if settled.read_enable {
            self.store.output()
        } else {
            None
        };

        if settled.write_enable {
            if let Some(payload) = inputs.write {
                self.store.write(settled.write_address, payload);
            }
        }

        self.controller.latch(&settled);
        self.store.end_cycle();
        self.current_cycle += 1;

        TickOutputs {
            write_accepted: settled.write_enable,
            read_accepted: settled.read_enable,
            read_payload,
            flags: settled.flags,
            occupancy: settled.occupancy,
        }
    }

    /// Flags for the current state, before any requests are applied.
    pub fn status(&self) -> Flags {
        self.controller.flags()
    }

    pub fn is_full(&self) -> bool {
        self.status().full
    }

    pub fn is_empty(&self) -> bool {
        self.status().empty
    }

    pub fn occupancy(&self) -> usize {
        self.controller.occupancy()
    }

    pub fn capacity(&self) -> usize {
        self.controller.capacity()
    }

    pub fn current_cycle(&self) -> u64 {
        self.current_cycle
    }

    pub fn controller_name(&self) -> &'static str {
        self.controller.name()
    }
}
