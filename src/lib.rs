//! Cycle-accurate models of clocked FIFO queue controllers.
//!
//! Four controller variants share one per-tick contract: an explicit
//! occupancy counter, generation-bit pointers, an almost-full/almost-empty
//! threshold decorator, and a phantom-empty compensation for backing stores
//! with a registered read port. Requests that cannot be honored are dropped
//! silently; only configuration problems are reported as errors.

pub mod core;

// Re-export commonly used types
pub use crate::core::components::{Controller, CounterController, LatencyCompensated, Thresholded, WrapBitController};
pub use crate::core::config::{ConfigError, ControllerKind, FifoConfig, Thresholds};
pub use crate::core::execution::{Fifo, SimulationEngine};
pub use crate::core::types::{Flags, ReadLatency, Requests, TickInputs, TickOutputs};
