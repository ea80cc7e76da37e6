//! Settings for running batches of independent FIFO simulations.

use serde::{Deserialize, Serialize};

/// How batch jobs are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// One job after another on the calling thread.
    #[default]
    Sequential,
    /// Jobs spread over a rayon thread pool. Each job still steps its own
    /// FIFO single-threaded.
    Rayon,
}

/// Batch execution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub concurrency_mode: ConcurrencyMode,
    /// Worker count for `Rayon`; rayon's default when `None`.
    pub thread_pool_size: Option<usize>,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}
