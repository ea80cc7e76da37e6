use crate::core::components::traits::Controller;
use crate::core::config::Thresholds;
use crate::core::types::{Flags, ReadLatency, Requests, Settled};

/// Stateless decorator adding almost-full / almost-empty flags.
///
/// `almost_full = occupancy > upper`, `almost_empty = occupancy < lower`.
/// While the inner controller reports empty (including a phantom empty)
/// `almost_empty` counts zero readable entries; `almost_full` always follows
/// the real occupancy.
#[derive(Debug, Clone)]
pub struct Thresholded<C> {
    inner: C,
    thresholds: Thresholds,
}

impl<C: Controller> Thresholded<C> {
    /// Thresholds must already be validated against the inner capacity.
    pub fn new(inner: C, thresholds: Thresholds) -> Self {
        debug_assert!(thresholds.validate(inner.capacity()).is_ok());
        Self { inner, thresholds }
    }

    fn decorate(&self, mut flags: Flags, occupancy: usize) -> Flags {
        let readable = if flags.empty { 0 } else { occupancy };
        flags.almost_full = Some(occupancy > self.thresholds.upper);
        flags.almost_empty = Some(readable < self.thresholds.lower);
        flags
    }
}

impl<C: Controller> Controller for Thresholded<C> {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn occupancy(&self) -> usize {
        self.inner.occupancy()
    }

    fn flags(&self) -> Flags {
        self.decorate(self.inner.flags(), self.inner.occupancy())
    }

    fn read_latency(&self) -> ReadLatency {
        self.inner.read_latency()
    }

    fn settle(&self, requests: &Requests) -> Settled {
        let mut settled = self.inner.settle(requests);
        settled.flags = self.decorate(settled.flags, settled.occupancy);
        settled
    }

    fn latch(&mut self, settled: &Settled) {
        self.inner.latch(settled)
    }

    fn initialize(&mut self) {
        self.inner.initialize()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
