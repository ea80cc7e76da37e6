use crate::core::config::Thresholds;
use crate::core::execution::simulation_engine::{TickObserver, TickRecord};
use log::warn;
use std::collections::VecDeque;
use std::fmt::Debug;

/// A checked property that failed on some tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub cycle: u64,
    pub message: String,
}

/// Reference FIFO model checked against every tick of a run.
///
/// Tracks the entries that should be held, then verifies gating, flags,
/// occupancy and read ordering of the device under test.
#[derive(Debug, Clone)]
pub struct Scoreboard<T> {
    capacity: usize,
    thresholds: Option<Thresholds>,
    expected: VecDeque<T>,
    violations: Vec<Violation>,
    writes_accepted: u64,
    reads_accepted: u64,
    requests_dropped: u64,
}

impl<T: Clone + PartialEq + Debug> Scoreboard<T> {
    pub fn new(capacity: usize, thresholds: Option<Thresholds>) -> Self {
        Self {
            capacity,
            thresholds,
            expected: VecDeque::new(),
            violations: Vec::new(),
            writes_accepted: 0,
            reads_accepted: 0,
            requests_dropped: 0,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn writes_accepted(&self) -> u64 {
        self.writes_accepted
    }

    pub fn reads_accepted(&self) -> u64 {
        self.reads_accepted
    }

    pub fn requests_dropped(&self) -> u64 {
        self.requests_dropped
    }

    /// Entries the model expects the FIFO to hold, head first.
    pub fn expected(&self) -> &VecDeque<T> {
        &self.expected
    }

    fn fail(&mut self, cycle: u64, message: String) {
        warn!("[Scoreboard] cycle {}: {}", cycle, message);
        self.violations.push(Violation { cycle, message });
    }

    fn check(&mut self, cycle: u64, condition: bool, message: impl FnOnce() -> String) {
        if !condition {
            self.fail(cycle, message());
        }
    }

    /// Check one tick and advance the model.
    pub fn observe(&mut self, record: &TickRecord<T>) {
        let cycle = record.cycle;
        let requests = record.inputs.requests();
        let out = &record.outputs;
        let flags = out.flags;

        if requests.initialize {
            self.check(cycle, !out.write_accepted && !out.read_accepted, || {
                "request accepted during initialization".to_string()
            });
            self.check(cycle, flags.empty && !flags.full, || {
                format!("initialization tick flags not zero state: {:?}", flags)
            });
            self.expected.clear();
            return;
        }

        let held = self.expected.len();
        let capacity = self.capacity;
        self.check(cycle, out.occupancy == held, || {
            format!("occupancy {} but model holds {}", out.occupancy, held)
        });
        self.check(cycle, out.occupancy <= capacity, || {
            format!("occupancy {} above capacity {}", out.occupancy, capacity)
        });
        self.check(cycle, !(flags.full && flags.empty), || {
            "full and empty asserted together".to_string()
        });
        self.check(cycle, flags.full == (held == capacity), || {
            format!("full={} with {} of {} held", flags.full, held, capacity)
        });
        if flags.empty_extend {
            self.check(cycle, flags.empty, || "empty_extend without empty".to_string());
        } else {
            self.check(cycle, flags.empty == (held == 0), || {
                format!("empty={} with {} held", flags.empty, held)
            });
        }

        if let Some(thresholds) = self.thresholds {
            self.check(cycle, flags.almost_full == Some(held > thresholds.upper), || {
                format!("almost_full={:?} at occupancy {}", flags.almost_full, held)
            });
            let readable = if flags.empty { 0 } else { held };
            self.check(cycle, flags.almost_empty == Some(readable < thresholds.lower), || {
                format!("almost_empty={:?} with {} readable", flags.almost_empty, readable)
            });
        }

        self.check(cycle, out.write_accepted == (requests.write && !flags.full), || {
            format!("write gating wrong: accepted={}", out.write_accepted)
        });
        self.check(cycle, out.read_accepted == (requests.read && !flags.empty), || {
            format!("read gating wrong: accepted={}", out.read_accepted)
        });
        if (requests.write && !out.write_accepted) || (requests.read && !out.read_accepted) {
            self.requests_dropped += 1;
        }

        if out.read_accepted {
            self.reads_accepted += 1;
            let expected = self.expected.pop_front();
            if out.read_payload != expected {
                self.fail(
                    cycle,
                    format!("read {:?}, expected {:?}", out.read_payload, expected),
                );
            }
        } else if out.read_payload.is_some() {
            self.fail(cycle, "payload returned without an accepted read".to_string());
        }

        if out.write_accepted {
            self.writes_accepted += 1;
            if let Some(payload) = &record.inputs.write {
                self.expected.push_back(payload.clone());
            }
        }
    }
}

impl<T: Clone + PartialEq + Debug> TickObserver<T> for Scoreboard<T> {
    fn on_tick(&mut self, record: &TickRecord<T>) {
        self.observe(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Flags, TickInputs, TickOutputs};

    fn record(cycle: u64, inputs: TickInputs<u64>, outputs: TickOutputs<u64>) -> TickRecord<u64> {
        TickRecord { cycle, inputs, outputs }
    }

    fn outputs(write: bool, read: Option<u64>, full: bool, empty: bool, occupancy: usize) -> TickOutputs<u64> {
        TickOutputs {
            write_accepted: write,
            read_accepted: read.is_some(),
            read_payload: read,
            flags: Flags { full, empty, ..Flags::default() },
            occupancy,
        }
    }

    #[test]
    fn test_clean_write_then_read() {
        let mut board = Scoreboard::new(2, None);
        board.observe(&record(0, TickInputs::write(3), outputs(true, None, false, true, 0)));
        board.observe(&record(1, TickInputs::read(), outputs(false, Some(3), false, false, 1)));
        assert!(board.is_clean(), "{:?}", board.violations());
        assert_eq!(board.writes_accepted(), 1);
        assert_eq!(board.reads_accepted(), 1);
    }

    #[test]
    fn test_detects_out_of_order_read() {
        let mut board = Scoreboard::new(4, None);
        board.observe(&record(0, TickInputs::write(1), outputs(true, None, false, true, 0)));
        board.observe(&record(1, TickInputs::write(2), outputs(true, None, false, false, 1)));
        board.observe(&record(2, TickInputs::read(), outputs(false, Some(2), false, false, 2)));
        assert_eq!(board.violations().len(), 1);
        assert_eq!(board.violations()[0].cycle, 2);
    }

    #[test]
    fn test_detects_write_accepted_while_full() {
        let mut board = Scoreboard::new(1, None);
        board.observe(&record(0, TickInputs::write(1), outputs(true, None, false, true, 0)));
        board.observe(&record(1, TickInputs::write(2), outputs(true, None, true, false, 1)));
        assert!(!board.is_clean());
    }

    #[test]
    fn test_phantom_empty_keeps_almost_full_on_real_occupancy() {
        let mut board = Scoreboard::new(4, Some(Thresholds::new(0, 0)));
        let mut first = outputs(true, None, false, true, 0);
        first.flags.almost_full = Some(false);
        first.flags.almost_empty = Some(false);
        board.observe(&record(0, TickInputs::write(1), first));

        let mut phantom = outputs(false, None, false, true, 1);
        phantom.flags.empty_extend = true;
        phantom.flags.almost_full = Some(true);
        phantom.flags.almost_empty = Some(false);
        board.observe(&record(1, TickInputs::idle(), phantom.clone()));
        assert!(board.is_clean(), "{:?}", board.violations());

        phantom.flags.almost_full = Some(false);
        board.observe(&record(2, TickInputs::idle(), phantom));
        assert_eq!(board.violations().len(), 1);
        assert_eq!(board.violations()[0].cycle, 2);
    }

    #[test]
    fn test_counts_dropped_requests() {
        let mut board = Scoreboard::new(1, None);
        board.observe(&record(0, TickInputs::read(), outputs(false, None, false, true, 0)));
        board.observe(&record(1, TickInputs::read(), outputs(false, None, false, true, 0)));
        assert!(board.is_clean());
        assert_eq!(board.requests_dropped(), 2);
    }
}
