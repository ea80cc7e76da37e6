use crate::core::types::TickInputs;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of per-tick input signals for a simulation run.
pub trait Stimulus<T> {
    /// Inputs for the given cycle.
    fn next_inputs(&mut self, cycle: u64) -> TickInputs<T>;
}

/// Replays a fixed list of inputs, then idles.
#[derive(Debug, Clone)]
pub struct ScriptedStimulus<T> {
    script: VecDeque<TickInputs<T>>,
}

impl<T> ScriptedStimulus<T> {
    pub fn new(script: Vec<TickInputs<T>>) -> Self {
        Self { script: script.into() }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl<T> Stimulus<T> for ScriptedStimulus<T> {
    fn next_inputs(&mut self, _cycle: u64) -> TickInputs<T> {
        self.script.pop_front().unwrap_or_default()
    }
}

/// Seeded random requests with independent per-signal probabilities.
///
/// Written payloads count up from zero and are masked to the payload width,
/// so ordering is easy to read back in traces.
#[derive(Debug, Clone)]
pub struct RandomStimulus {
    rng: StdRng,
    write_probability: f64,
    read_probability: f64,
    initialize_probability: f64,
    payload_mask: u64,
    next_payload: u64,
}

impl RandomStimulus {
    pub fn new(seed: u64, payload_mask: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            write_probability: 0.5,
            read_probability: 0.5,
            initialize_probability: 0.0,
            payload_mask,
            next_payload: 0,
        }
    }

    pub fn with_write_probability(mut self, probability: f64) -> Self {
        self.write_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_read_probability(mut self, probability: f64) -> Self {
        self.read_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_initialize_probability(mut self, probability: f64) -> Self {
        self.initialize_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl Stimulus<u64> for RandomStimulus {
    fn next_inputs(&mut self, _cycle: u64) -> TickInputs<u64> {
        let write = if self.rng.gen_bool(self.write_probability) {
            let payload = self.next_payload & self.payload_mask;
            self.next_payload = self.next_payload.wrapping_add(1);
            Some(payload)
        } else {
            None
        };
        TickInputs {
            write,
            read: self.rng.gen_bool(self.read_probability),
            initialize: self.rng.gen_bool(self.initialize_probability),
        }
    }
}
