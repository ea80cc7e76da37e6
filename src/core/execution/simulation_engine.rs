use crate::core::config::FifoConfig;
use crate::core::execution::config::{ConcurrencyMode, SimulationConfig};
use crate::core::execution::fifo::Fifo;
use crate::core::execution::scoreboard::{Scoreboard, Violation};
use crate::core::execution::stimulus::{RandomStimulus, Stimulus};
use crate::core::memory::store::MemoryData;
use crate::core::types::{TickInputs, TickOutputs};
use log::{debug, info};
use rayon::prelude::*;

/// Inputs and outputs of one simulated tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickRecord<T> {
    pub cycle: u64,
    pub inputs: TickInputs<T>,
    pub outputs: TickOutputs<T>,
}

/// Observer notified after every tick.
pub trait TickObserver<T> {
    fn on_tick(&mut self, record: &TickRecord<T>);
}

/// Drives a [`Fifo`] from a stimulus source for a bounded number of ticks.
pub struct SimulationEngine<'a, T: MemoryData> {
    fifo: Fifo<T>,
    max_cycles: Option<u64>,
    observers: Vec<&'a mut dyn TickObserver<T>>,
    trace: Option<Vec<TickRecord<T>>>,
}

impl<'a, T: MemoryData + std::fmt::Debug> SimulationEngine<'a, T> {
    pub fn new(fifo: Fifo<T>, max_cycles: Option<u64>) -> Self {
        Self {
            fifo,
            max_cycles,
            observers: Vec::new(),
            trace: None,
        }
    }

    /// Keep every tick record for inspection after the run.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    pub fn add_observer(&mut self, observer: &'a mut dyn TickObserver<T>) {
        self.observers.push(observer);
    }

    /// Apply one tick of inputs.
    pub fn step(&mut self, inputs: TickInputs<T>) -> TickOutputs<T> {
        let cycle = self.fifo.current_cycle();
        debug!("=== Tick {} ===", cycle);
        let outputs = self.fifo.tick(inputs.clone());
        debug!(
            "[{}] wr={} rd={} init={} -> accepted wr={} rd={} payload={:?} flags={:?} occupancy={}",
            self.fifo.controller_name(),
            inputs.write.is_some(),
            inputs.read,
            inputs.initialize,
            outputs.write_accepted,
            outputs.read_accepted,
            outputs.read_payload,
            outputs.flags,
            outputs.occupancy
        );

        if !self.observers.is_empty() || self.trace.is_some() {
            let record = TickRecord {
                cycle,
                inputs,
                outputs: outputs.clone(),
            };
            for observer in self.observers.iter_mut() {
                observer.on_tick(&record);
            }
            if let Some(trace) = self.trace.as_mut() {
                trace.push(record);
            }
        }
        outputs
    }

    /// Run until `max_cycles` ticks have elapsed in total.
    ///
    /// Without a cycle limit there is no natural end to a stimulus stream, so
    /// an unbounded engine refuses to run.
    pub fn run(&mut self, stimulus: &mut dyn Stimulus<T>) -> Result<u64, String> {
        let max = self
            .max_cycles
            .ok_or_else(|| "Simulation engine has no cycle limit".to_string())?;
        while self.current_cycle() < max {
            let inputs = stimulus.next_inputs(self.current_cycle());
            self.step(inputs);
        }
        Ok(self.current_cycle())
    }

    pub fn current_cycle(&self) -> u64 {
        self.fifo.current_cycle()
    }

    pub fn fifo(&self) -> &Fifo<T> {
        &self.fifo
    }

    pub fn trace(&self) -> Option<&[TickRecord<T>]> {
        self.trace.as_deref()
    }
}

/// One independent run of a batch sweep.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub config: FifoConfig,
    pub seed: u64,
    pub cycles: u64,
    pub write_probability: f64,
    pub read_probability: f64,
}

impl BatchJob {
    pub fn new(config: FifoConfig, seed: u64, cycles: u64) -> Self {
        Self {
            config,
            seed,
            cycles,
            write_probability: 0.5,
            read_probability: 0.5,
        }
    }

    pub fn with_probabilities(mut self, write: f64, read: f64) -> Self {
        self.write_probability = write;
        self.read_probability = read;
        self
    }
}

/// Scoreboard summary of one batch job.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub config: FifoConfig,
    pub seed: u64,
    pub cycles: u64,
    pub writes_accepted: u64,
    pub reads_accepted: u64,
    pub requests_dropped: u64,
    pub violations: Vec<Violation>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

fn run_job(job: &BatchJob) -> Result<BatchReport, String> {
    let fifo = Fifo::<u64>::new(&job.config).map_err(|e| e.to_string())?;
    let mut scoreboard = Scoreboard::new(job.config.capacity, job.config.thresholds);
    let mut stimulus = RandomStimulus::new(job.seed, job.config.payload_mask())
        .with_write_probability(job.write_probability)
        .with_read_probability(job.read_probability);
    let cycles = {
        let mut engine = SimulationEngine::new(fifo, Some(job.cycles));
        engine.add_observer(&mut scoreboard);
        engine.run(&mut stimulus)?
    };
    Ok(BatchReport {
        config: job.config.clone(),
        seed: job.seed,
        cycles,
        writes_accepted: scoreboard.writes_accepted(),
        reads_accepted: scoreboard.reads_accepted(),
        requests_dropped: scoreboard.requests_dropped(),
        violations: scoreboard.violations().to_vec(),
    })
}

/// Run independent scoreboarded jobs, sequentially or on a rayon pool.
///
/// Reports come back in job order regardless of concurrency mode.
pub fn run_batch(config: &SimulationConfig, jobs: &[BatchJob]) -> Result<Vec<BatchReport>, String> {
    let reports = match config.concurrency_mode {
        ConcurrencyMode::Sequential => jobs.iter().map(run_job).collect::<Result<Vec<_>, _>>()?,
        ConcurrencyMode::Rayon => {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(size) = config.thread_pool_size {
                builder = builder.num_threads(size);
            }
            let pool = builder.build().map_err(|e| e.to_string())?;
            pool.install(|| jobs.par_iter().map(run_job).collect::<Result<Vec<_>, _>>())?
        }
    };
    let dirty = reports.iter().filter(|r| !r.is_clean()).count();
    info!(
        "Batch finished: {} jobs, {} with violations ({:?})",
        reports.len(),
        dirty,
        config.concurrency_mode
    );
    Ok(reports)
}
