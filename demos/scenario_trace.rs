//! Replays the reference FIFO scenarios on every controller variant and
//! finishes with a scoreboarded random sweep.
//!
//! Run with `RUST_LOG=debug` to see every tick.
use fifosim::core::execution::config::{ConcurrencyMode, SimulationConfig};
use fifosim::core::execution::simulation_engine::{run_batch, BatchJob, TickRecord};
use fifosim::core::execution::stimulus::ScriptedStimulus;
use fifosim::{ControllerKind, Fifo, FifoConfig, SimulationEngine, TickInputs};
use log::{info, LevelFilter};

const KINDS: [ControllerKind; 3] = [
    ControllerKind::Counter,
    ControllerKind::WrapBit,
    ControllerKind::LatencyCompensated,
];

fn replay(
    name: &str,
    config: &FifoConfig,
    script: Vec<TickInputs<u64>>,
) -> Result<Vec<TickRecord<u64>>, Box<dyn std::error::Error>> {
    let fifo = Fifo::<u64>::new(config)?;
    let mut engine = SimulationEngine::new(fifo, Some(script.len() as u64)).with_trace();
    engine.run(&mut ScriptedStimulus::new(script))?;
    let trace = engine.trace().map(|t| t.to_vec()).unwrap_or_default();
    let fifo = engine.fifo();

    println!(
        "--- {} on {} (capacity {}) ---",
        name,
        fifo.controller_name(),
        fifo.capacity()
    );
    println!("cycle  wr   rd  init | wr_ok rd_ok payload full empty ext af ae occ");
    for record in &trace {
        let out = &record.outputs;
        println!(
            "{:>5} {:>4} {:>3} {:>5} | {:>5} {:>5} {:>7} {:>4} {:>5} {:>3} {:>2} {:>2} {:>3}",
            record.cycle,
            record.inputs.write.map_or("-".to_string(), |v| v.to_string()),
            flag(record.inputs.read),
            flag(record.inputs.initialize),
            flag(out.write_accepted),
            flag(out.read_accepted),
            out.read_payload.map_or("-".to_string(), |v| v.to_string()),
            flag(out.flags.full),
            flag(out.flags.empty),
            flag(out.flags.empty_extend),
            out.flags.almost_full.map_or("-", flag),
            out.flags.almost_empty.map_or("-", flag),
            out.occupancy,
        );
    }
    println!("final occupancy {}, status {:?}", fifo.occupancy(), fifo.status());
    Ok(trace)
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn fill_and_drain() -> Vec<TickInputs<u64>> {
    let mut script = vec![TickInputs::initialize()];
    script.extend((0..9u64).map(TickInputs::write));
    script.extend(std::iter::repeat(TickInputs::read()).take(10));
    script
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .init();

    for kind in KINDS {
        let config = FifoConfig::new(4, 8).with_kind(kind);
        replay("fill, overflow, drain, underflow", &config, fill_and_drain())?;

        replay(
            "simultaneous requests from empty",
            &config,
            (0..4u64).map(TickInputs::write_read).collect(),
        )?;

        let thresholded = config.clone().with_thresholds(4, 2);
        replay(
            "almost-full above upper threshold",
            &thresholded,
            (0..6u64).map(TickInputs::write).collect(),
        )?;
    }

    replay(
        "write racing a registered read",
        &FifoConfig::new(4, 4).with_kind(ControllerKind::LatencyCompensated),
        vec![
            TickInputs::write(3),
            TickInputs::idle(),
            TickInputs::write_read(4),
            TickInputs::read(),
            TickInputs::read(),
        ],
    )?;

    let jobs: Vec<BatchJob> = KINDS
        .iter()
        .flat_map(|kind| {
            [2usize, 4, 8, 16].into_iter().map(move |capacity| {
                BatchJob::new(FifoConfig::new(8, capacity).with_kind(*kind), capacity as u64, 2_000)
                    .with_probabilities(0.55, 0.45)
            })
        })
        .collect();
    let reports = run_batch(
        &SimulationConfig::new().with_concurrency(ConcurrencyMode::Rayon),
        &jobs,
    )?;
    for report in &reports {
        info!(
            "{:?} capacity {:>2}: {} writes, {} reads, {} dropped, {} violations",
            report.config.kind,
            report.config.capacity,
            report.writes_accepted,
            report.reads_accepted,
            report.requests_dropped,
            report.violations.len()
        );
    }
    Ok(())
}
