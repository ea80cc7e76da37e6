pub mod config;
pub mod fifo;
pub mod scoreboard;
pub mod simulation_engine;
pub mod stimulus;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use fifo::Fifo;
pub use scoreboard::{Scoreboard, Violation};
pub use simulation_engine::{run_batch, BatchJob, BatchReport, SimulationEngine, TickObserver, TickRecord};
pub use stimulus::{RandomStimulus, ScriptedStimulus, Stimulus};
