use crate::core::components::counter::CounterController;
use crate::core::components::hazard::LatencyCompensated;
use crate::core::components::threshold::Thresholded;
use crate::core::components::traits::Controller;
use crate::core::components::wrap_bit::WrapBitController;
use crate::core::config::{ConfigError, ControllerKind, FifoConfig};

/// Build the controller described by `config`, decorated with threshold
/// flags when thresholds are configured.
pub fn build_controller(config: &FifoConfig) -> Result<Box<dyn Controller>, ConfigError> {
    config.validate()?;
    let base: Box<dyn Controller> = match config.kind {
        ControllerKind::Counter => Box::new(CounterController::new(config.capacity)),
        ControllerKind::WrapBit => Box::new(WrapBitController::new(config.capacity)),
        ControllerKind::LatencyCompensated => Box::new(LatencyCompensated::new(config.capacity)),
    };
    Ok(match config.thresholds {
        Some(thresholds) => Box::new(Thresholded::new(base, thresholds)),
        None => base,
    })
}
