pub mod counter;
pub mod factory;
pub mod hazard;
pub mod threshold;
pub mod traits;
pub mod wrap_bit;

// Re-export commonly used types
pub use counter::CounterController;
pub use factory::build_controller;
pub use hazard::LatencyCompensated;
pub use threshold::Thresholded;
pub use traits::Controller;
pub use wrap_bit::WrapBitController;
