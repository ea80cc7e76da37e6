use crate::core::types::ReadLatency;
use serde::{Deserialize, Serialize};

/// Which controller algorithm tracks occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    /// Explicit bounded counter; any capacity.
    Counter,
    /// Pointers with a generation bit; power-of-two capacity.
    WrapBit,
    /// Wrap-bit pointers plus phantom-empty for a registered-read store.
    LatencyCompensated,
}

impl ControllerKind {
    /// True for the variants built on generation-bit pointers.
    pub fn is_wrap_bit_family(&self) -> bool {
        matches!(self, ControllerKind::WrapBit | ControllerKind::LatencyCompensated)
    }

    /// The store read latency this controller is designed for.
    pub fn read_latency(&self) -> ReadLatency {
        match self {
            ControllerKind::Counter | ControllerKind::WrapBit => ReadLatency::Combinational,
            ControllerKind::LatencyCompensated => ReadLatency::Registered,
        }
    }

    /// Smallest supported capacity.
    ///
    /// A single-slot latency-compensated FIFO would hold phantom empty while
    /// full after every write, so it needs at least two slots.
    pub fn min_capacity(&self) -> usize {
        match self {
            ControllerKind::LatencyCompensated => 2,
            _ => 1,
        }
    }
}

impl Default for ControllerKind {
    fn default() -> Self {
        ControllerKind::Counter
    }
}

/// Almost-full / almost-empty thresholds.
///
/// `almost_full` asserts while occupancy is strictly above `upper`,
/// `almost_empty` while it is strictly below `lower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub upper: usize,
    pub lower: usize,
}

impl Thresholds {
    pub fn new(upper: usize, lower: usize) -> Self {
        Self { upper, lower }
    }

    /// Checks `0 <= lower <= upper <= capacity`.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        for threshold in [self.upper, self.lower] {
            if threshold > capacity {
                return Err(ConfigError::ThresholdOutOfRange { threshold, capacity });
            }
        }
        if self.lower > self.upper {
            return Err(ConfigError::InvertedThresholds {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

/// Construction-time configuration of one FIFO instance.
///
/// Fixed for the lifetime of the instance; there is no resize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FifoConfig {
    /// Payload width in bits. Opaque to the controller.
    pub payload_width: u32,
    pub capacity: usize,
    #[serde(default)]
    pub kind: ControllerKind,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

impl FifoConfig {
    /// Counter controller, no thresholds.
    pub fn new(payload_width: u32, capacity: usize) -> Self {
        Self {
            payload_width,
            capacity,
            kind: ControllerKind::default(),
            thresholds: None,
        }
    }

    pub fn with_kind(mut self, kind: ControllerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_thresholds(mut self, upper: usize, lower: usize) -> Self {
        self.thresholds = Some(Thresholds::new(upper, lower));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.payload_width == 0 || self.payload_width > 64 {
            return Err(ConfigError::InvalidPayloadWidth(self.payload_width));
        }
        if self.kind.is_wrap_bit_family() && !self.capacity.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo(self.capacity));
        }
        let minimum = self.kind.min_capacity();
        if self.capacity < minimum {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity,
                minimum,
            });
        }
        if let Some(thresholds) = &self.thresholds {
            thresholds.validate(self.capacity)?;
        }
        Ok(())
    }

    pub fn read_latency(&self) -> ReadLatency {
        self.kind.read_latency()
    }

    /// Mask selecting the low `payload_width` bits.
    pub fn payload_mask(&self) -> u64 {
        if self.payload_width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.payload_width) - 1
        }
    }
}

/// Structural configuration errors, reported once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroCapacity,
    InvalidPayloadWidth(u32),
    /// The wrap-bit family needs a power-of-two capacity.
    CapacityNotPowerOfTwo(usize),
    ThresholdOutOfRange { threshold: usize, capacity: usize },
    InvertedThresholds { lower: usize, upper: usize },
    /// Controller and store disagree on read latency.
    LatencyMismatch { controller: ReadLatency, store: ReadLatency },
    /// Store has fewer slots than the controller addresses.
    StoreTooSmall { slots: usize, capacity: usize },
    /// Below the smallest capacity the controller kind supports.
    CapacityTooSmall { capacity: usize, minimum: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "Capacity must be at least 1"),
            ConfigError::InvalidPayloadWidth(width) => {
                write!(f, "Payload width {} outside 1..=64 bits", width)
            }
            ConfigError::CapacityNotPowerOfTwo(capacity) => write!(
                f,
                "Capacity {} is not a power of two, required by wrap-bit controllers",
                capacity
            ),
            ConfigError::ThresholdOutOfRange { threshold, capacity } => {
                write!(f, "Threshold {} exceeds capacity {}", threshold, capacity)
            }
            ConfigError::InvertedThresholds { lower, upper } => write!(
                f,
                "Lower threshold {} is above upper threshold {}",
                lower, upper
            ),
            ConfigError::LatencyMismatch { controller, store } => write!(
                f,
                "Controller expects {:?} store reads but store is {:?}",
                controller, store
            ),
            ConfigError::StoreTooSmall { slots, capacity } => write!(
                f,
                "Store holds {} slots but controller addresses {}",
                slots, capacity
            ),
            ConfigError::CapacityTooSmall { capacity, minimum } => write!(
                f,
                "Capacity {} is below the minimum of {} for this controller",
                capacity, minimum
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
