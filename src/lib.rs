//! Seesaw Sim - an interactive balance simulator core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (torque totals, angle spring, undo/redo history)
//! - `persistence`: Durable snapshot record under a single storage key

pub mod persistence;
pub mod sim;

pub use sim::history::HistoryManager;
pub use sim::session::Session;
pub use sim::state::{ShapeType, SimState, SpeedSetting, WeightEntity};

/// Simulation tuning constants
pub mod consts {
    /// Maximum plank tilt in degrees; the target angle is clamped to ±this
    pub const MAX_ANGLE: f32 = 30.0;
    /// Divisor mapping torque difference to target degrees
    pub const ANGLE_DIV: f32 = 10.0;
    /// Spring stiffness for the angle integrator (per tick)
    pub const STIFFNESS: f32 = 0.02;

    /// Weight domain (kg)
    pub const MIN_WEIGHT: u8 = 1;
    pub const MAX_WEIGHT: u8 = 10;

    /// Rendered size at the weight domain endpoints (px)
    pub const MIN_SIZE: f32 = 26.0;
    pub const MAX_SIZE: f32 = 62.0;

    /// Beam width used when the host supplies none (px)
    pub const DEFAULT_BEAM_WIDTH: f32 = 640.0;
    /// Minimum drop distance from the pivot; dead-center drops are pushed
    /// out to this magnitude
    pub const MIN_OFFSET: f32 = 1.0;

    /// Event log capacity; the oldest entries are evicted past this
    pub const LOG_CAPACITY: usize = 100;

    /// Storage key for the durable history record
    pub const STORAGE_KEY: &str = "begum-kunac-seesaw";
}

/// Weight size interpolated linearly between the size endpoints, with the
/// weight clamped to the weight domain first
#[inline]
pub fn size_from_weight(weight: u8) -> f32 {
    let w = weight.clamp(consts::MIN_WEIGHT, consts::MAX_WEIGHT);
    consts::MIN_SIZE + ((w - 1) as f32 * (consts::MAX_SIZE - consts::MIN_SIZE)) / 9.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_endpoints() {
        assert_eq!(size_from_weight(1), consts::MIN_SIZE);
        assert_eq!(size_from_weight(10), consts::MAX_SIZE);
    }

    #[test]
    fn test_size_clamps_weight() {
        assert_eq!(size_from_weight(0), consts::MIN_SIZE);
        assert_eq!(size_from_weight(200), consts::MAX_SIZE);
    }

    #[test]
    fn test_size_monotonic() {
        let mut last = 0.0;
        for w in 1..=10u8 {
            let size = size_from_weight(w);
            assert!(size > last);
            last = size;
        }
    }
}
