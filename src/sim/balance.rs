//! Torque and weight aggregation over the placed weight set

use serde::{Deserialize, Serialize};

use super::state::WeightEntity;
use crate::consts::{ANGLE_DIV, MAX_ANGLE};

/// Per-side torque and weight totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceTotals {
    pub left_torque: f32,
    pub right_torque: f32,
    pub left_weight: u32,
    pub right_weight: u32,
}

impl BalanceTotals {
    pub fn total_weight(&self) -> u32 {
        self.left_weight + self.right_weight
    }
}

/// Aggregate torque (`weight * |offset|`) and weight per side. Pure and
/// O(n); an empty collection yields all-zero totals. Offsets of exactly
/// zero never reach this point - placement clamps magnitude to at least 1.
pub fn compute(objects: &[WeightEntity]) -> BalanceTotals {
    let mut totals = BalanceTotals::default();
    for obj in objects {
        let distance = obj.offset_x.abs();
        if obj.offset_x < 0.0 {
            totals.left_torque += obj.weight as f32 * distance;
            totals.left_weight += obj.weight as u32;
        } else {
            totals.right_torque += obj.weight as f32 * distance;
            totals.right_weight += obj.weight as u32;
        }
    }
    totals
}

/// Target tilt derived from the torque imbalance, clamped to ±MAX_ANGLE
pub fn target_angle(totals: &BalanceTotals) -> f32 {
    ((totals.right_torque - totals.left_torque) / ANGLE_DIV).clamp(-MAX_ANGLE, MAX_ANGLE)
}
