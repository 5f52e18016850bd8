//! Simulation state and core types
//!
//! Everything that gets snapshotted for undo/redo and persistence lives
//! here. Field names serialize in the original record format (camelCase).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::size_from_weight;

/// Display shape for placed weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Circle,
    Square,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::Square => "square",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "circle" => Some(ShapeType::Circle),
            "square" => Some(ShapeType::Square),
            _ => None,
        }
    }
}

/// Animation speed preset; selects the spring damping coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedSetting {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedSetting {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedSetting::Slow => "slow",
            SpeedSetting::Medium => "medium",
            SpeedSetting::Fast => "fast",
        }
    }

    /// Parse a host-supplied string; anything unrecognized falls back to
    /// the medium default
    pub fn from_str(s: &str) -> Self {
        match s {
            "slow" => SpeedSetting::Slow,
            "fast" => SpeedSetting::Fast,
            _ => SpeedSetting::Medium,
        }
    }

    /// Velocity damping factor applied each tick
    pub fn damping(&self) -> f32 {
        match self {
            SpeedSetting::Slow => 0.1,
            SpeedSetting::Medium => 0.4,
            SpeedSetting::Fast => 0.7,
        }
    }
}

/// A placed weight. `shape` and `size` are presentation attributes derived
/// from the owning state and the weight, so they are not serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntity {
    /// Weight in kg, within the weight domain
    pub weight: u8,
    /// Signed distance from the pivot in px; negative is the left side
    pub offset_x: f32,
    /// Screen anchor along the plank (left edge of the rendered shape)
    #[serde(default)]
    pub x: f32,
    /// CSS color string, e.g. `hsl(210 68% 46%)`
    #[serde(default)]
    pub color: String,
    #[serde(skip)]
    pub shape: ShapeType,
    #[serde(skip)]
    pub size: f32,
}

impl WeightEntity {
    pub fn new(weight: u8, offset_x: f32, color: String, shape: ShapeType, beam_width: f32) -> Self {
        let weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        let size = size_from_weight(weight);
        let x = beam_width / 2.0 + offset_x - size / 2.0;
        Self {
            weight,
            offset_x,
            x,
            color,
            shape,
            size,
        }
    }

    /// Which side of the pivot this weight sits on
    pub fn side(&self) -> &'static str {
        if self.offset_x < 0.0 { "left" } else { "right" }
    }
}

/// Random weight color in the original palette: fixed saturation and
/// lightness, uniform hue
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    let hue: u16 = rng.random_range(0..360);
    format!("hsl({hue} 68% 46%)")
}

/// Complete simulation state - the unit that gets snapshotted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimState {
    /// Placed weights in drop order
    pub objects: Vec<WeightEntity>,
    /// Pre-drawn weight queued for the next placement
    pub next_weight: u8,
    /// Current tilt in degrees
    pub angle: f32,
    /// Tilt the spring is converging toward, in degrees
    pub target_angle: f32,
    /// Angular velocity of the spring; transient, reset on restore
    #[serde(skip)]
    pub angular_vel: f32,
    pub is_paused: bool,
    /// Default shape applied to new and existing weights
    pub shape_type: ShapeType,
    /// Plank length in px; only mutable while no weights are placed
    #[serde(alias = "plankWidth")]
    pub beam_width: f32,
    pub speed_setting: SpeedSetting,
    /// Human-readable event log, most recent first
    pub log: Vec<String>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            next_weight: MIN_WEIGHT,
            angle: 0.0,
            target_angle: 0.0,
            angular_vel: 0.0,
            is_paused: false,
            shape_type: ShapeType::default(),
            beam_width: DEFAULT_BEAM_WIDTH,
            speed_setting: SpeedSetting::default(),
            log: Vec::new(),
        }
    }
}

impl SimState {
    pub fn new(beam_width: f32, next_weight: u8) -> Self {
        Self {
            beam_width,
            next_weight,
            ..Self::default()
        }
    }

    /// Prepend a log entry, evicting the oldest past capacity
    pub fn push_log(&mut self, entry: String) {
        self.log.insert(0, entry);
        if self.log.len() > LOG_CAPACITY {
            self.log.pop();
        }
    }

    /// Recompute the derived entity attributes that snapshots and durable
    /// records do not carry: shape from the state default, size from the
    /// weight, and the screen anchor from the current beam width.
    pub fn rehydrate(&mut self) {
        for obj in &mut self.objects {
            obj.weight = obj.weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
            obj.shape = self.shape_type;
            obj.size = size_from_weight(obj.weight);
            obj.x = self.beam_width / 2.0 + obj.offset_x - obj.size / 2.0;
        }
    }
}
