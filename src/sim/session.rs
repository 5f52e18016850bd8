//! The simulation session
//!
//! One constructed aggregate owns the live state, the undo/redo history,
//! the seeded RNG, and the presentation-layer busy flag. All mutators run
//! synchronously; the host drives `tick` on its own schedule and wires its
//! controls to the operations below.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::balance;
use super::history::HistoryManager;
use super::state::{ShapeType, SimState, SpeedSetting, WeightEntity, random_color};
use super::tick;
use crate::consts::*;

pub struct Session {
    state: SimState,
    history: HistoryManager,
    rng: Pcg32,
    /// Drop animation in flight; owned by the presentation layer and only
    /// honored here as a placement gate
    busy: bool,
}

fn draw_weight(rng: &mut Pcg32) -> u8 {
    rng.random_range(MIN_WEIGHT..=MAX_WEIGHT)
}

impl Session {
    /// Fresh session with the default beam width and a single initial
    /// history snapshot
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = SimState::new(DEFAULT_BEAM_WIDTH, draw_weight(&mut rng));
        let mut history = HistoryManager::new();
        history.push(state.clone());
        Self {
            state,
            history,
            rng,
            busy: false,
        }
    }

    /// Session resumed from a persisted history. Falls back to a fresh
    /// session when the history is empty.
    pub fn from_history(seed: u64, history: HistoryManager) -> Self {
        let mut session = Self::new(seed);
        if let Some(snapshot) = history.current().cloned() {
            session.history = history;
            session.restore(snapshot);
            log::info!(
                "resumed session with {} snapshot(s)",
                session.history.len()
            );
        }
        session
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current torque/weight totals, recomputed on demand for the host's
    /// readouts
    pub fn totals(&self) -> balance::BalanceTotals {
        balance::compute(&self.state.objects)
    }

    /// Advance the angle spring one step
    pub fn tick(&mut self) {
        tick::tick(&mut self.state);
    }

    /// Drop a weight at a signed offset from the pivot. Rejected while
    /// paused or while a drop animation is in flight. The offset is clamped
    /// to the plank and pushed off dead center; the weight is clamped to
    /// the weight domain. Returns the placed entity.
    pub fn place_weight(&mut self, weight: u8, offset_x: f32) -> Option<WeightEntity> {
        if self.state.is_paused || self.busy {
            return None;
        }
        if !offset_x.is_finite() {
            log::warn!("ignoring placement with non-finite offset");
            return None;
        }
        let weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        let half = self.state.beam_width / 2.0;
        let mut offset = offset_x.clamp(-half, half);
        if offset.abs() < MIN_OFFSET {
            offset = if offset < 0.0 { -MIN_OFFSET } else { MIN_OFFSET };
        }

        let color = random_color(&mut self.rng);
        let entity = WeightEntity::new(
            weight,
            offset,
            color,
            self.state.shape_type,
            self.state.beam_width,
        );
        let px = offset.abs().round() as i64;
        self.state.push_log(format!(
            "{weight}kg dropped on {side} side at {px}px from center",
            side = entity.side()
        ));
        self.state.objects.push(entity.clone());
        self.update_target_angle();
        self.state.next_weight = draw_weight(&mut self.rng);
        self.history.push(self.state.clone());
        Some(entity)
    }

    /// Drop the queued next weight (the click path)
    pub fn place_next(&mut self, offset_x: f32) -> Option<WeightEntity> {
        let weight = self.state.next_weight;
        self.place_weight(weight, offset_x)
    }

    /// Set the default shape and retroactively restyle every placed
    /// weight. Torque is unaffected.
    pub fn set_shape(&mut self, shape: ShapeType) {
        self.state.shape_type = shape;
        for obj in &mut self.state.objects {
            obj.shape = shape;
        }
        self.history.push(self.state.clone());
    }

    pub fn set_speed(&mut self, speed: SpeedSetting) {
        self.state.speed_setting = speed;
        self.history.push(self.state.clone());
    }

    /// Resize the plank. Only permitted while no weights are placed; the
    /// control should be disabled by the host, but the guard holds here
    /// regardless.
    pub fn set_beam_width(&mut self, width: f32) {
        if !self.state.objects.is_empty() {
            return;
        }
        if !(width.is_finite() && width > 0.0) {
            log::warn!("ignoring invalid beam width {width}");
            return;
        }
        self.state.beam_width = width;
        self.history.push(self.state.clone());
    }

    pub fn toggle_pause(&mut self) {
        self.state.is_paused = !self.state.is_paused;
        self.history.push(self.state.clone());
    }

    /// Presentation-layer drop-animation gate; not snapshotted
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Clear everything back to a fresh state and a single-snapshot
    /// history
    pub fn reset(&mut self) {
        self.state.objects.clear();
        self.state.angle = 0.0;
        self.state.target_angle = 0.0;
        self.state.angular_vel = 0.0;
        self.state.log.clear();
        self.state.next_weight = draw_weight(&mut self.rng);
        self.state.is_paused = false;
        self.busy = false;
        self.history.reset(self.state.clone());
        log::info!("simulation reset");
    }

    /// Step back in history and materialize the previous snapshot.
    /// Returns false at the lower bound.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Step forward in history and materialize the next snapshot. Returns
    /// false at the upper bound.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Materialize a snapshot into the live state, replacing the weight
    /// collection and every scalar field. Stored angles are trusted for
    /// continuity, but the target is re-derived from the torque totals as
    /// a consistency check whenever weights are present. Does not touch
    /// history.
    pub fn restore(&mut self, mut snapshot: SimState) {
        snapshot.rehydrate();
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&snapshot.next_weight) {
            snapshot.next_weight = draw_weight(&mut self.rng);
        }
        snapshot.angular_vel = 0.0;
        self.state = snapshot;
        if !self.state.objects.is_empty() {
            self.update_target_angle();
        }
        self.busy = false;
    }

    fn update_target_angle(&mut self) {
        let totals = balance::compute(&self.state.objects);
        self.state.target_angle = balance::target_angle(&totals);
    }
}
