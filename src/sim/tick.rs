//! Damped spring angle integrator
//!
//! Advances the tilt angle toward the target once per external tick
//! signal. The host owns the cadence; nothing here assumes a frame rate.

use super::state::SimState;
use crate::consts::STIFFNESS;

/// Advance the angle spring by one step. Paused states still accept the
/// tick and hold angle and velocity constant. The angle itself is not
/// clamped after integration; transient overshoot past the target is
/// expected and decays on subsequent ticks.
pub fn tick(state: &mut SimState) {
    if state.is_paused {
        return;
    }
    let diff = state.target_angle - state.angle;
    state.angular_vel += diff * STIFFNESS;
    state.angular_vel *= state.speed_setting.damping();
    state.angle += state.angular_vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SpeedSetting;

    #[test]
    fn test_paused_tick_is_noop() {
        let mut state = SimState::default();
        state.target_angle = 20.0;
        state.angle = 5.0;
        state.angular_vel = 1.0;
        state.is_paused = true;
        tick(&mut state);
        assert_eq!(state.angle, 5.0);
        assert_eq!(state.angular_vel, 1.0);
    }

    #[test]
    fn test_converges_to_target() {
        let mut state = SimState::default();
        state.target_angle = 10.0;
        for _ in 0..2000 {
            tick(&mut state);
        }
        assert!((state.angle - 10.0).abs() < 0.1, "angle = {}", state.angle);
    }

    #[test]
    fn test_first_step_moves_toward_target() {
        let mut state = SimState::default();
        state.target_angle = -30.0;
        tick(&mut state);
        assert!(state.angle < 0.0);
        assert!(state.angle > -30.0);
    }

    #[test]
    fn test_damping_follows_speed_setting() {
        let mut slow = SimState::default();
        slow.speed_setting = SpeedSetting::Slow;
        slow.target_angle = 10.0;
        let mut fast = SimState::default();
        fast.speed_setting = SpeedSetting::Fast;
        fast.target_angle = 10.0;
        for _ in 0..50 {
            tick(&mut slow);
            tick(&mut fast);
        }
        assert!(fast.angle > slow.angle);
    }

    #[test]
    fn test_stays_finite_under_retargeting() {
        let mut state = SimState::default();
        for i in 0..500 {
            state.target_angle = if i % 2 == 0 { 30.0 } else { -30.0 };
            tick(&mut state);
            assert!(state.angle.is_finite());
        }
    }
}
