//! Idle/demo controller
//!
//! Decides whether to flap this frame from the current state alone, so a
//! demo run is as deterministic as a recorded one.

use super::collision::cleared;
use super::state::SimState;

/// How far below the target line the avatar may sink before flapping
const SINK_ALLOWANCE: f32 = 22.0;

/// Height the autopilot steers toward: the next uncleared gap, or the
/// middle of the play area when no obstacle is ahead.
pub fn target_y(state: &SimState) -> f32 {
    let t = &state.tuning;
    state
        .obstacles
        .iter()
        .find(|o| !cleared(o, t))
        .map(|o| o.gap_center)
        .unwrap_or(t.ground_y() / 2.0)
}

/// True if the autopilot would press flap now
pub fn wants_flap(state: &SimState) -> bool {
    if !state.running {
        return false;
    }
    let target = target_y(state);
    state.avatar.y > target + SINK_ALLOWANCE && state.avatar.vel >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, advance, flap, reset};
    use crate::tuning::Tuning;

    #[test]
    fn test_never_flaps_when_idle() {
        let mut state = SimState::new(1, Tuning::default());
        state.avatar.y = 500.0;
        assert!(!wants_flap(&state));
    }

    #[test]
    fn test_targets_next_gap() {
        let mut state = SimState::new(1, Tuning::default());
        reset(&mut state, false);
        assert_eq!(target_y(&state), 260.0);

        // An obstacle whose trailing edge has passed the avatar is ignored
        state.obstacles.push(Obstacle::new(-60.0, 150.0));
        state.obstacles.push(Obstacle::new(250.0, 350.0));
        assert_eq!(target_y(&state), 350.0);
    }

    #[test]
    fn test_flaps_when_sinking_below_target() {
        let mut state = SimState::new(1, Tuning::default());
        reset(&mut state, false);
        state.avatar.y = 300.0;
        state.avatar.vel = 50.0;
        assert!(wants_flap(&state));
        state.avatar.vel = -50.0;
        assert!(!wants_flap(&state));
    }

    #[test]
    fn test_keeps_avatar_aloft_without_obstacles() {
        let mut state = SimState::new(8, Tuning::default());
        reset(&mut state, false);
        let mut ended = false;
        // One second: before the first obstacle can reach the avatar
        for _ in 0..60 {
            if wants_flap(&state) {
                flap(&mut state);
            }
            advance(&mut state, 1.0 / 60.0, || {}, || ended = true);
        }
        assert!(!ended);
        assert!(state.running);
    }
}
