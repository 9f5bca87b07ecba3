//! Per-frame simulation step
//!
//! `advance` is the only path that moves the world forward. `flap` and
//! `reset` are input-side mutations applied between frames.

use super::collision::{Boundary, boundary_contact, cleared, hits_obstacle};
use super::state::SimState;

/// Why a run ended. Only logged; callers just see the terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndCause {
    Obstacle,
    Ceiling,
    Ground,
}

/// Start a new run. With `initial_impulse` the avatar leaves the start
/// position already flapping.
pub fn reset(state: &mut SimState, initial_impulse: bool) {
    let t = state.tuning;
    state.avatar.y = t.view_height / 2.0;
    state.avatar.vel = if initial_impulse { t.flap_impulse } else { 0.0 };
    state.obstacles.clear();
    state.spawn_timer = 0.0;
    state.anim_time = 0.0;
    state.running = true;
    log::info!("Run started (impulse: {})", initial_impulse);
}

/// Override vertical velocity with the flap impulse. Ignored when idle.
pub fn flap(state: &mut SimState) {
    if state.running {
        state.avatar.vel = state.tuning.flap_impulse;
    }
}

/// Advance the simulation by `dt` seconds
///
/// `on_score` fires once per obstacle cleared; `on_terminal` fires once when
/// the run ends. Non-positive or non-finite `dt` leaves the state untouched.
pub fn advance<S, T>(state: &mut SimState, dt: f32, mut on_score: S, mut on_terminal: T)
where
    S: FnMut(),
    T: FnMut(),
{
    if !state.running {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    let t = state.tuning;
    state.spawn_timer += dt;
    state.anim_time += dt;

    // Gravity with terminal velocity
    state.avatar.vel = (state.avatar.vel + t.gravity * dt).min(t.max_fall_speed);
    state.avatar.y += state.avatar.vel * dt;

    // Obstacles spawned this frame start scrolling next frame
    let settled = state.obstacles.len();
    if state.spawn_timer >= t.spawn_interval {
        state.spawn_timer -= t.spawn_interval;
        state.spawn_obstacle();
    }

    let y = state.avatar.y;
    let mut crashed = false;
    for obstacle in &mut state.obstacles[..settled] {
        obstacle.x -= t.obstacle_speed * dt;

        if !obstacle.scored && cleared(obstacle, &t) {
            obstacle.scored = true;
            on_score();
        }

        if hits_obstacle(y, obstacle, &t) {
            crashed = true;
            break;
        }
    }
    if crashed {
        terminate(state, EndCause::Obstacle, &mut on_terminal);
        return;
    }

    state.obstacles.retain(|o| o.right(t.obstacle_width) >= 0.0);

    match boundary_contact(state.avatar.y, &t) {
        Some(Boundary::Ceiling) => {
            state.avatar.y = t.avatar_radius;
            state.avatar.vel = 0.0;
            terminate(state, EndCause::Ceiling, &mut on_terminal);
        }
        Some(Boundary::Ground) => {
            state.avatar.y = t.ground_y() - t.avatar_radius;
            state.avatar.vel = 0.0;
            terminate(state, EndCause::Ground, &mut on_terminal);
        }
        None => {}
    }
}

fn terminate<T: FnMut()>(state: &mut SimState, cause: EndCause, on_terminal: &mut T) {
    if !state.running {
        return;
    }
    state.running = false;
    log::debug!("Run ended: {:?} at y={:.1}", cause, state.avatar.y);
    on_terminal();
}
