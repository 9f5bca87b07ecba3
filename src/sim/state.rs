//! Simulation state and core types
//!
//! Everything `advance` reads or writes lives in `SimState`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A scrolling obstacle: a full-height column with a gap cut into it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge (pixels); decreases every tick
    pub x: f32,
    /// Vertical center of the gap, fixed at spawn
    pub gap_center: f32,
    /// Set once the avatar has cleared this obstacle
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_center: f32) -> Self {
        Self {
            x,
            gap_center,
            scored: false,
        }
    }

    /// Right (trailing) edge
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Top edge of the gap
    #[inline]
    pub fn gap_top(&self, gap_height: f32) -> f32 {
        self.gap_center - gap_height / 2.0
    }

    /// Bottom edge of the gap
    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_center + gap_height / 2.0
    }
}

/// The player's avatar. Horizontal position is fixed by the tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    /// Vertical center (pixels, down is positive)
    pub y: f32,
    /// Vertical velocity (pixels/s, negative = rising)
    pub vel: f32,
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from; replaying a session needs only this,
    /// the tuning and the inputs
    pub seed: u64,
    /// World parameters for this session
    pub tuning: Tuning,
    pub avatar: Avatar,
    /// Live obstacles in spawn order (also left-to-right order)
    pub obstacles: Vec<Obstacle>,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Whether a run is in progress
    pub running: bool,
    /// Seconds since the run started; drives cosmetic oscillation only
    pub anim_time: f32,
    /// Gap placement RNG
    rng: Pcg32,
}

impl SimState {
    /// Create an idle state (not running) with the given seed.
    /// `tuning` must pass `Tuning::validate`.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning: {:?}", tuning);
        Self {
            seed,
            tuning,
            avatar: Avatar {
                y: tuning.view_height / 2.0,
                vel: 0.0,
            },
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            running: false,
            anim_time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draw a gap center that keeps the gap clear of ceiling and ground
    pub fn roll_gap_center(&mut self) -> f32 {
        let lo = self.tuning.gap_center_min();
        let hi = self.tuning.gap_center_max();
        if hi > lo {
            self.rng.random_range(lo..=hi)
        } else {
            lo
        }
    }

    /// Append a fresh obstacle at the right edge of the viewport
    pub fn spawn_obstacle(&mut self) {
        let gap_center = self.roll_gap_center();
        let x = self.tuning.spawn_x();
        log::debug!("Spawned obstacle at x={} gap_center={:.1}", x, gap_center);
        self.obstacles.push(Obstacle::new(x, gap_center));
    }

    /// Wing flap oscillation in [-1, 1] for renderers
    pub fn wing_phase(&self) -> f32 {
        (self.anim_time * 18.0).sin()
    }

    /// Body tilt in radians: nose up while rising, nose down while falling
    pub fn tilt(&self) -> f32 {
        let t = self.avatar.vel / self.tuning.max_fall_speed;
        (t * std::f32::consts::FRAC_PI_2).clamp(-0.5, std::f32::consts::FRAC_PI_2)
    }
}
