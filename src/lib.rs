//! Skyflap - a one-button gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions)
//! - `tuning`: Data-driven world parameters
//! - `scores`: Score and best-score tracking
//! - `persistence`: Key-value storage for the best score
//! - `session`: Frame driver wiring input, simulation and scores together

pub mod persistence;
pub mod scores;
pub mod session;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scores::ScoreBoard;
pub use session::{FrameReport, Session, SessionPhase};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEW_WIDTH: f32 = 400.0;
    pub const VIEW_HEIGHT: f32 = 600.0;
    /// Height of the ground band at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Avatar defaults - fixed horizontal position, circular hitbox
    pub const AVATAR_X: f32 = 110.0;
    pub const AVATAR_RADIUS: f32 = 16.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1500.0;
    /// Velocity set by a flap (negative = up)
    pub const FLAP_IMPULSE: f32 = -460.0;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 720.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 72.0;
    pub const GAP_HEIGHT: f32 = 170.0;
    pub const OBSTACLE_SPEED: f32 = 160.0;
    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 1.45;
    /// Minimum clearance between a gap and the ceiling / ground band
    pub const GAP_MARGIN: f32 = 60.0;

    /// Largest frame delta handed to the simulation (stalled tabs, debuggers)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "skyflap_best";
}
