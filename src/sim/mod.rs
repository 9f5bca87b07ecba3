//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::wants_flap;
pub use collision::{Boundary, boundary_contact, cleared, hits_obstacle};
pub use state::{Avatar, Obstacle, SimState};
pub use tick::{advance, flap, reset};
