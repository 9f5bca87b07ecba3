//! Browser bindings
//!
//! The page owns the canvas, the input listeners and the
//! `requestAnimationFrame` loop; it forwards them here and reads state back
//! for drawing.

use wasm_bindgen::prelude::*;

use crate::persistence::WebStore;
use crate::session::{Session, SessionPhase};
use crate::sim::wants_flap;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Skyflap starting...");
}

/// A game instance driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session<WebStore>,
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game. `tuning_json` may override world parameters; invalid
    /// tuning is logged and replaced with defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let seed: u64 = rand::random();
        let session = Session::new(seed, tuning, WebStore).unwrap_or_else(|e| {
            log::warn!("{}; using default tuning", e);
            Session::with_default_tuning(seed, WebStore)
        });
        WebGame {
            session,
            idle_mode: false,
        }
    }

    /// Flap, or start a run when none is in progress
    pub fn press(&mut self) {
        self.session.press();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Let the autopilot play (attract screen)
    pub fn set_idle_mode(&mut self, on: bool) {
        self.idle_mode = on;
        log::info!("Idle mode: {}", on);
    }

    /// Advance one animation frame. `dt_ms` is the raw frame delta.
    /// Returns true when the run ended during this frame.
    pub fn frame(&mut self, dt_ms: f64) -> bool {
        if self.idle_mode {
            if self.session.phase() != SessionPhase::Playing {
                self.session.restart();
            } else if wants_flap(&self.session.state) {
                self.session.press();
            }
        }
        self.session.frame((dt_ms / 1000.0) as f32).ended
    }

    /// Seed of this game's obstacle layout (for sharing a replayable run)
    pub fn seed(&self) -> u64 {
        self.session.seed()
    }

    pub fn score(&self) -> u32 {
        self.session.scores.score
    }

    pub fn best(&self) -> u32 {
        self.session.scores.best
    }

    pub fn running(&self) -> bool {
        self.session.state.running
    }

    /// "ready", "playing" or "game_over"
    pub fn phase(&self) -> String {
        match self.session.phase() {
            SessionPhase::Ready => "ready",
            SessionPhase::Playing => "playing",
            SessionPhase::GameOver => "game_over",
        }
        .to_string()
    }

    pub fn avatar_y(&self) -> f32 {
        self.session.state.avatar.y
    }

    pub fn avatar_tilt(&self) -> f32 {
        self.session.state.tilt()
    }

    pub fn wing_phase(&self) -> f32 {
        self.session.state.wing_phase()
    }

    /// Live obstacles as a JSON array of `{x, gap_center, scored}`
    pub fn obstacles_json(&self) -> String {
        serde_json::to_string(&self.session.state.obstacles).unwrap_or_else(|e| {
            log::error!("Cannot serialize obstacles: {}", e);
            "[]".to_string()
        })
    }

    /// Active tuning as JSON, so the page can size its canvas and sprites
    pub fn tuning_json(&self) -> String {
        self.session.state.tuning.to_json().unwrap_or_else(|e| {
            log::error!("{}", e);
            "{}".to_string()
        })
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new(None)
    }
}
