//! Frame driver
//!
//! Owns the simulation, the scoreboard and the best-score store, and is the
//! one place where platform input and frame timing meet the simulation.

use crate::consts::MAX_FRAME_DT;
use crate::persistence::KeyValueStore;
use crate::scores::ScoreBoard;
use crate::sim::{SimState, advance, flap, reset};
use crate::tuning::{Tuning, TuningError};

/// Coarse state for the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No run started yet (title screen)
    Ready,
    /// A run is in progress
    Playing,
    /// The last run ended; waiting for input
    GameOver,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Obstacles cleared this frame
    pub points: u32,
    /// The run ended this frame
    pub ended: bool,
}

/// A play session: one simulation, many runs
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    pub state: SimState,
    pub scores: ScoreBoard,
    store: S,
    started: bool,
    runs: u32,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session. Fails if `tuning` describes an unplayable world.
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning, store))
    }

    /// Create a session with the built-in world parameters
    pub fn with_default_tuning(seed: u64, store: S) -> Self {
        Self::build(seed, Tuning::default(), store)
    }

    fn build(seed: u64, tuning: Tuning, store: S) -> Self {
        let scores = ScoreBoard::load(&store);
        log::info!("Session seed: {}", seed);
        Self {
            state: SimState::new(seed, tuning),
            scores,
            store,
            started: false,
            runs: 0,
        }
    }

    /// Seed the session's obstacle gaps are drawn from
    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    /// The single player button: flap while running, otherwise start a new
    /// run that begins with a flap.
    pub fn press(&mut self) {
        if self.state.running {
            flap(&mut self.state);
        } else {
            self.start_run(true);
        }
    }

    /// Start a new run from rest
    pub fn restart(&mut self) {
        self.start_run(false);
    }

    fn start_run(&mut self, initial_impulse: bool) {
        reset(&mut self.state, initial_impulse);
        self.scores.start_run();
        self.started = true;
        self.runs += 1;
    }

    /// Run one frame of `dt` seconds (clamped to `MAX_FRAME_DT`)
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let dt = clamp_frame_dt(dt);
        let mut points = 0;
        let mut ended = false;

        let scores = &mut self.scores;
        let store = &mut self.store;
        advance(
            &mut self.state,
            dt,
            || {
                if scores.record_point(store) {
                    log::debug!("New best: {}", scores.best);
                }
                points += 1;
            },
            || ended = true,
        );

        if ended {
            log::info!(
                "Run {} over: score {}, best {}",
                self.runs,
                self.scores.score,
                self.scores.best
            );
        }
        FrameReport { points, ended }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.state.running {
            SessionPhase::Playing
        } else if self.started {
            SessionPhase::GameOver
        } else {
            SessionPhase::Ready
        }
    }

    /// Number of runs started this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Clamp a wall-clock frame delta to something the simulation can take in
/// one step. Garbage becomes zero.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;

    fn session() -> Session<MemoryStore> {
        Session::with_default_tuning(2024, MemoryStore::new())
    }

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.016), 0.016);
        assert_eq!(clamp_frame_dt(3.0), MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(f32::INFINITY), MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(-1.0), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
    }

    #[test]
    fn test_phases() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Ready);
        s.frame(0.016);
        assert_eq!(s.phase(), SessionPhase::Ready);

        s.press();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.state.avatar.vel, FLAP_IMPULSE);

        let mut ended = 0;
        for _ in 0..400 {
            if s.frame(0.016).ended {
                ended += 1;
            }
        }
        assert_eq!(ended, 1);
        assert_eq!(s.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut s = session();
        s.restart();
        s.frame(10.0);
        // A single 10 s step would have spawned obstacles and hit the ground
        assert!(s.state.running);
        assert!(s.state.obstacles.is_empty());
        assert!((s.state.spawn_timer - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_press_after_game_over_starts_new_run() {
        let mut s = session();
        s.restart();
        s.scores.score = 4;
        while !s.frame(0.05).ended {}
        assert_eq!(s.phase(), SessionPhase::GameOver);

        s.press();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.scores.score, 0);
        assert_eq!(s.state.avatar.vel, FLAP_IMPULSE);
        assert_eq!(s.runs(), 2);
    }

    #[test]
    fn test_points_reach_scoreboard_and_store() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        let mut s = Session::new(5, tuning, MemoryStore::new()).unwrap();
        s.restart();

        let mut points = 0;
        for _ in 0..2000 {
            // Keep every gap lined up with the floating avatar
            let y = s.state.avatar.y;
            for o in &mut s.state.obstacles {
                o.gap_center = y;
            }
            points += s.frame(1.0 / 60.0).points;
            if points >= 3 {
                break;
            }
        }
        assert_eq!(points, 3);
        assert_eq!(s.scores.score, 3);
        assert_eq!(s.scores.best, 3);
        assert_eq!(s.store().get(BEST_SCORE_KEY).as_deref(), Some("3"));
    }

    #[test]
    fn test_best_survives_new_session() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "9");
        let s = Session::new(1, Tuning::default(), store).unwrap();
        assert_eq!(s.scores.best, 9);
        assert_eq!(s.scores.score, 0);
    }

    #[test]
    fn test_rejects_unplayable_tuning() {
        let downward_flap = Tuning {
            flap_impulse: 300.0,
            ..Default::default()
        };
        let err = Session::new(1, downward_flap, MemoryStore::new()).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let no_terminal_speed = Tuning {
            max_fall_speed: 0.0,
            ..Default::default()
        };
        assert!(Session::new(1, no_terminal_speed, MemoryStore::new()).is_err());
    }

    #[test]
    fn test_seed_is_kept_across_runs() {
        let mut a = session();
        let mut b = Session::with_default_tuning(a.seed(), MemoryStore::new());
        assert_eq!(a.seed(), 2024);
        for _ in 0..2 {
            a.restart();
            b.restart();
            for _ in 0..120 {
                a.frame(1.0 / 60.0);
                b.frame(1.0 / 60.0);
            }
        }
        assert_eq!(a.seed(), 2024);
        assert_eq!(a.state.avatar, b.state.avatar);
        assert_eq!(a.state.obstacles, b.state.obstacles);
    }
}
