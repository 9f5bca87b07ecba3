//! Skyflap entry point
//!
//! Native builds run a headless autopilot demo of the simulation; the
//! playable game is the web build (`web` module).
//!
//! Environment:
//! - `SKYFLAP_SEED`: run seed (random when unset)
//! - `SKYFLAP_TUNING`: path to a tuning JSON file
//! - `SKYFLAP_DATA_DIR`: where the best score is kept
//! - `SKYFLAP_RUNS`: number of demo runs (default 3)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyflap::persistence::FileStore;
    use skyflap::sim::wants_flap;
    use skyflap::{Session, SessionPhase, Tuning};

    env_logger::init();
    log::info!("Skyflap (native) starting...");

    let seed = env_parse::<u64>("SKYFLAP_SEED").unwrap_or_else(rand::random);
    let runs = env_parse::<u32>("SKYFLAP_RUNS").unwrap_or(3);
    let tuning = std::env::var_os("SKYFLAP_TUNING")
        .map(|path| Tuning::load_or_default(std::path::Path::new(&path)))
        .unwrap_or_default();
    let data_dir = std::env::var_os("SKYFLAP_DATA_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("skyflap"));

    log::info!("Best score kept in {}", data_dir.display());
    let mut session = match Session::new(seed, tuning, FileStore::new(data_dir)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    // Fixed 60 Hz frames; cap each run at five simulated minutes
    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    for _ in 0..runs {
        session.restart();
        let mut frames = 0;
        while session.phase() == SessionPhase::Playing && frames < MAX_FRAMES {
            if wants_flap(&session.state) {
                session.press();
            }
            session.frame(FRAME_DT);
            frames += 1;
        }
        println!(
            "run {} (seed {}): score {} in {:.1}s (best {})",
            session.runs(),
            session.seed(),
            session.scores.score,
            frames as f32 * FRAME_DT,
            session.scores.best
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
