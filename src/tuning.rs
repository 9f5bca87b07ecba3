//! World tuning parameters
//!
//! A `Tuning` is fixed for the lifetime of a session. Defaults come from
//! `consts`; a JSON document may override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error produced while loading tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid tuning JSON
    Parse(serde_json::Error),
    /// The values parse but describe an unplayable world
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// World parameters that fully determine simulation behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub view_width: f32,
    pub view_height: f32,
    pub ground_height: f32,

    // === Avatar ===
    pub avatar_x: f32,
    pub avatar_radius: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub max_fall_speed: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub obstacle_speed: f32,
    pub spawn_interval: f32,
    pub gap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            ground_height: GROUND_HEIGHT,

            avatar_x: AVATAR_X,
            avatar_radius: AVATAR_RADIUS,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,

            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            gap_margin: GAP_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active tuning)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject worlds the simulation cannot play sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            (self.view_width, "view_width must be positive"),
            (self.view_height, "view_height must be positive"),
            (self.avatar_radius, "avatar_radius must be positive"),
            (self.max_fall_speed, "max_fall_speed must be positive"),
            (self.obstacle_width, "obstacle_width must be positive"),
            (self.gap_height, "gap_height must be positive"),
            (self.obstacle_speed, "obstacle_speed must be positive"),
            (self.spawn_interval, "spawn_interval must be positive"),
        ];
        for (value, reason) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(reason));
            }
        }

        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(TuningError::Invalid("gravity must be non-negative"));
        }
        if !(self.flap_impulse.is_finite() && self.flap_impulse < 0.0) {
            return Err(TuningError::Invalid("flap_impulse must point upward"));
        }
        if -self.flap_impulse > self.max_fall_speed {
            return Err(TuningError::Invalid(
                "flap_impulse magnitude exceeds max_fall_speed",
            ));
        }
        if !(self.ground_height >= 0.0 && self.gap_margin >= 0.0) {
            return Err(TuningError::Invalid("ground_height and gap_margin must be non-negative"));
        }
        if self.gap_center_min() > self.gap_center_max() {
            return Err(TuningError::Invalid("gap does not fit between ceiling and ground"));
        }
        if !(self.avatar_x > self.avatar_radius && self.avatar_x + self.avatar_radius < self.view_width) {
            return Err(TuningError::Invalid("avatar must sit inside the viewport"));
        }
        Ok(())
    }

    /// Y coordinate of the top of the ground band
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.view_height - self.ground_height
    }

    /// Lowest allowed gap center (closest to the ceiling)
    #[inline]
    pub fn gap_center_min(&self) -> f32 {
        self.gap_margin + self.gap_height / 2.0
    }

    /// Highest allowed gap center (closest to the ground)
    #[inline]
    pub fn gap_center_max(&self) -> f32 {
        self.ground_y() - self.gap_margin - self.gap_height / 2.0
    }

    /// X coordinate where new obstacles appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.view_width + self.obstacle_width
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_default_gap_range() {
        let t = Tuning::default();
        assert_eq!(t.gap_center_min(), 145.0);
        assert_eq!(t.gap_center_max(), 375.0);
        assert_eq!(t.spawn_x(), 472.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 0.0, "spawn_interval": 2.0 }"#).unwrap();
        assert_eq!(t.gravity, 0.0);
        assert_eq!(t.spawn_interval, 2.0);
        assert_eq!(t.view_width, VIEW_WIDTH);
        assert_eq!(t.flap_impulse, FLAP_IMPULSE);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_downward_flap() {
        let err = Tuning::from_json(r#"{ "flap_impulse": 300.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_flap_faster_than_terminal_speed() {
        let err = Tuning::from_json(r#"{ "flap_impulse": -900.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_gap_taller_than_play_area() {
        let err = Tuning::from_json(r#"{ "gap_height": 500.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let t = Tuning {
            obstacle_speed: 200.0,
            ..Default::default()
        };
        let back = Tuning::from_json(&t.to_json().unwrap()).unwrap();
        assert_eq!(back, t);
    }
}
