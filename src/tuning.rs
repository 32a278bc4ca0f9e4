//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Overrides are plain JSON and
//! may be partial; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::highscore::ScoreStore;

/// Gameplay and layout constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size in pixels
    pub canvas_width: f32,
    pub canvas_height: f32,

    /// Top edge of each qubit's resting hitbox
    pub track_a_y: f32,
    pub track_b_y: f32,

    /// Fixed horizontal position of both qubits (left edge)
    pub qubit_x: f32,
    /// Qubit width and standing height
    pub qubit_size: f32,
    /// Hitbox height while ducking
    pub qubit_duck_height: f32,

    /// Peak rise of qubit A's jump
    pub jump_height: f32,
    pub jump_duration_ms: f64,
    pub duck_duration_ms: f64,

    pub obstacle_width: f32,
    pub obstacle_height: f32,

    /// Scroll speed in pixels per frame at session start
    pub initial_speed: f64,
    /// Added to the scroll speed every Playing frame
    pub speed_increment: f64,

    /// Spawn interval at score 0
    pub spawn_interval_max_ms: f64,
    /// Spawn interval floor
    pub spawn_interval_min_ms: f64,
    /// Interval shrink per point of score
    pub spawn_interval_per_point_ms: f64,

    /// Bonus for each obstacle that scrolls past the qubits
    pub pass_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        let canvas_height = 500.0;
        let ground_y = canvas_height - 60.0;
        Self {
            canvas_width: 800.0,
            canvas_height,
            track_a_y: ground_y - 120.0,
            track_b_y: ground_y - 20.0,
            qubit_x: 100.0,
            qubit_size: 30.0,
            qubit_duck_height: 15.0,
            jump_height: 60.0,
            jump_duration_ms: 400.0,
            duck_duration_ms: 400.0,
            obstacle_width: 20.0,
            obstacle_height: 40.0,
            initial_speed: 5.0,
            speed_increment: 0.0005,
            spawn_interval_max_ms: 2000.0,
            spawn_interval_min_ms: 800.0,
            spawn_interval_per_point_ms: 0.5,
            pass_bonus: 10,
        }
    }
}

impl Tuning {
    /// Storage key for overrides
    pub const STORAGE_KEY: &'static str = "entangledDashTuning";

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether the values can drive a session (positive sizes, durations and speed)
    pub fn is_valid(&self) -> bool {
        self.canvas_width > 0.0
            && self.canvas_height > 0.0
            && self.qubit_size > 0.0
            && self.qubit_duck_height > 0.0
            && self.qubit_duck_height <= self.qubit_size
            && self.jump_duration_ms > 0.0
            && self.duck_duration_ms >= 0.0
            && self.obstacle_width > 0.0
            && self.obstacle_height > 0.0
            && self.initial_speed > 0.0
            && self.speed_increment > 0.0
            && self.spawn_interval_min_ms > 0.0
            && self.spawn_interval_max_ms >= self.spawn_interval_min_ms
    }

    /// Load overrides from the key-value store, falling back to defaults
    pub fn load(store: &impl ScoreStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) if tuning.is_valid() => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Ok(_) => {
                log::warn!("Tuning overrides out of range, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Malformed tuning overrides ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Bottom edge of the resting qubits; obstacles stand on this line
    pub fn floor_a(&self) -> f32 {
        self.track_a_y + self.qubit_size
    }

    pub fn floor_b(&self) -> f32 {
        self.track_b_y + self.qubit_size
    }
}
