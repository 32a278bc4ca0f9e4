//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active run
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Which of the two parallel tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    /// Upper track, qubit A
    A,
    /// Lower track, qubit B
    B,
}

/// Behavior state of a single qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QubitState {
    #[default]
    Normal,
    Jumping,
    Ducking,
}

/// One of the two entangled runners
#[derive(Debug, Clone, PartialEq)]
pub struct Qubit {
    /// Top edge of the standing hitbox (animated while jumping)
    pub y: f32,
    /// Resting `y` on this qubit's track
    pub baseline: f32,
    pub state: QubitState,
}

impl Qubit {
    pub fn new(baseline: f32) -> Self {
        Self {
            y: baseline,
            baseline,
            state: QubitState::Normal,
        }
    }

    /// Back to rest on the track
    pub fn reset(&mut self) {
        self.y = self.baseline;
        self.state = QubitState::Normal;
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        self.state == QubitState::Normal
    }

    #[inline]
    pub fn is_ducking(&self) -> bool {
        self.state == QubitState::Ducking
    }
}

/// Which track(s) an obstacle blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    High,
    Low,
    Both,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::High, ObstacleKind::Low, ObstacleKind::Both];

    /// Whether this obstacle stands on `track`
    pub fn threatens(self, track: Track) -> bool {
        matches!(
            (self, track),
            (ObstacleKind::High | ObstacleKind::Both, Track::A)
                | (ObstacleKind::Low | ObstacleKind::Both, Track::B)
        )
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub kind: ObstacleKind,
    /// Set once the obstacle is fully behind the qubits
    pub passed: bool,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session began
    Started,
    /// The shared action fired (A jumps, B ducks)
    Action,
    Spawned { id: u32, kind: ObstacleKind },
    Passed { id: u32 },
    Collision { id: u32, track: Track },
    NewHighScore { score: u64 },
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// Best score across sessions (seeded from storage by the engine)
    pub high_score: u64,
    /// Scroll speed, pixels per frame
    pub game_speed: f64,
    /// Upper track
    pub qubit_a: Qubit,
    /// Lower track
    pub qubit_b: Qubit,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Timestamp (ms) of the last action; shared by both qubits
    pub action_start: f64,
    /// Timestamp (ms) of the last spawn; `None` until the first spawn of a session
    pub last_spawn: Option<f64>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state sitting on the menu
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            game_speed: tuning.initial_speed,
            qubit_a: Qubit::new(tuning.track_a_y),
            qubit_b: Qubit::new(tuning.track_b_y),
            obstacles: Vec::new(),
            action_start: 0.0,
            last_spawn: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 0,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the finished session set (or tied) the best score
    pub fn is_new_high_score(&self) -> bool {
        self.phase == GamePhase::GameOver && self.score >= self.high_score
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_menu() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.game_speed, tuning.initial_speed);
        assert_eq!(state.qubit_a.y, tuning.track_a_y);
        assert_eq!(state.qubit_b.y, tuning.track_b_y);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_kind_threatens() {
        assert!(ObstacleKind::High.threatens(Track::A));
        assert!(!ObstacleKind::High.threatens(Track::B));
        assert!(!ObstacleKind::Low.threatens(Track::A));
        assert!(ObstacleKind::Low.threatens(Track::B));
        assert!(ObstacleKind::Both.threatens(Track::A));
        assert!(ObstacleKind::Both.threatens(Track::B));
    }

    #[test]
    fn test_new_high_score_only_after_game_over() {
        let mut state = GameState::new(1, &Tuning::default());
        assert!(!state.is_new_high_score());
        state.phase = GamePhase::GameOver;
        state.score = 20;
        state.high_score = 20;
        assert!(state.is_new_high_score());
        state.high_score = 21;
        assert!(!state.is_new_high_score());
    }

    #[test]
    fn test_ids_increase() {
        let mut state = GameState::new(1, &Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
