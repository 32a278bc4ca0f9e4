//! The game engine: owns the session state and its collaborators
//!
//! The host calls [`Engine::advance`] once per frame and forwards activation
//! key edges through [`Engine::press`] (or [`Engine::start`] /
//! [`Engine::activate`] directly). Rendering reads [`Engine::state`].

use crate::highscore::{self, ScoreStore};
use crate::platform::input::{Command, route_activation};
use crate::sim::{self, GameEvent, GamePhase, GameState, TickInput};
use crate::tuning::Tuning;

pub struct Engine<S: ScoreStore> {
    state: GameState,
    tuning: Tuning,
    store: S,
}

impl<S: ScoreStore> Engine<S> {
    /// Create an engine on the menu, seeding the best score from `store`
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let mut state = GameState::new(seed, &tuning);
        state.high_score = highscore::load(&store);
        Self {
            state,
            tuning,
            store,
        }
    }

    /// Start a session (from Menu or GameOver)
    pub fn start(&mut self) {
        sim::start(&mut self.state, &self.tuning);
    }

    /// The entangled action; ignored unless playing with both qubits at rest
    pub fn activate(&mut self, now: f64) {
        sim::activate(&mut self.state, now);
    }

    /// Activation key edge, routed by phase
    pub fn press(&mut self, now: f64) -> Command {
        let command = route_activation(self.state.phase);
        match command {
            Command::Start => self.start(),
            Command::Activate => self.activate(now),
        }
        command
    }

    /// One frame at timestamp `now` (ms)
    pub fn advance(&mut self, now: f64) {
        self.step(&TickInput::default(), now);
    }

    /// One frame with input edges folded in
    pub fn step(&mut self, input: &TickInput, now: f64) {
        let was_playing = self.state.phase == GamePhase::Playing;
        sim::tick(&mut self.state, input, &self.tuning, now);

        if was_playing && self.state.phase == GamePhase::GameOver {
            self.record_high_score();
        }
    }

    fn record_high_score(&mut self) {
        let score = self.state.score;
        if score > self.state.high_score {
            self.state.high_score = score;
            highscore::save(&mut self.store, score);
            self.state.events.push(GameEvent::NewHighScore { score });
            log::info!("New high score: {}", score);
        }
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Take events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::{HIGH_SCORE_KEY, MemoryStore};
    use crate::sim::{Obstacle, ObstacleKind};

    fn engine(store: MemoryStore) -> Engine<MemoryStore> {
        Engine::new(5, Tuning::default(), store)
    }

    /// Force a loss on the next frame with exactly `score` points afterwards
    fn lose_at(engine: &mut Engine<MemoryStore>, score: u64, now: f64) {
        let tuning = engine.tuning.clone();
        let state = &mut engine.state;
        state.score = score - 1;
        state.last_spawn = Some(now);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: tuning.qubit_x,
            kind: ObstacleKind::Low,
            passed: false,
        });
        engine.advance(now);
    }

    #[test]
    fn test_fresh_store_high_score_zero() {
        let e = engine(MemoryStore::new());
        assert_eq!(e.phase(), GamePhase::Menu);
        assert_eq!(e.state().high_score, 0);
    }

    #[test]
    fn test_malformed_store_high_score_zero() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots");
        let e = engine(store);
        assert_eq!(e.state().high_score, 0);
    }

    #[test]
    fn test_session_persists_high_score() {
        let mut e = engine(MemoryStore::new());
        e.start();
        lose_at(&mut e, 50, 100.0);

        assert_eq!(e.phase(), GamePhase::GameOver);
        assert_eq!(e.state().score, 50);
        assert_eq!(e.state().high_score, 50);
        assert_eq!(e.store.get(HIGH_SCORE_KEY).as_deref(), Some("50"));
        assert!(e.state().is_new_high_score());
        assert!(e.drain_events().contains(&GameEvent::NewHighScore { score: 50 }));
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "80");
        let mut e = engine(store);
        assert_eq!(e.state().high_score, 80);

        e.start();
        lose_at(&mut e, 30, 100.0);
        assert_eq!(e.state().high_score, 80);
        assert_eq!(e.store.get(HIGH_SCORE_KEY).as_deref(), Some("80"));
        assert!(!e.state().is_new_high_score());
    }

    #[test]
    fn test_press_routes_by_phase() {
        let mut e = engine(MemoryStore::new());
        assert_eq!(e.press(0.0), Command::Start);
        assert_eq!(e.phase(), GamePhase::Playing);

        assert_eq!(e.press(10.0), Command::Activate);
        assert!(!e.state().qubit_a.is_normal());

        lose_at(&mut e, 5, 20.0);
        assert_eq!(e.press(30.0), Command::Start);
        assert_eq!(e.phase(), GamePhase::Playing);
        assert_eq!(e.state().score, 0);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut e = engine(MemoryStore::new());
        e.start();
        lose_at(&mut e, 40, 100.0);
        e.start();
        assert_eq!(e.state().high_score, 40);
        assert_eq!(e.state().score, 0);
    }
}
