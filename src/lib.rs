//! Entangled Dash - two qubits, one action
//!
//! Core modules:
//! - `sim`: Pure game simulation (state machine, action timing, spawning, collisions)
//! - `engine`: Owned engine binding the simulation to high-score storage
//! - `render`: Scene composition and the WebGPU pipeline
//! - `platform`: Input routing and frame-loop plumbing
//! - `highscore`: Best-score persistence
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod highscore;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use highscore::{MemoryStore, ScoreStore};
pub use tuning::Tuning;
