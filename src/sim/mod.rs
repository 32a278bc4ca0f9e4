//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only from the timestamps passed in
//! - Seeded RNG only
//! - Obstacles iterated in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, obstacle_collision, obstacle_hitbox, qubit_hitbox};
pub use spawn::{spawn_interval_ms, spawn_obstacle};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Qubit, QubitState, Track,
};
pub use tick::{TickInput, activate, start, tick};
