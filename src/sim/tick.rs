//! Per-frame simulation step
//!
//! One call per displayed frame. Scroll speed and score advance per frame;
//! the jump and duck animations are driven by wall-clock timestamps.

use std::f64::consts::PI;

use super::collision::obstacle_collision;
use super::spawn::{spawn_due, spawn_obstacle};
use super::state::{GameEvent, GamePhase, GameState, Qubit, QubitState};
use crate::tuning::Tuning;

/// Input edges for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Begin (or restart) a session
    pub start: bool,
    /// The shared action: A jumps, B ducks
    pub activate: bool,
}

/// Reset everything session-scoped and enter Playing.
/// Ignored while a session is already running.
pub fn start(state: &mut GameState, tuning: &Tuning) {
    if state.phase == GamePhase::Playing {
        return;
    }

    state.score = 0;
    state.game_speed = tuning.initial_speed;
    state.qubit_a = Qubit::new(tuning.track_a_y);
    state.qubit_b = Qubit::new(tuning.track_b_y);
    state.obstacles.clear();
    state.last_spawn = None;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Started);
    log::info!("Session started (best {})", state.high_score);
}

/// Fire the entangled action. Only while Playing with both qubits at rest;
/// otherwise silently ignored.
pub fn activate(state: &mut GameState, now: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !state.qubit_a.is_normal() || !state.qubit_b.is_normal() {
        return;
    }

    state.qubit_a.state = QubitState::Jumping;
    state.qubit_b.state = QubitState::Ducking;
    state.action_start = now;
    state.events.push(GameEvent::Action);
}

/// Advance the game by one frame at timestamp `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, now: f64) {
    if input.start {
        start(state, tuning);
    }
    if input.activate {
        activate(state, now);
    }

    // Menu and game-over frames only render
    if state.phase != GamePhase::Playing {
        return;
    }

    state.game_speed += tuning.speed_increment;
    state.score += 1;

    let elapsed = now - state.action_start;
    animate_qubit(&mut state.qubit_a, elapsed, tuning);
    animate_qubit(&mut state.qubit_b, elapsed, tuning);

    if spawn_due(state, tuning, now) {
        spawn_obstacle(state, tuning, now);
    }

    let speed = state.game_speed as f32;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= speed;

        if let Some(track) =
            obstacle_collision(obstacle, &state.qubit_a, &state.qubit_b, tuning)
        {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::Collision {
                id: obstacle.id,
                track,
            });
            log::info!(
                "Decoherence: obstacle #{} hit track {:?} at score {}",
                obstacle.id,
                track,
                state.score
            );
            return;
        }

        if !obstacle.passed && obstacle.x + tuning.obstacle_width < tuning.qubit_x {
            obstacle.passed = true;
            state.score += tuning.pass_bonus;
            state.events.push(GameEvent::Passed { id: obstacle.id });
        }
    }

    state.obstacles.retain(|o| o.x > -tuning.obstacle_width);
}

/// Progress a qubit's action animation; `elapsed` is ms since the shared action start
fn animate_qubit(qubit: &mut Qubit, elapsed: f64, tuning: &Tuning) {
    match qubit.state {
        QubitState::Jumping => {
            let progress = (elapsed / tuning.jump_duration_ms).clamp(0.0, 1.0);
            if progress >= 1.0 {
                // Land exactly on the track, no residual offset from sin(π)
                qubit.reset();
            } else {
                let lift = (progress * PI).sin() as f32 * tuning.jump_height;
                qubit.y = qubit.baseline - lift;
            }
        }
        QubitState::Ducking => {
            if elapsed >= tuning.duck_duration_ms {
                qubit.reset();
            }
        }
        QubitState::Normal => {}
    }
}
