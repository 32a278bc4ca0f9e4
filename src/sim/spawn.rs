//! Obstacle spawning and the spawn-rate difficulty ramp

use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Minimum time between spawns at `score`: shrinks linearly, floored
pub fn spawn_interval_ms(score: u64, tuning: &Tuning) -> f64 {
    let shrunk = tuning.spawn_interval_max_ms - score as f64 * tuning.spawn_interval_per_point_ms;
    shrunk.max(tuning.spawn_interval_min_ms)
}

/// Whether a spawn is due at `now`. The first frame of a session always spawns.
pub fn spawn_due(state: &GameState, tuning: &Tuning, now: f64) -> bool {
    match state.last_spawn {
        None => true,
        Some(last) => now - last >= spawn_interval_ms(state.score, tuning),
    }
}

/// Add one obstacle of random kind just beyond the right edge
pub fn spawn_obstacle(state: &mut GameState, tuning: &Tuning, now: f64) -> u32 {
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        x: tuning.canvas_width + tuning.obstacle_width,
        kind,
        passed: false,
    });
    state.last_spawn = Some(now);
    state.events.push(GameEvent::Spawned { id, kind });
    log::debug!("Spawned {:?} obstacle #{} (score {})", kind, id, state.score);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_ramp() {
        let t = Tuning::default();
        assert_eq!(spawn_interval_ms(0, &t), 2000.0);
        assert_eq!(spawn_interval_ms(1000, &t), 1500.0);
        assert_eq!(spawn_interval_ms(2400, &t), 800.0);
        assert_eq!(spawn_interval_ms(1_000_000, &t), 800.0);
    }

    #[test]
    fn test_due_on_interval_boundary() {
        let t = Tuning::default();
        let mut state = GameState::new(3, &t);
        assert!(spawn_due(&state, &t, 0.0));

        state.last_spawn = Some(1000.0);
        assert!(!spawn_due(&state, &t, 2999.0));
        assert!(spawn_due(&state, &t, 3000.0));
    }

    #[test]
    fn test_spawn_places_obstacle_offscreen() {
        let t = Tuning::default();
        let mut state = GameState::new(3, &t);
        let id = spawn_obstacle(&mut state, &t, 10.0);
        let o = &state.obstacles[0];
        assert_eq!(o.id, id);
        assert_eq!(o.x, t.canvas_width + t.obstacle_width);
        assert!(!o.passed);
        assert_eq!(state.last_spawn, Some(10.0));
    }

    #[test]
    fn test_all_kinds_appear() {
        let t = Tuning::default();
        let mut state = GameState::new(42, &t);
        for i in 0..200 {
            spawn_obstacle(&mut state, &t, i as f64);
        }
        for kind in ObstacleKind::ALL {
            assert!(state.obstacles.iter().any(|o| o.kind == kind));
        }
    }
}
