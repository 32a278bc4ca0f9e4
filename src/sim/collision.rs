//! Hitboxes and overlap testing
//!
//! Screen space: x grows to the right, y grows downward. Every hitbox is an
//! axis-aligned rectangle; touching edges do not count as a hit.

use glam::Vec2;

use super::state::{Obstacle, Qubit, Track};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Grow by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            size: self.size + Vec2::splat(amount * 2.0),
        }
    }

    /// Strict intersection: shared edges are not an overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Current hitbox of a qubit. The top stays at `y`; ducking only shortens it.
pub fn qubit_hitbox(qubit: &Qubit, tuning: &Tuning) -> Rect {
    let height = if qubit.is_ducking() {
        tuning.qubit_duck_height
    } else {
        tuning.qubit_size
    };
    Rect::new(tuning.qubit_x, qubit.y, tuning.qubit_size, height)
}

/// Hitbox of an obstacle on `track`; it stands on the track floor
pub fn obstacle_hitbox(obstacle: &Obstacle, track: Track, tuning: &Tuning) -> Rect {
    let floor = match track {
        Track::A => tuning.floor_a(),
        Track::B => tuning.floor_b(),
    };
    Rect::new(
        obstacle.x,
        floor - tuning.obstacle_height,
        tuning.obstacle_width,
        tuning.obstacle_height,
    )
}

/// First track on which `obstacle` hits its qubit, checking A then B
pub fn obstacle_collision(
    obstacle: &Obstacle,
    qubit_a: &Qubit,
    qubit_b: &Qubit,
    tuning: &Tuning,
) -> Option<Track> {
    [(Track::A, qubit_a), (Track::B, qubit_b)]
        .into_iter()
        .filter(|(track, _)| obstacle.kind.threatens(*track))
        .find(|(track, qubit)| {
            qubit_hitbox(qubit, tuning).overlaps(&obstacle_hitbox(obstacle, *track, tuning))
        })
        .map(|(track, _)| track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObstacleKind, QubitState};

    fn obstacle(x: f32, kind: ObstacleKind) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            kind,
            passed: false,
        }
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&Rect::new(9.9, 9.9, 10.0, 10.0)));
    }

    #[test]
    fn test_ducking_hitbox_keeps_top() {
        let tuning = Tuning::default();
        let mut q = Qubit::new(tuning.track_b_y);
        let standing = qubit_hitbox(&q, &tuning);
        q.state = QubitState::Ducking;
        let ducking = qubit_hitbox(&q, &tuning);
        assert_eq!(ducking.size.y, tuning.qubit_duck_height);
        assert_eq!(ducking.top(), standing.top());
        assert!(ducking.bottom() < standing.bottom());
    }

    #[test]
    fn test_duck_clears_short_low_obstacle() {
        let mut tuning = Tuning::default();
        tuning.obstacle_height = 10.0;
        let a = Qubit::new(tuning.track_a_y);
        let mut b = Qubit::new(tuning.track_b_y);
        let o = obstacle(tuning.qubit_x + 5.0, ObstacleKind::Low);
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), Some(Track::B));

        b.state = QubitState::Ducking;
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), None);
    }

    #[test]
    fn test_obstacle_flush_with_floor() {
        let tuning = Tuning::default();
        let o = obstacle(300.0, ObstacleKind::Both);
        assert_eq!(obstacle_hitbox(&o, Track::A, &tuning).bottom(), tuning.floor_a());
        assert_eq!(obstacle_hitbox(&o, Track::B, &tuning).bottom(), tuning.floor_b());
    }

    #[test]
    fn test_horizontal_touch_is_not_collision() {
        let tuning = Tuning::default();
        let a = Qubit::new(tuning.track_a_y);
        let b = Qubit::new(tuning.track_b_y);
        // Obstacle left edge exactly on the qubit's right edge
        let o = obstacle(tuning.qubit_x + tuning.qubit_size, ObstacleKind::Both);
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), None);
        // Obstacle right edge exactly on the qubit's left edge
        let o = obstacle(tuning.qubit_x - tuning.obstacle_width, ObstacleKind::Both);
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), None);

        let o = obstacle(tuning.qubit_x + tuning.qubit_size - 0.5, ObstacleKind::Low);
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), Some(Track::B));
    }

    #[test]
    fn test_jump_clears_high_obstacle_when_feet_touch_top() {
        let tuning = Tuning::default();
        let mut a = Qubit::new(tuning.track_a_y);
        let b = Qubit::new(tuning.track_b_y);
        let o = obstacle(tuning.qubit_x, ObstacleKind::High);
        let top = obstacle_hitbox(&o, Track::A, &tuning).top();

        a.state = QubitState::Jumping;
        a.y = top - tuning.qubit_size; // feet resting on the obstacle top
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), None);

        a.y += 0.5;
        assert_eq!(obstacle_collision(&o, &a, &b, &tuning), Some(Track::A));
    }

    #[test]
    fn test_kind_selects_tracks() {
        let tuning = Tuning::default();
        let mut a = Qubit::new(tuning.track_a_y);
        let b = Qubit::new(tuning.track_b_y);
        // A well above any obstacle: only the low track can be hit
        a.y = tuning.track_a_y - 200.0;
        let x = tuning.qubit_x;
        assert_eq!(obstacle_collision(&obstacle(x, ObstacleKind::High), &a, &b, &tuning), None);
        assert_eq!(
            obstacle_collision(&obstacle(x, ObstacleKind::Low), &a, &b, &tuning),
            Some(Track::B)
        );
        assert_eq!(
            obstacle_collision(&obstacle(x, ObstacleKind::Both), &a, &b, &tuning),
            Some(Track::B)
        );
    }
}
