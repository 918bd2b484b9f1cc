//! Frame-gated spawning with score-driven difficulty

use glam::Vec2;
use rand::Rng;

use super::state::{Adversary, AdversaryKind, Collectible, GameState};
use crate::consts::*;
use crate::direction_to;

/// Frames between adversary spawns. Shrinks by one frame every
/// `SPAWN_INTERVAL_SCORE_STEP` points down to `SPAWN_INTERVAL_MIN`.
pub fn adversary_spawn_interval(score: u64) -> u64 {
    SPAWN_INTERVAL_BASE
        .saturating_sub(score / SPAWN_INTERVAL_SCORE_STEP)
        .max(SPAWN_INTERVAL_MIN)
}

/// Speed given to an adversary spawned at this score (unbounded above)
pub fn adversary_speed(score: u64) -> f32 {
    ADVERSARY_BASE_SPEED + score as f32 / ADVERSARY_SPEED_SCORE_SCALE
}

pub fn adversary_due(frames: u64, score: u64) -> bool {
    frames % adversary_spawn_interval(score) == 0
}

pub fn collectible_due(frames: u64) -> bool {
    frames % COLLECTIBLE_INTERVAL == 0
}

impl GameState {
    /// Spawn an adversary just outside a random edge, heading for the player
    pub fn spawn_adversary(&mut self) {
        let kind = AdversaryKind::ALL[self.rng.random_range(0..AdversaryKind::ALL.len())];
        let r = ADVERSARY_RADIUS;
        let (w, h) = (self.field.width, self.field.height);

        let pos = if self.rng.random_bool(0.5) {
            // Left or right edge
            let x = if self.rng.random_bool(0.5) { -r } else { w + r };
            Vec2::new(x, self.rng.random::<f32>() * h)
        } else {
            // Top or bottom edge
            let y = if self.rng.random_bool(0.5) { -r } else { h + r };
            Vec2::new(self.rng.random::<f32>() * w, y)
        };

        let vel = direction_to(pos, self.player.pos) * adversary_speed(self.score);
        let spin_speed = self
            .rng
            .random_range(-ADVERSARY_MAX_SPIN_SPEED..ADVERSARY_MAX_SPIN_SPEED);

        log::debug!(
            "Spawned {:?} at ({:.0}, {:.0}), frame {}",
            kind,
            pos.x,
            pos.y,
            self.frames
        );
        self.adversaries.push(Adversary::new(kind, pos, vel, spin_speed));
    }

    /// Spawn a collectible at a random position inset from every edge
    pub fn spawn_collectible(&mut self) {
        let span_x = (self.field.width - 2.0 * COLLECTIBLE_INSET).max(0.0);
        let span_y = (self.field.height - 2.0 * COLLECTIBLE_INSET).max(0.0);
        let pos = Vec2::new(
            self.rng.random::<f32>() * span_x + COLLECTIBLE_INSET,
            self.rng.random::<f32>() * span_y + COLLECTIBLE_INSET,
        );

        log::debug!("Spawned collectible at ({:.0}, {:.0})", pos.x, pos.y);
        self.collectibles.push(Collectible::new(pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Field;

    fn state() -> GameState {
        GameState::new(42, Field::new(800.0, 600.0))
    }

    #[test]
    fn test_spawn_interval_scaling() {
        assert_eq!(adversary_spawn_interval(0), 60);
        assert_eq!(adversary_spawn_interval(199), 60);
        assert_eq!(adversary_spawn_interval(200), 59);
        assert_eq!(adversary_spawn_interval(8000), 20);
        assert_eq!(adversary_spawn_interval(1_000_000), 20);
    }

    #[test]
    fn test_spawn_interval_monotonic() {
        let mut prev = adversary_spawn_interval(0);
        for score in (0..20_000).step_by(37) {
            let interval = adversary_spawn_interval(score);
            assert!(interval <= prev);
            prev = interval;
        }
    }

    #[test]
    fn test_adversary_due() {
        assert!(adversary_due(0, 0));
        assert!(!adversary_due(30, 0));
        assert!(adversary_due(120, 0));
        assert!(adversary_due(40, 8000));
        assert!(collectible_due(0));
        assert!(!collectible_due(999));
        assert!(collectible_due(2000));
    }

    #[test]
    fn test_spawned_speed_follows_score() {
        let mut state = state();
        state.spawn_adversary();
        assert!((state.adversaries[0].vel.length() - 0.6).abs() < 1e-5);

        state.score = 1200;
        state.spawn_adversary();
        assert!((state.adversaries[1].vel.length() - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_starts_off_field_heading_for_player() {
        let mut state = state();
        for _ in 0..200 {
            state.spawn_adversary();
        }
        let field = state.field;
        for adversary in &state.adversaries {
            let p = adversary.pos;
            let on_vertical_edge = p.x == -ADVERSARY_RADIUS || p.x == field.width + ADVERSARY_RADIUS;
            let on_horizontal_edge =
                p.y == -ADVERSARY_RADIUS || p.y == field.height + ADVERSARY_RADIUS;
            assert!(on_vertical_edge || on_horizontal_edge, "not on an edge: {p:?}");
            assert!(!field.contains(p));

            let to_player = (state.player.pos - p).normalize();
            assert!(adversary.vel.normalize().dot(to_player) > 0.9999);
            assert!(adversary.spin_speed.abs() <= ADVERSARY_MAX_SPIN_SPEED);
        }
    }

    #[test]
    fn test_collectible_inside_field() {
        let mut state = state();
        for _ in 0..200 {
            state.spawn_collectible();
        }
        for item in &state.collectibles {
            assert!(item.pos.x >= COLLECTIBLE_INSET && item.pos.x <= 800.0 - COLLECTIBLE_INSET);
            assert!(item.pos.y >= COLLECTIBLE_INSET && item.pos.y <= 600.0 - COLLECTIBLE_INSET);
        }
    }
}
