//! Game state machine
//!
//! `Idle -> Active` on start, `Active -> GameOver` when the player is caught,
//! `GameOver -> Active` (or `Active -> Active`) on reset.

use super::input::TargetInput;
use super::state::{GameEvent, GamePhase, GameState, Player};

impl GameState {
    /// Leave the start screen. Returns false if a session was already started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            log::warn!("Start ignored in phase {:?}", self.phase);
            return false;
        }
        self.init_session();
        true
    }

    /// Throw away the current session and begin a fresh one
    pub fn reset(&mut self) {
        self.init_session();
    }

    /// Player was caught. Returns the one-time game over notification.
    pub(crate) fn end_session(&mut self) -> GameEvent {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, {} frames survived",
            self.score,
            self.frames
        );
        GameEvent::GameOver {
            final_score: self.score,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    fn init_session(&mut self) {
        let center = self.field.center();
        self.player = Player::new(center);
        self.input = TargetInput::new(center);
        self.adversaries.clear();
        self.projectiles.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.events.clear();
        self.score = 0;
        self.frames = 0;
        self.phase = GamePhase::Active;
        log::info!(
            "Session started in {}x{} field",
            self.field.width,
            self.field.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, Field};
    use glam::Vec2;

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(1, Field::new(640.0, 480.0));
        assert!(state.start());
        assert!(state.is_active());
        assert!(!state.start());
    }

    #[test]
    fn test_game_over_then_reset() {
        let mut state = GameState::new(1, Field::new(640.0, 480.0));
        state.start();
        state.score = 77;
        state.frames = 300;
        state.player.fire_rate = 6;
        state.spawn_adversary();
        state.collectibles.push(Collectible::new(Vec2::new(40.0, 40.0)));
        state.pointer_moved(Vec2::new(10.0, 10.0));

        assert_eq!(state.end_session(), GameEvent::GameOver { final_score: 77 });
        assert!(state.is_game_over());

        state.reset();
        assert!(state.is_active());
        assert_eq!(state.score, 0);
        assert_eq!(state.frames, 0);
        assert_eq!(state.player.fire_rate, 1);
        assert_eq!(state.player.pos, Vec2::new(320.0, 240.0));
        assert_eq!(state.input.target(), Vec2::new(320.0, 240.0));
        assert!(state.adversaries.is_empty());
        assert!(state.collectibles.is_empty());
    }
}
