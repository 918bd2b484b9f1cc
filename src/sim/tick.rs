//! Per-frame simulation tick
//!
//! Systems run in a fixed order: player, particles, projectiles, collectibles,
//! adversary spawn, adversaries. Nothing runs outside the `Active` phase.

use super::spawner::{adversary_due, collectible_due};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Collaborator inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock timestamp (ms), drives the auto-fire cooldown
    pub now_ms: f64,
    /// Viewport is a narrow portrait screen; simulation holds still
    pub constrained_viewport: bool,
}

/// Advance the game by one frame and return what changed for the HUD
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    // Don't tick unless a session is running
    if state.phase != GamePhase::Active {
        return Vec::new();
    }

    // Layout pause: stays Active, resumes on its own
    if input.constrained_viewport {
        return Vec::new();
    }

    let score_before = state.score;

    // Player pursuit + auto-fire
    let target = state.input.target();
    if let Some(shot) = state
        .player
        .update(target, input.now_ms, &state.adversaries)
    {
        state.projectiles.push(shot);
    }

    state.update_particles();

    state.update_projectiles();

    if collectible_due(state.frames) {
        state.spawn_collectible();
    }
    state.update_collectibles();

    if adversary_due(state.frames, state.score) {
        state.spawn_adversary();
    }

    if state.update_adversaries() {
        // Terminal: no survival score, frame counter frozen
        if state.score != score_before {
            state.events.push(GameEvent::ScoreChanged { score: state.score });
        }
        let game_over = state.end_session();
        state.events.push(game_over);
        return std::mem::take(&mut state.events);
    }

    // Survival points
    if state.frames % SURVIVAL_SCORE_INTERVAL == 0 {
        state.add_score(SURVIVAL_SCORE);
    }
    if state.score != score_before {
        state.events.push(GameEvent::ScoreChanged { score: state.score });
    }

    state.frames += 1;

    std::mem::take(&mut state.events)
}
