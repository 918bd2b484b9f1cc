//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One tick per displayed frame, driven from outside
//! - Seeded RNG only (one `Pcg32` per game)
//! - Removal-safe iteration (back to front) over every entity collection

pub mod collision;
pub mod input;
pub mod particles;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::collide;
pub use input::{TargetInput, TiltReading, TiltTuning};
pub use spawner::{adversary_due, adversary_spawn_interval, adversary_speed, collectible_due};
pub use state::{
    Adversary, AdversaryKind, Circle, Collectible, Field, GameEvent, GamePhase, GameState,
    Particle, Player, Projectile, TRAIL_LENGTH,
};
pub use tick::{TickInput, tick};
