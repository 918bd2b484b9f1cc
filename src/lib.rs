//! Neon Dodge - an arcade survival game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, game state machine)
//! - `platform`: Browser collaborators (viewport classification, tilt permission)
//! - `settings`: Player preferences (tilt tuning)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Fraction of the remaining distance to the target covered per tick
    pub const PLAYER_PURSUIT: f32 = 0.15;
    /// Fire rate bounds (shots per second)
    pub const MIN_FIRE_RATE: u32 = 1;
    pub const MAX_FIRE_RATE: u32 = 10;
    pub const PLAYER_COLOR: u32 = 0xffffff;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Adversary defaults
    pub const ADVERSARY_RADIUS: f32 = 40.0;
    pub const ADVERSARY_BASE_SPEED: f32 = 0.6;
    /// Score needed for one extra unit of adversary speed
    pub const ADVERSARY_SPEED_SCORE_SCALE: f32 = 1200.0;
    /// Spin speed is drawn from [-MAX, MAX)
    pub const ADVERSARY_MAX_SPIN_SPEED: f32 = 0.05;
    /// Adversaries further than this outside the field are culled
    pub const ADVERSARY_CULL_MARGIN: f32 = 100.0;

    /// Spawn cadence (frames)
    pub const SPAWN_INTERVAL_BASE: u64 = 60;
    pub const SPAWN_INTERVAL_MIN: u64 = 20;
    /// Score per one-frame reduction of the spawn interval
    pub const SPAWN_INTERVAL_SCORE_STEP: u64 = 200;
    pub const COLLECTIBLE_INTERVAL: u64 = 1000;

    /// Collectible defaults
    pub const COLLECTIBLE_RADIUS: f32 = 15.0;
    /// Distance kept from every field edge when placing a collectible
    pub const COLLECTIBLE_INSET: f32 = 30.0;
    pub const COLLECTIBLE_COLOR: u32 = 0xff0000;
    pub const PICKUP_PARTICLE_COLOR: u32 = 0x00ff00;

    /// Two circles collide when their gap is below this tolerance
    pub const COLLISION_TOLERANCE: f32 = 1.0;

    /// Particle defaults
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_RADIUS_SPREAD: f32 = 3.0;
    /// Initial velocity components are drawn from [-MAX, MAX)
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    pub const PARTICLE_DAMPING: f32 = 0.95;
    pub const PARTICLE_FADE: f32 = 0.02;
    /// Opacity at or below this is treated as fully faded (absorbs f32 drift)
    pub const PARTICLE_ALPHA_EPSILON: f32 = 1e-4;
    pub const KILL_PARTICLES: usize = 10;
    pub const PICKUP_PARTICLES: usize = 10;
    /// Emitted at each of the two colliding bodies
    pub const CRASH_PARTICLES_EACH: usize = 10;

    /// Scoring
    pub const KILL_SCORE: u64 = 10;
    pub const SURVIVAL_SCORE: u64 = 1;
    pub const SURVIVAL_SCORE_INTERVAL: u64 = 10;

    /// Tilt input defaults
    pub const TILT_SENSITIVITY: f32 = 3.0;
    pub const TILT_GAIN: f32 = 0.5;
    /// Front-to-back angle (degrees) treated as "no tilt" for a hand-held device
    pub const TILT_NEUTRAL_BETA: f32 = 45.0;

    /// Viewports at most this wide in portrait orientation pause the game
    pub const PORTRAIT_MAX_WIDTH: f32 = 1024.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing from `from` toward `to`, built from the angle so that
/// coincident points still yield a valid direction (+x)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    Vec2::from_angle(angle_between(from, to))
}
