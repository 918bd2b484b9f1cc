//! Game state and core simulation types
//!
//! Every simulated object is a circle (position + radius). The five entity
//! kinds share that shape through [`Circle`] and otherwise keep their own data.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{TargetInput, TiltTuning};
use crate::consts::*;
use crate::direction_to;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated
    Idle,
    /// Full tick processing
    Active,
    /// Player was caught; terminal until reset
    GameOver,
}

/// Shared shape of every simulated object
pub trait Circle {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Rectangular play field with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into the field (edges inclusive)
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Whether the point lies inside the field (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        self.contains_with_margin(p, 0.0)
    }

    /// Whether the point lies inside the field grown by `margin` on every side
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin
            && p.x <= self.width + margin
            && p.y >= -margin
            && p.y <= self.height + margin
    }
}

/// Maximum number of trail samples kept behind the player
pub const TRAIL_LENGTH: usize = 20;

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Shots per second, always within [MIN_FIRE_RATE, MAX_FIRE_RATE]
    pub fire_rate: u32,
    /// Timestamp (ms) of the last auto-fire attempt
    pub last_fired_ms: f64,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            fire_rate: MIN_FIRE_RATE,
            last_fired_ms: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Pursue the target, record the trail and auto-fire when the cooldown
    /// has elapsed. Returns the projectile fired this tick, if any.
    pub fn update(
        &mut self,
        target: Vec2,
        now_ms: f64,
        adversaries: &[Adversary],
    ) -> Option<Projectile> {
        self.pos += (target - self.pos) * PLAYER_PURSUIT;

        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        if now_ms - self.last_fired_ms > self.fire_interval_ms() {
            self.last_fired_ms = now_ms;
            return self.fire(adversaries);
        }
        None
    }

    /// Milliseconds between two auto-fire attempts
    pub fn fire_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.fire_rate)
    }

    /// Aim a projectile at the nearest adversary (first one wins ties)
    pub fn fire(&self, adversaries: &[Adversary]) -> Option<Projectile> {
        let target = self.nearest(adversaries)?;
        let vel = direction_to(self.pos, target.pos) * PROJECTILE_SPEED;
        Some(Projectile::new(self.pos, vel))
    }

    /// Nearest adversary by Euclidean distance; ties go to the earliest one
    pub fn nearest<'a>(&self, adversaries: &'a [Adversary]) -> Option<&'a Adversary> {
        let mut best: Option<(&Adversary, f32)> = None;
        for adversary in adversaries {
            let dist = self.pos.distance(adversary.pos);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((adversary, dist));
            }
        }
        best.map(|(a, _)| a)
    }

    /// Apply a collectible pickup
    pub fn upgrade_fire_rate(&mut self) {
        self.fire_rate = (self.fire_rate + 1).clamp(MIN_FIRE_RATE, MAX_FIRE_RATE);
    }
}

impl Circle for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Adversary catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryKind {
    Orange,
    Grey,
}

impl AdversaryKind {
    pub const ALL: [AdversaryKind; 2] = [AdversaryKind::Orange, AdversaryKind::Grey];

    /// Display tag drawn on the adversary
    pub fn name(&self) -> &'static str {
        match self {
            AdversaryKind::Orange => "琪琪",
            AdversaryKind::Grey => "吉吉",
        }
    }

    /// 0xRRGGBB tint, also used for its kill particles
    pub fn color(&self) -> u32 {
        match self {
            AdversaryKind::Orange => 0xff9900,
            AdversaryKind::Grey => 0xa0a0a0,
        }
    }
}

/// An adversary drifting along the heading it was given at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub kind: AdversaryKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Current rotation (radians), cosmetic
    pub spin: f32,
    pub spin_speed: f32,
}

impl Adversary {
    pub fn new(kind: AdversaryKind, pos: Vec2, vel: Vec2, spin_speed: f32) -> Self {
        Self {
            kind,
            pos,
            vel,
            radius: ADVERSARY_RADIUS,
            spin: 0.0,
            spin_speed,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.spin += self.spin_speed;
    }
}

impl Circle for Adversary {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A shot travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }
}

impl Circle for Projectile {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A stationary fire-rate upgrade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub radius: f32,
}

impl Collectible {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: COLLECTIBLE_RADIUS,
        }
    }
}

impl Circle for Collectible {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// Opacity, 1.0 at birth
    pub alpha: f32,
}

impl Circle for Particle {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Notifications for the collaborators that own the HUD and screens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score changed during the tick
    ScoreChanged { score: u64 },
    /// A projectile destroyed an adversary
    AdversaryDestroyed { kind: AdversaryKind },
    /// The player picked up a collectible
    CollectiblePicked { fire_rate: u32 },
    /// Session ended; emitted exactly once per session
    GameOver { final_score: u64 },
}

/// Complete session/world state, passed to every system
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub field: Field,
    /// Monotonic within a session
    pub score: u64,
    /// Ticks simulated this session (paused ticks excluded)
    pub frames: u64,
    /// Unified pointer/touch/tilt target
    pub input: TargetInput,
    /// Tilt tuning; survives resets
    pub tilt: TiltTuning,
    pub player: Player,
    pub adversaries: Vec<Adversary>,
    pub projectiles: Vec<Projectile>,
    pub collectibles: Vec<Collectible>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game in a field of the given size
    pub fn new(seed: u64, field: Field) -> Self {
        let center = field.center();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            field,
            score: 0,
            frames: 0,
            input: TargetInput::new(center),
            tilt: TiltTuning::default(),
            player: Player::new(center),
            adversaries: Vec::new(),
            projectiles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Viewport resized; keep the target inside the new bounds
    pub fn resize(&mut self, field: Field) {
        self.field = field;
        self.input.reclamp(&field);
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adversary_at(x: f32, y: f32) -> Adversary {
        Adversary::new(AdversaryKind::Orange, Vec2::new(x, y), Vec2::ZERO, 0.0)
    }

    #[test]
    fn test_player_moves_fraction_toward_target() {
        let mut player = Player::new(Vec2::ZERO);
        player.update(Vec2::new(100.0, 0.0), 0.0, &[]);
        assert!((player.pos.x - 15.0).abs() < 1e-5);
        player.update(Vec2::new(100.0, 0.0), 0.0, &[]);
        assert!((player.pos.x - 27.75).abs() < 1e-4);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut player = Player::new(Vec2::ZERO);
        for i in 0..50 {
            player.update(Vec2::new(i as f32 * 10.0, 0.0), 0.0, &[]);
        }
        assert_eq!(player.trail.len(), TRAIL_LENGTH);
        // Newest sample is the current position
        assert_eq!(*player.trail.back().unwrap(), player.pos);
    }

    #[test]
    fn test_fire_targets_nearest() {
        let player = Player::new(Vec2::ZERO);
        let adversaries = [adversary_at(100.0, 0.0), adversary_at(0.0, 50.0)];

        let shot = player.fire(&adversaries).expect("should fire");
        assert!(shot.vel.x.abs() < 1e-4);
        assert!((shot.vel.y - PROJECTILE_SPEED).abs() < 1e-4);
        assert_eq!(shot.pos, player.pos);
    }

    #[test]
    fn test_fire_tie_goes_to_first() {
        let player = Player::new(Vec2::ZERO);
        let adversaries = [adversary_at(0.0, -30.0), adversary_at(30.0, 0.0)];
        let shot = player.fire(&adversaries).unwrap();
        assert!((shot.vel.y + PROJECTILE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_fire_without_adversaries() {
        let player = Player::new(Vec2::ZERO);
        assert!(player.fire(&[]).is_none());
    }

    #[test]
    fn test_auto_fire_respects_cooldown() {
        let mut player = Player::new(Vec2::ZERO);
        let adversaries = [adversary_at(200.0, 0.0)];

        // Exactly one interval is not enough
        assert!(player.update(Vec2::ZERO, 1000.0, &adversaries).is_none());
        assert!(player.update(Vec2::ZERO, 1001.0, &adversaries).is_some());
        assert_eq!(player.last_fired_ms, 1001.0);
        assert!(player.update(Vec2::ZERO, 1500.0, &adversaries).is_none());

        player.upgrade_fire_rate();
        assert!(player.update(Vec2::ZERO, 1502.0, &adversaries).is_some());
    }

    #[test]
    fn test_cooldown_consumed_without_target() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.update(Vec2::ZERO, 5000.0, &[]).is_none());
        assert_eq!(player.last_fired_ms, 5000.0);
    }

    #[test]
    fn test_fire_rate_caps() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(player.fire_rate, 1);
        player.upgrade_fire_rate();
        assert_eq!(player.fire_rate, 2);
        for _ in 0..20 {
            player.upgrade_fire_rate();
        }
        assert_eq!(player.fire_rate, MAX_FIRE_RATE);
    }

    #[test]
    fn test_adversary_update_moves_and_spins() {
        let mut adversary =
            Adversary::new(AdversaryKind::Grey, Vec2::ZERO, Vec2::new(0.6, 0.0), 0.04);
        adversary.update();
        adversary.update();
        assert!((adversary.pos.x - 1.2).abs() < 1e-6);
        assert!((adversary.spin - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_field_bounds() {
        let field = Field::new(800.0, 600.0);
        assert!(field.contains(Vec2::new(0.0, 600.0)));
        assert!(!field.contains(Vec2::new(-0.1, 10.0)));
        assert!(field.contains_with_margin(Vec2::new(-100.0, 700.0), 100.0));
        assert!(!field.contains_with_margin(Vec2::new(-100.5, 10.0), 100.0));
        assert_eq!(field.clamp(Vec2::new(900.0, -5.0)), Vec2::new(800.0, 0.0));
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7, Field::new(800.0, 600.0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.input.target(), Vec2::new(400.0, 300.0));
        assert!(state.adversaries.is_empty());
    }
}
