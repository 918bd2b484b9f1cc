//! Input unification
//!
//! Pointer, touch and device tilt all write the same target position. There is
//! no arbitration: whichever source fires last wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Field, GamePhase, GameState};
use crate::consts::*;

/// How tilt angles translate into target offsets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltTuning {
    /// Per-axis sensitivity (x from gamma, y from beta)
    pub sensitivity: Vec2,
    /// Common scale applied on top of the sensitivity
    pub gain: f32,
    /// Beta angle (degrees) that produces no vertical movement
    pub neutral_beta: f32,
}

impl Default for TiltTuning {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::splat(TILT_SENSITIVITY),
            gain: TILT_GAIN,
            neutral_beta: TILT_NEUTRAL_BETA,
        }
    }
}

/// One device-orientation sample (degrees); either angle may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TiltReading {
    /// Left-to-right tilt
    pub gamma: Option<f32>,
    /// Front-to-back tilt
    pub beta: Option<f32>,
}

impl TiltReading {
    pub fn new(gamma: Option<f32>, beta: Option<f32>) -> Self {
        Self { gamma, beta }
    }
}

/// The single target position the player pursues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInput {
    target: Vec2,
}

impl TargetInput {
    pub fn new(target: Vec2) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Absolute position from a pointer or touch
    pub fn set_absolute(&mut self, pos: Vec2, field: &Field) {
        if !pos.is_finite() {
            log::warn!("Ignoring non-finite input position {pos:?}");
            return;
        }
        self.target = field.clamp(pos);
    }

    /// Incremental offset from a tilt sample. Missing, zero or non-finite
    /// angles are skipped individually.
    pub fn apply_tilt(&mut self, reading: TiltReading, tuning: &TiltTuning, field: &Field) {
        if let Some(gamma) = reading.gamma.filter(|&g| usable_angle(g)) {
            self.target.x += gamma * tuning.gain * tuning.sensitivity.x;
        }
        if let Some(beta) = reading.beta.filter(|&b| usable_angle(b)) {
            self.target.y += (beta - tuning.neutral_beta) * tuning.gain * tuning.sensitivity.y;
        }
        self.target = field.clamp(self.target);
    }

    pub(crate) fn reclamp(&mut self, field: &Field) {
        self.target = field.clamp(self.target);
    }
}

fn usable_angle(degrees: f32) -> bool {
    degrees.is_finite() && degrees != 0.0
}

impl GameState {
    /// Pointer moved to an absolute position
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.input.set_absolute(pos, &self.field);
    }

    /// Touch started or moved; `pos` is the first touch point
    pub fn touched(&mut self, pos: Vec2) {
        self.input.set_absolute(pos, &self.field);
    }

    /// Device orientation changed. Ignored unless a session is active.
    pub fn tilted(&mut self, reading: TiltReading) {
        if self.phase != GamePhase::Active {
            return;
        }
        let tuning = self.tilt;
        self.input.apply_tilt(reading, &tuning, &self.field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn test_pointer_is_clamped() {
        let mut input = TargetInput::new(Vec2::ZERO);
        input.set_absolute(Vec2::new(900.0, 100.0), &field());
        assert_eq!(input.target(), Vec2::new(800.0, 100.0));
        input.set_absolute(Vec2::new(f32::NAN, 1.0), &field());
        assert_eq!(input.target(), Vec2::new(800.0, 100.0));
    }

    #[test]
    fn test_tilt_offsets_from_neutral() {
        let mut input = TargetInput::new(Vec2::new(400.0, 300.0));
        let tuning = TiltTuning::default();

        // gamma 10 => +15 px, beta 55 => +15 px
        input.apply_tilt(TiltReading::new(Some(10.0), Some(55.0)), &tuning, &field());
        assert!((input.target() - Vec2::new(415.0, 315.0)).length() < 1e-4);

        // Neutral holding angle does not move vertically
        input.apply_tilt(TiltReading::new(None, Some(45.0)), &tuning, &field());
        assert!((input.target() - Vec2::new(415.0, 315.0)).length() < 1e-4);
    }

    #[test]
    fn test_tilt_missing_values_ignored() {
        let mut input = TargetInput::new(Vec2::new(400.0, 300.0));
        let tuning = TiltTuning::default();
        input.apply_tilt(TiltReading::default(), &tuning, &field());
        input.apply_tilt(TiltReading::new(Some(f32::NAN), None), &tuning, &field());
        assert_eq!(input.target(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_tilt_clamps() {
        let mut input = TargetInput::new(Vec2::new(100.0, 550.0));
        let tuning = TiltTuning::default();
        input.apply_tilt(TiltReading::new(Some(-90.0), Some(180.0)), &tuning, &field());
        assert_eq!(input.target(), Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_tilt_zero_angles_ignored() {
        let mut input = TargetInput::new(Vec2::new(400.0, 300.0));
        let tuning = TiltTuning::default();
        input.apply_tilt(TiltReading::new(Some(0.0), Some(0.0)), &tuning, &field());
        assert_eq!(input.target(), Vec2::new(400.0, 300.0));

        // A zero on one axis does not block the other
        input.apply_tilt(TiltReading::new(Some(10.0), Some(0.0)), &tuning, &field());
        assert!((input.target() - Vec2::new(415.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_tilted_zero_reading_keeps_target() {
        let mut state = GameState::new(1, field());
        state.start();
        state.tilted(TiltReading::new(Some(0.0), Some(0.0)));
        assert_eq!(state.input.target(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_neutral_angle_is_overridable() {
        let mut input = TargetInput::new(Vec2::new(400.0, 300.0));
        let tuning = TiltTuning {
            neutral_beta: 30.0,
            ..Default::default()
        };
        input.apply_tilt(TiltReading::new(None, Some(30.0)), &tuning, &field());
        assert_eq!(input.target(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_tilt_ignored_unless_active() {
        let mut state = GameState::new(1, field());
        state.tilted(TiltReading::new(Some(30.0), Some(90.0)));
        assert_eq!(state.input.target(), Vec2::new(400.0, 300.0));

        state.start();
        state.tilted(TiltReading::new(Some(30.0), None));
        assert!((state.input.target().x - 445.0).abs() < 1e-4);
    }

    #[test]
    fn test_last_source_wins() {
        let mut state = GameState::new(1, field());
        state.start();
        state.pointer_moved(Vec2::new(10.0, 20.0));
        state.touched(Vec2::new(30.0, 40.0));
        assert_eq!(state.input.target(), Vec2::new(30.0, 40.0));
        state.tilted(TiltReading::new(Some(2.0), None));
        assert_eq!(state.input.target(), Vec2::new(33.0, 40.0));
    }
}
