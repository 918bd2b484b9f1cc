//! Platform abstraction layer
//!
//! Browser concerns the simulation only sees as plain values:
//! - Viewport classification (narrow portrait screens pause the game)
//! - Tilt sensor permission and one-time listener registration

use crate::consts::PORTRAIT_MAX_WIDTH;

/// Visible area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// CSS `orientation: portrait` (height at least the width)
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }

    /// Narrow width AND portrait orientation
    pub fn is_constrained(&self, max_width: f32) -> bool {
        self.width <= max_width && self.is_portrait()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(PORTRAIT_MAX_WIDTH * 1.25, PORTRAIT_MAX_WIDTH * 0.75)
    }
}

/// Media query equivalent of [`Viewport::is_constrained`]
pub fn constrained_media_query(max_width: f32) -> String {
    format!("(max-width: {max_width}px) and (orientation: portrait)")
}

/// Outcome of asking the platform for orientation sensor access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltPermission {
    Granted,
    /// The user declined the prompt
    Denied,
    /// Platform grants sensor access without asking
    NotRequired,
    /// The request errored or produced an unrecognised answer
    Failed,
}

impl TiltPermission {
    /// Interpret a permission prompt response ("granted", "denied", ...)
    pub fn from_response(response: &str) -> Self {
        match response {
            "granted" => TiltPermission::Granted,
            "not-required" => TiltPermission::NotRequired,
            "denied" => TiltPermission::Denied,
            other => {
                log::warn!("Unexpected tilt permission response {other:?}");
                TiltPermission::Failed
            }
        }
    }

    /// Only an explicit refusal is worth remembering across visits
    pub fn remember_opt_out(&self) -> bool {
        matches!(self, TiltPermission::Denied)
    }

    pub fn allows_tilt(&self) -> bool {
        matches!(self, TiltPermission::Granted | TiltPermission::NotRequired)
    }
}

/// Tracks the page-wide tilt listener so it is registered at most once,
/// no matter how many sessions are started
#[derive(Debug, Default)]
pub struct TiltListener {
    registered: bool,
}

impl TiltListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Feed a permission outcome. Returns true exactly when the caller should
    /// attach the listener now. Denial leaves pointer/touch control intact.
    pub fn on_permission(&mut self, permission: TiltPermission) -> bool {
        if !permission.allows_tilt() {
            log::warn!("Tilt permission {permission:?}; continuing without tilt");
            return false;
        }
        if self.registered {
            return false;
        }
        self.registered = true;
        log::info!("Tilt listener registered");
        true
    }
}
