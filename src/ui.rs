//! Screen hit targets
//!
//! Decides whether a pointer lands on whatever action target is visible in
//! the current phase. Coordinates are playfield pixels.

use glam::Vec2;
use serde::Serialize;

use crate::sim::GamePhase;
use crate::tuning::Tuning;

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edges count as inside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Something the pointer can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HitTarget {
    Start,
    Restart,
    Share,
    Mute,
}

pub const BUTTON_WIDTH: f32 = 160.0;
pub const BUTTON_HEIGHT: f32 = 50.0;
pub const BUTTON_Y: f32 = 350.0;
/// Gap between the restart and share buttons
pub const BUTTON_SPACING: f32 = 16.0;
pub const MUTE_ZONE_SIZE: f32 = 48.0;

/// Button placement for a playfield size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    /// Start / Restart
    pub action_button: Rect,
    /// Only on the game over screen
    pub share_button: Rect,
    /// Top-right corner, every screen
    pub mute_zone: Rect,
}

impl Layout {
    pub fn new(tuning: &Tuning) -> Self {
        let x = (tuning.playfield_width - BUTTON_WIDTH) / 2.0;
        Self {
            action_button: Rect::new(x, BUTTON_Y, BUTTON_WIDTH, BUTTON_HEIGHT),
            share_button: Rect::new(
                x,
                BUTTON_Y + BUTTON_HEIGHT + BUTTON_SPACING,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            mute_zone: Rect::new(
                tuning.playfield_width - MUTE_ZONE_SIZE,
                0.0,
                MUTE_ZONE_SIZE,
                MUTE_ZONE_SIZE,
            ),
        }
    }

    /// Visible target under `point`, if any
    pub fn hit_test(&self, phase: GamePhase, point: Vec2) -> Option<HitTarget> {
        if self.mute_zone.contains(point) {
            return Some(HitTarget::Mute);
        }
        match phase {
            GamePhase::Start if self.action_button.contains(point) => Some(HitTarget::Start),
            GamePhase::GameOver if self.action_button.contains(point) => {
                Some(HitTarget::Restart)
            }
            GamePhase::GameOver if self.share_button.contains(point) => Some(HitTarget::Share),
            _ => None,
        }
    }
}
