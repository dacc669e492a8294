//! Pointer input adapter
//!
//! Converts device-space pointer events into playfield coordinates and turns
//! them into fire commands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::{GameState, fire};

/// On-screen rectangle the playfield is stretched over (device pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Logical units per device pixel on each axis
    pub fn scale(&self) -> Vec2 {
        Vec2::new(GAME_WIDTH / self.width, GAME_HEIGHT / self.height)
    }

    /// Convert a device-space pointer position to playfield units
    ///
    /// Returns `None` for a degenerate (zero-sized) surface or a non-finite position.
    pub fn to_logical(&self, client_x: f32, client_y: f32) -> Option<Vec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let logical = (Vec2::new(client_x, client_y) - Vec2::new(self.left, self.top)) * self.scale();
        logical.is_finite().then_some(logical)
    }
}

/// Handle a pointer-down; returns how many missiles were launched
pub fn pointer_down(state: &mut GameState, viewport: &Viewport, client_x: f32, client_y: f32) -> u32 {
    if !state.is_playing() {
        return 0;
    }
    match viewport.to_logical(client_x, client_y) {
        Some(target) => fire(state, target),
        None => 0,
    }
}
