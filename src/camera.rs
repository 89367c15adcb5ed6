use std::f64::consts::PI;

use crate::vectors::{V2, append, facing, scale};

/// Radians turned per rotate-left / rotate-right event.
pub const TURN_STEP: f64 = PI / 32.0;
/// World units walked per move-forward / move-backward event.
pub const MOVE_STEP: f64 = 0.05;

/// Discrete input events, one state mutation each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    RotateLeft,
    RotateRight,
    MoveForward,
    MoveBackward,
}

/// Where the viewer stands and which way it looks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewer {
    /// Radians, 0 along +x. Never wrapped.
    pub facing: f64,
    pub position: V2,
}

impl Viewer {
    pub fn new(position: V2, facing: f64) -> Self {
        Self { facing, position }
    }

    #[inline]
    pub fn rotate(&mut self, delta: f64) {
        self.facing += delta;
    }

    /// Walk `delta` units along the current heading; negative walks backwards.
    #[inline]
    pub fn move_forward(&mut self, delta: f64) {
        self.position = append(self.position, scale(facing(self.facing), delta));
    }
}

/// Per-event step sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steps {
    pub turn: f64,
    pub walk: f64,
}

impl Default for Steps {
    fn default() -> Self {
        Self {
            turn: TURN_STEP,
            walk: MOVE_STEP,
        }
    }
}

impl Steps {
    pub fn apply(&self, viewer: &mut Viewer, action: Action) {
        match action {
            Action::RotateLeft => viewer.rotate(-self.turn),
            Action::RotateRight => viewer.rotate(self.turn),
            Action::MoveForward => viewer.move_forward(self.walk),
            Action::MoveBackward => viewer.move_forward(-self.walk),
        }
    }
}
