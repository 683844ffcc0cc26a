//! Pointer interaction state, owned by whoever dispatches window events.

use crate::Vec2;

/// Mouse wheel direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scroll {
    Up,
    Down,
}

/// Tracks the primary button and the last cursor position so motion
/// events can be turned into drag deltas.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
    dragging: bool,
    last: Option<Vec2>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press(&mut self, pos: Vec2) {
        self.dragging = true;
        self.last = Some(pos);
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Record a cursor move. Returns the delta since the previous position
    /// while the button is held, `None` otherwise.
    pub fn motion(&mut self, pos: Vec2) -> Option<Vec2> {
        let prev = self.last.replace(pos);
        if !self.dragging {
            return None;
        }
        prev.map(|p| pos - p)
    }
}
