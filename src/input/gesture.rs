//! Swipe translation for pointer drags.
//!
//! Terminal mouse drags stand in for a touch surface: a drag past the
//! threshold magnitude maps to a command by its dominant direction. An
//! upward swipe with little horizontal travel rotates; a horizontal swipe
//! moves by sign; a downward swipe soft-drops. Anything shorter is ignored.

use crate::types::{Command, SWIPE_THRESHOLD};

/// Tracks one press-drag-release sequence and translates it on release.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: i32,
    start: Option<(i32, i32)>,
    last: Option<(i32, i32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_THRESHOLD)
    }

    pub fn with_threshold(threshold: i32) -> Self {
        Self {
            threshold,
            start: None,
            last: None,
        }
    }

    /// Pointer pressed at (x, y).
    pub fn begin(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
        self.last = Some((x, y));
    }

    /// Pointer dragged to (x, y).
    pub fn update(&mut self, x: i32, y: i32) {
        if self.start.is_some() {
            self.last = Some((x, y));
        }
    }

    /// Pointer released: translate the whole drag into a command, if any.
    pub fn finish(&mut self) -> Option<Command> {
        let (start, last) = (self.start.take()?, self.last.take()?);
        let dx = last.0 - start.0;
        let dy = last.1 - start.1;
        classify_swipe(dx, dy, self.threshold)
    }

    /// Abandon any in-flight drag.
    pub fn cancel(&mut self) {
        self.start = None;
        self.last = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a drag delta to a command. y grows downward.
pub fn classify_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Command> {
    if dy < -threshold && dx.abs() < threshold {
        // Upward swipe.
        return Some(Command::Rotate);
    }

    if dx.abs() > dy.abs() {
        // Horizontal swipe.
        if dx >= threshold {
            return Some(Command::MoveRight);
        }
        if dx <= -threshold {
            return Some(Command::MoveLeft);
        }
        return None;
    }

    // Vertical swipe.
    if dy >= threshold {
        return Some(Command::SoftDrop);
    }

    None
}
