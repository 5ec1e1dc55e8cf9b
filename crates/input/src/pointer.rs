use glam::Vec2;
use std::collections::VecDeque;

/// A pointer event delivered by the host, in absolute screen coordinates.
///
/// The orientation controller consumes these, never raw window events, so
/// any host (desktop window, test harness, CLI simulation) drives it the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at the given position.
    Down(Vec2),
    /// Pointer moved to the given position.
    Move(Vec2),
    /// Primary button released at the given position.
    Up(Vec2),
}

impl PointerEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}

/// FIFO of pointer events waiting for the next frame.
///
/// Hosts push as events arrive; the render loop drains it once per frame.
#[derive(Debug, Default)]
pub struct PointerQueue {
    events: VecDeque<PointerEvent>,
}

impl PointerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and yield every queued event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = PointerEvent> + '_ {
        self.events.drain(..)
    }
}
