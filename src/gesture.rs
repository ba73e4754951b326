//! Tap versus drag classification for the minimized widget
//!
//! Raw pointer reports go in, at most one [`Gesture`] comes out per report.
//! A press that never travels further than the threshold is a tap; once it
//! does, the press becomes a drag and its release is a drag end, never a tap.

use serde::{Deserialize, Serialize};

/// Pointer report from the host, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel,
}

/// Classified gesture; drag offsets are cumulative from the press point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap,
    DragStart { dx: f64, dy: f64 },
    DragMove { dx: f64, dy: f64 },
    DragEnd { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { x: f64, y: f64 },
    Dragging { x: f64, y: f64, dx: f64, dy: f64 },
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    threshold: f64,
    phase: Phase,
}

impl GestureClassifier {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            phase: Phase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Forget any press in progress
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn classify(&mut self, event: PointerEvent) -> Option<Gesture> {
        match (self.phase, event) {
            (phase, PointerEvent::Down { x, y }) => {
                // a second press without a release restarts classification
                self.phase = Phase::Pressed { x, y };
                match phase {
                    Phase::Dragging { dx, dy, .. } => Some(Gesture::DragEnd { dx, dy }),
                    _ => None,
                }
            }
            (Phase::Pressed { x: ox, y: oy }, PointerEvent::Move { x, y }) => {
                let (dx, dy) = (x - ox, y - oy);
                if dx.hypot(dy) > self.threshold {
                    self.phase = Phase::Dragging { x: ox, y: oy, dx, dy };
                    Some(Gesture::DragStart { dx, dy })
                } else {
                    None
                }
            }
            (Phase::Dragging { x: ox, y: oy, .. }, PointerEvent::Move { x, y }) => {
                let (dx, dy) = (x - ox, y - oy);
                self.phase = Phase::Dragging { x: ox, y: oy, dx, dy };
                Some(Gesture::DragMove { dx, dy })
            }
            (Phase::Pressed { .. }, PointerEvent::Up { .. }) => {
                self.phase = Phase::Idle;
                Some(Gesture::Tap)
            }
            (Phase::Dragging { x: ox, y: oy, .. }, PointerEvent::Up { x, y }) => {
                self.phase = Phase::Idle;
                Some(Gesture::DragEnd { dx: x - ox, dy: y - oy })
            }
            (Phase::Dragging { dx, dy, .. }, PointerEvent::Cancel) => {
                self.phase = Phase::Idle;
                Some(Gesture::DragEnd { dx, dy })
            }
            (_, PointerEvent::Cancel) => {
                self.phase = Phase::Idle;
                None
            }
            (Phase::Idle, PointerEvent::Move { .. } | PointerEvent::Up { .. }) => None,
        }
    }
}
