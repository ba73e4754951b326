//! Display mode and floating position of the minimized widget

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Expanded,
    Minimized,
}

/// Top-left screen offset of the minimized widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Host viewport and the size of the minimized widget inside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp `position` so a `widget_size` square stays fully visible.
    /// A viewport smaller than the widget pins it to the origin.
    pub fn clamp(&self, position: Position, widget_size: f64) -> Position {
        let max_x = (self.width - widget_size).max(0.0);
        let max_y = (self.height - widget_size).max(0.0);
        Position::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
    }

    /// Bottom-right resting spot used when the widget is first minimized
    pub fn default_dock(&self, widget_size: f64, margin: f64) -> Position {
        self.clamp(
            Position::new(
                self.width - widget_size - margin,
                self.height - widget_size - margin,
            ),
            widget_size,
        )
    }
}
