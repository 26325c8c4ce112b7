//! Source tuning shared by every backend.

use std::time::Duration;

/// Knobs that affect translation but not the event model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceConfig {
    /// Maximum time between presses of the same button that still counts as
    /// a multi-click, for backends that do not report click counts.
    pub double_click_interval: Duration,
    /// Maximum cursor travel in pixels between those presses.
    pub double_click_distance: f32,
    /// Pixels per wheel line, used to turn pixel deltas into lines.
    pub wheel_line_height: f32,
    /// Upper bound on native messages translated by a single pump.
    pub max_pump_messages: usize,
    /// Report unaccelerated mouse motion where the backend supports it.
    pub raw_mouse: bool,
}

impl SourceConfig {
    pub fn with_raw_mouse(mut self, raw_mouse: bool) -> Self {
        self.raw_mouse = raw_mouse;
        self
    }

    pub fn with_max_pump_messages(mut self, max: usize) -> Self {
        self.max_pump_messages = max;
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            double_click_interval: Duration::from_millis(500),
            double_click_distance: 4.0,
            wheel_line_height: 40.0,
            max_pump_messages: 4096,
            raw_mouse: false,
        }
    }
}
