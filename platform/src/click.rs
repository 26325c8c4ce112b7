//! Multi-click detection for backends that only report single presses.

use nk_core::Timestamp;
use nk_core::event::MouseButton;

use crate::config::SourceConfig;

#[derive(Debug, Clone, Copy)]
struct LastPress {
    button: MouseButton,
    x: f32,
    y: f32,
    time: Timestamp,
    count: u8,
}

/// Counts consecutive presses of the same button close in time and space.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<LastPress>,
}

impl ClickTracker {
    /// Register a press and return its click count (1 for a single click).
    pub fn press(
        &mut self,
        button: MouseButton,
        x: f32,
        y: f32,
        time: Timestamp,
        config: &SourceConfig,
    ) -> u8 {
        let count = match self.last {
            Some(last)
                if last.button == button
                    && time.since(last.time) <= config.double_click_interval
                    && time >= last.time
                    && (x - last.x).abs() <= config.double_click_distance
                    && (y - last.y).abs() <= config.double_click_distance =>
            {
                last.count.saturating_add(1)
            }
            _ => 1,
        };
        self.last = Some(LastPress {
            button,
            x,
            y,
            time,
            count,
        });
        count
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
