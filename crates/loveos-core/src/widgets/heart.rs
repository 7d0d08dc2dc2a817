//! Heart monitor.
//!
//! Clicks fill the heart in fixed steps up to `max_fill`. Once full, it takes
//! `over_clicks_required` more clicks to reveal the message, and only then
//! does the widget complete.

use serde::Serialize;

use super::TaskWidget;
use crate::progress::{CompletionHandle, Task};
use crate::storage::HeartConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeartClick {
    /// Fill went up.
    Filled { fill: u32 },
    /// Already full; counting towards the reveal.
    Overflow { over_clicks: u32 },
    /// Message revealed.
    Revealed,
}

#[derive(Debug)]
pub struct HeartMonitor {
    config: HeartConfig,
    fill: u32,
    over_clicks: u32,
    message_visible: bool,
    hint_visible: bool,
    handle: CompletionHandle,
}

impl HeartMonitor {
    pub fn new(config: HeartConfig, handle: CompletionHandle) -> Self {
        Self {
            config,
            fill: 0,
            over_clicks: 0,
            message_visible: false,
            hint_visible: true,
            handle,
        }
    }

    pub fn fill(&self) -> u32 {
        self.fill
    }

    pub fn over_clicks(&self) -> u32 {
        self.over_clicks
    }

    pub fn message_visible(&self) -> bool {
        self.message_visible
    }

    /// The "click to fill" hint disappears after the first click.
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn click(&mut self) -> HeartClick {
        self.hint_visible = false;

        if self.fill < self.config.max_fill {
            // A zero step would never fill; treat it as one.
            let step = self.config.step.max(1);
            self.fill = (self.fill + step).min(self.config.max_fill);
            if self.fill == self.config.max_fill {
                self.over_clicks = 0;
                self.message_visible = false;
            }
            return HeartClick::Filled { fill: self.fill };
        }

        self.over_clicks = self.over_clicks.saturating_add(1);
        if self.over_clicks >= self.config.over_clicks_required {
            self.message_visible = true;
            if self.handle.fire() {
                tracing::debug!(fill = self.fill, "heart confirmed");
            }
            return HeartClick::Revealed;
        }
        HeartClick::Overflow {
            over_clicks: self.over_clicks,
        }
    }
}

impl TaskWidget for HeartMonitor {
    fn task(&self) -> Task {
        Task::Heart
    }

    fn is_complete(&self) -> bool {
        self.handle.is_fired()
    }
}
