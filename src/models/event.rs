//! Derived calendar events.
//!
//! Events are computed from tasks and personal schedule entries and are
//! never persisted. The category only affects display colour.

use serde::{Deserialize, Serialize};

use super::time::TimeWindow;

/// Display category of an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventCategory {
    Task,
    PersonalBlock,
    DayOff,
}

/// A projected event on one person's calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    /// Source id (task id or schedule entry id).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Occupied interval.
    pub window: TimeWindow,
    /// Display category.
    pub category: EventCategory,
}

impl CalendarEvent {
    /// Creates an event.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        window: TimeWindow,
        category: EventCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            window,
            category,
        }
    }

    /// Whether this event was projected from the given task.
    #[inline]
    pub fn is_task(&self, task_id: &str) -> bool {
        self.category == EventCategory::Task && self.id == task_id
    }
}
