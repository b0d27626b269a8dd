//! Conflict detection for task time placements.
//!
//! A candidate placement `[start, start + duration)` conflicts when it
//! overlaps any projected event of a confirmed participant, other than
//! the candidate task's own event. Checks read the task list passed in
//! on every call and keep no state, so they are safe to run per hover.

use chrono::NaiveDate;
use log::debug;

use crate::error::Result;
use crate::models::{Settings, Task, TimeWindow};
use crate::projection::{confirmed_participants, Projector};

/// Outcome of a programmatic time write check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeWriteCheck {
    /// The write may proceed.
    Allowed,
    /// The task's time is locked.
    Locked,
    /// The placement collides with `event_id` on `person_id`'s calendar.
    Conflict { person_id: String, event_id: String },
}

/// Detects placement conflicts.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    projector: Projector,
}

impl ConflictDetector {
    /// Creates a detector over the default working day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom projector (e.g. a different working day).
    pub fn with_projector(mut self, projector: Projector) -> Self {
        self.projector = projector;
        self
    }

    /// First collision of the candidate placement, as (person, event id).
    #[allow(clippy::too_many_arguments)]
    pub fn first_conflict<S: AsRef<str>>(
        &self,
        candidate: &Task,
        start_min: i32,
        duration_min: i32,
        participant_ids: &[S],
        date: NaiveDate,
        tasks: &[Task],
        settings: &Settings,
    ) -> Result<Option<(String, String)>> {
        let window = TimeWindow::from_duration(start_min, duration_min)?;

        for person_id in participant_ids {
            let person_id = person_id.as_ref();
            let events = self.projector.events_for(date, person_id, tasks, settings)?;
            let hit = events
                .iter()
                .filter(|e| !e.is_task(&candidate.id))
                .find(|e| e.window.overlaps(&window));
            if let Some(event) = hit {
                debug!(
                    "task '{}' at {}+{} collides with '{}' for {}",
                    candidate.id, start_min, duration_min, event.id, person_id
                );
                return Ok(Some((person_id.to_string(), event.id.clone())));
            }
        }
        Ok(None)
    }

    /// Whether the candidate placement collides for any participant.
    #[allow(clippy::too_many_arguments)]
    pub fn has_conflict<S: AsRef<str>>(
        &self,
        candidate: &Task,
        start_min: i32,
        duration_min: i32,
        participant_ids: &[S],
        date: NaiveDate,
        tasks: &[Task],
        settings: &Settings,
    ) -> Result<bool> {
        Ok(self
            .first_conflict(
                candidate,
                start_min,
                duration_min,
                participant_ids,
                date,
                tasks,
                settings,
            )?
            .is_some())
    }

    /// Gates a programmatic time write for `candidate`.
    ///
    /// Checks the time lock first, then conflicts for the task's
    /// confirmed participants on `date`.
    pub fn check_time_write(
        &self,
        candidate: &Task,
        start_min: i32,
        duration_min: i32,
        date: NaiveDate,
        tasks: &[Task],
        settings: &Settings,
    ) -> Result<TimeWriteCheck> {
        if candidate.is_time_locked() {
            return Ok(TimeWriteCheck::Locked);
        }
        let participants = confirmed_participants(candidate, date, settings);
        let conflict = self.first_conflict(
            candidate,
            start_min,
            duration_min,
            &participants,
            date,
            tasks,
            settings,
        )?;
        Ok(match conflict {
            Some((person_id, event_id)) => TimeWriteCheck::Conflict {
                person_id,
                event_id,
            },
            None => TimeWriteCheck::Allowed,
        })
    }
}

/// Whether the candidate placement collides, over the default working day.
#[allow(clippy::too_many_arguments)]
pub fn has_conflict<S: AsRef<str>>(
    candidate: &Task,
    start_min: i32,
    duration_min: i32,
    participant_ids: &[S],
    date: NaiveDate,
    tasks: &[Task],
    settings: &Settings,
) -> Result<bool> {
    ConflictDetector::new().has_conflict(
        candidate,
        start_min,
        duration_min,
        participant_ids,
        date,
        tasks,
        settings,
    )
}
