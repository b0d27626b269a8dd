//! Personal schedule entries (absences and partial blocks).
//!
//! Entries for the same person and date are kept as recorded: they are
//! neither merged nor deduplicated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::{parse_time, TimeWindow};
use crate::error::{Result, StandupError};

/// Kind of personal schedule entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Whole working day off. Carries no times.
    DayOff,
    /// Partial unavailability.
    Partial,
    /// Work outside the project.
    NonProject,
    /// Personal errand.
    Personal,
}

/// One recorded absence or block for a person on a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalScheduleEntry {
    /// Entry identifier.
    pub id: String,
    /// Owner.
    pub person_id: String,
    /// Day the entry applies to.
    pub date: NaiveDate,
    /// Entry kind.
    pub kind: EntryKind,
    /// Start time (`HH:MM`). Required unless `kind` is `DayOff`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// End time (`HH:MM`). Required unless `kind` is `DayOff`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl PersonalScheduleEntry {
    /// Creates a full-day-off entry.
    pub fn day_off(id: impl Into<String>, person_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            person_id: person_id.into(),
            date,
            kind: EntryKind::DayOff,
            start_time: None,
            end_time: None,
            reason: String::new(),
        }
    }

    /// Creates a timed entry.
    pub fn block(
        id: impl Into<String>,
        person_id: impl Into<String>,
        date: NaiveDate,
        kind: EntryKind,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            person_id: person_id.into(),
            date,
            kind,
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            reason: String::new(),
        }
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Whether this entry blocks the whole working day.
    #[inline]
    pub fn is_day_off(&self) -> bool {
        self.kind == EntryKind::DayOff
    }

    /// The busy window this entry produces.
    ///
    /// `DayOff` yields `working_day`; other kinds parse their own times
    /// and fail when a time is missing, malformed, or `end <= start`.
    pub fn busy_window(&self, working_day: TimeWindow) -> Result<TimeWindow> {
        if self.is_day_off() {
            return Ok(working_day);
        }
        let start = self.parse_field(self.start_time.as_deref(), "start")?;
        let end = self.parse_field(self.end_time.as_deref(), "end")?;
        if end <= start {
            return Err(StandupError::InvalidScheduleEntry {
                id: self.id.clone(),
                reason: format!("end {} is not after start {}", end, start),
            });
        }
        Ok(TimeWindow::new(start, end))
    }

    fn parse_field(&self, value: Option<&str>, field: &str) -> Result<i32> {
        let raw = value.ok_or_else(|| StandupError::InvalidScheduleEntry {
            id: self.id.clone(),
            reason: format!("missing {field} time"),
        })?;
        parse_time(raw).map_err(|_| StandupError::InvalidScheduleEntry {
            id: self.id.clone(),
            reason: format!("malformed {field} time '{raw}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn test_day_off_spans_working_day() {
        let e = PersonalScheduleEntry::day_off("e1", "A", d());
        assert_eq!(
            e.busy_window(TimeWindow::working_day()).unwrap(),
            TimeWindow::new(540, 1080)
        );
    }

    #[test]
    fn test_block_window() {
        let e = PersonalScheduleEntry::block("e1", "B", d(), EntryKind::Partial, "13:00", "14:00")
            .with_reason("dentist");
        assert_eq!(
            e.busy_window(TimeWindow::working_day()).unwrap(),
            TimeWindow::new(780, 840)
        );
        assert_eq!(e.reason, "dentist");
    }

    #[test]
    fn test_inverted_block_rejected() {
        let e = PersonalScheduleEntry::block("e1", "B", d(), EntryKind::Personal, "14:00", "13:00");
        let err = e.busy_window(TimeWindow::working_day()).unwrap_err();
        assert!(err.to_string().contains("e1"));
    }

    #[test]
    fn test_missing_or_malformed_time_rejected() {
        let mut e = PersonalScheduleEntry::block("e1", "B", d(), EntryKind::NonProject, "13:00", "x");
        assert!(e.busy_window(TimeWindow::working_day()).is_err());
        e.end_time = None;
        assert!(e.busy_window(TimeWindow::working_day()).is_err());
    }
}
