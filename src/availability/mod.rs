//! Availability engine.
//!
//! Computes busy and free intervals from personal schedule entries and
//! enumerates the start times at which a whole group is free.
//!
//! # Algorithm
//!
//! 1. Start from one interval covering the working day.
//! 2. For every selected person, derive one busy window per schedule
//!    entry on the date (a day off covers the whole working day).
//! 3. Merge the busy windows and subtract each from the current free
//!    set. Each subtraction splits or trims the free intervals it hits.
//!    Every entry is parsed first, so a bad one fails regardless of
//!    argument order.
//! 4. Enumerate step-aligned start times `t` with `t + duration <= end`
//!    inside each free interval, in ascending order.
//!
//! An empty result is a normal outcome (nobody is free long enough).
//!
//! # Complexity
//! O(b * f) where b = busy windows, f = free intervals at each step.

use chrono::NaiveDate;
use log::trace;

use crate::config::WorkingDay;
use crate::error::{Result, StandupError};
use crate::models::time::{merge_windows, MINUTES_PER_DAY};
use crate::models::{format_time, Settings, TimeWindow};

/// Removes `busy` from every interval in `available`.
///
/// Input intervals are assumed disjoint and sorted; so is the output.
pub fn subtract_window(available: &[TimeWindow], busy: &TimeWindow) -> Vec<TimeWindow> {
    if busy.is_empty() {
        return available.to_vec();
    }

    let mut result = Vec::with_capacity(available.len() + 1);
    for free in available {
        if !free.overlaps(busy) {
            // Disjoint
            result.push(*free);
        } else if busy.start_min <= free.start_min && busy.end_min >= free.end_min {
            // Fully covered: drop
        } else if busy.start_min <= free.start_min {
            // Busy overlaps the left edge
            result.push(TimeWindow::new(busy.end_min, free.end_min));
        } else if busy.end_min >= free.end_min {
            // Busy overlaps the right edge
            result.push(TimeWindow::new(free.start_min, busy.start_min));
        } else {
            // Busy strictly inside: split in two
            result.push(TimeWindow::new(free.start_min, busy.start_min));
            result.push(TimeWindow::new(busy.end_min, free.end_min));
        }
    }
    result
}

/// Computes who is free and when.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use standup_board::availability::AvailabilityEngine;
/// use standup_board::models::{EntryKind, Person, PersonalScheduleEntry, Settings};
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
/// let settings = Settings::new()
///     .with_person(Person::new("A"))
///     .with_entry(PersonalScheduleEntry::block(
///         "e1", "A", date, EntryKind::Partial, "09:00", "17:00",
///     ));
///
/// let slots = AvailabilityEngine::new()
///     .common_free_slots(date, &["A"], 30, &settings)
///     .unwrap();
/// assert_eq!(slots, vec!["17:00", "17:05", "17:10", "17:15", "17:20", "17:25", "17:30"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AvailabilityEngine {
    working_day: WorkingDay,
    exclude_break: bool,
}

impl AvailabilityEngine {
    /// Creates an engine over the default 09:00-18:00 day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working day.
    pub fn with_working_day(mut self, working_day: WorkingDay) -> Self {
        self.working_day = working_day;
        self
    }

    /// Treats the configured break as busy for everyone.
    pub fn with_break_excluded(mut self, exclude: bool) -> Self {
        self.exclude_break = exclude;
        self
    }

    /// Busy windows of one person on a date, one per schedule entry.
    ///
    /// Fails on malformed or inverted entries.
    pub fn busy_windows(
        &self,
        date: NaiveDate,
        person_id: &str,
        settings: &Settings,
    ) -> Result<Vec<TimeWindow>> {
        let day = self.working_day.window();
        settings
            .entries_for(date, person_id)
            .map(|e| e.busy_window(day))
            .collect()
    }

    /// Intervals within the working day when every listed person is free.
    pub fn free_windows<S: AsRef<str>>(
        &self,
        date: NaiveDate,
        person_ids: &[S],
        settings: &Settings,
    ) -> Result<Vec<TimeWindow>> {
        let mut available = vec![self.working_day.window()];

        if self.exclude_break {
            if let Some(break_window) = settings.break_window()? {
                available = subtract_window(&available, &break_window);
            }
        }

        let mut busy = Vec::new();
        for person_id in person_ids {
            busy.extend(self.busy_windows(date, person_id.as_ref(), settings)?);
        }
        for window in merge_windows(&busy) {
            available = subtract_window(&available, &window);
        }
        Ok(available)
    }

    /// Step-aligned start minutes where a `duration_min` slot fits for all.
    pub fn slot_starts<S: AsRef<str>>(
        &self,
        date: NaiveDate,
        person_ids: &[S],
        duration_min: i32,
        settings: &Settings,
    ) -> Result<Vec<i32>> {
        if duration_min <= 0 || duration_min > MINUTES_PER_DAY {
            return Err(StandupError::InvalidDuration(duration_min));
        }
        let step = self.working_day.slot_step_min;
        let free = self.free_windows(date, person_ids, settings)?;

        let mut starts = Vec::new();
        for window in &free {
            let mut t = align_up(window.start_min, step);
            while t + duration_min <= window.end_min {
                starts.push(t);
                t += step;
            }
        }
        trace!(
            "{} free window(s), {} slot(s) of {} min on {}",
            free.len(),
            starts.len(),
            duration_min,
            date
        );
        Ok(starts)
    }

    /// Start times (`HH:MM`) where a `duration_min` slot fits for all.
    pub fn common_free_slots<S: AsRef<str>>(
        &self,
        date: NaiveDate,
        person_ids: &[S],
        duration_min: i32,
        settings: &Settings,
    ) -> Result<Vec<String>> {
        self.slot_starts(date, person_ids, duration_min, settings)?
            .into_iter()
            .map(format_time)
            .collect()
    }

    /// The subset of `person_ids` free at `minute`.
    ///
    /// Outside the working day nobody is free.
    pub fn free_people_at<S: AsRef<str>>(
        &self,
        date: NaiveDate,
        minute: i32,
        person_ids: &[S],
        settings: &Settings,
    ) -> Result<Vec<String>> {
        let mut free = Vec::new();
        for person_id in person_ids {
            let windows = self.free_windows(date, std::slice::from_ref(person_id), settings)?;
            if windows.iter().any(|w| w.contains(minute)) {
                free.push(person_id.as_ref().to_string());
            }
        }
        Ok(free)
    }
}

/// Common free start times over the default working day.
pub fn common_free_slots<S: AsRef<str>>(
    date: NaiveDate,
    person_ids: &[S],
    duration_min: i32,
    settings: &Settings,
) -> Result<Vec<String>> {
    AvailabilityEngine::new().common_free_slots(date, person_ids, duration_min, settings)
}

fn align_up(minute: i32, step: i32) -> i32 {
    let rem = minute.rem_euclid(step);
    if rem == 0 {
        minute
    } else {
        minute + step - rem
    }
}
