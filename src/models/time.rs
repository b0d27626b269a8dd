//! Minute-resolution time of day and half-open intervals.
//!
//! # Time Model
//! All times are minutes since local midnight of the date being scheduled.
//! The working day spans 09:00-18:00 and scheduling happens on a
//! 5-minute grid.
//!
//! # Overlap
//! [`TimeWindow::overlaps`] is the only overlap predicate in the crate.
//! Intervals are half-open, so touching windows do not overlap and a
//! zero-length window overlaps nothing.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StandupError};

/// Start of the working day (09:00).
pub const WORK_DAY_START: i32 = 9 * 60;
/// End of the working day (18:00).
pub const WORK_DAY_END: i32 = 18 * 60;
/// Scheduling granularity (minutes).
pub const SLOT_STEP: i32 = 5;
/// Minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// A time interval [start, end) in minutes since midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start_min: i32,
    /// Interval end (exclusive).
    pub end_min: i32,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_min: i32, end_min: i32) -> Self {
        Self { start_min, end_min }
    }

    /// Creates a window, rejecting `end <= start`.
    pub fn checked(start_min: i32, end_min: i32) -> Result<Self> {
        if end_min <= start_min {
            return Err(StandupError::InvalidInterval {
                start: start_min,
                end: end_min,
            });
        }
        Ok(Self::new(start_min, end_min))
    }

    /// Creates a window from a start and a duration.
    pub fn from_duration(start_min: i32, duration_min: i32) -> Result<Self> {
        if duration_min < 0 {
            return Err(StandupError::InvalidDuration(duration_min));
        }
        let end_min = start_min
            .checked_add(duration_min)
            .ok_or(StandupError::InvalidDuration(duration_min))?;
        Ok(Self::new(start_min, end_min))
    }

    /// The 09:00-18:00 working day.
    pub fn working_day() -> Self {
        Self::new(WORK_DAY_START, WORK_DAY_END)
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn duration_min(&self) -> i32 {
        self.end_min - self.start_min
    }

    /// Whether the window has no extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end_min <= self.start_min
    }

    /// Whether a minute falls within this window.
    #[inline]
    pub fn contains(&self, minute: i32) -> bool {
        minute >= self.start_min && minute < self.end_min
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Intersection of two windows, if non-empty.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start_min.max(other.start_min);
        let end = self.end_min.min(other.end_min);
        (end > start).then(|| Self::new(start, end))
    }
}

/// Parses a 24h `HH:MM` string into minutes since midnight.
///
/// `24:00` is accepted as the end-of-day boundary.
pub fn parse_time(hhmm: &str) -> Result<i32> {
    let invalid = || StandupError::InvalidTime(hhmm.to_string());
    let (h, m) = hhmm.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = h.parse().map_err(|_| invalid())?;
    let minutes: i32 = m.parse().map_err(|_| invalid())?;
    if !(0..60).contains(&minutes) || !(0..=24).contains(&hours) {
        return Err(invalid());
    }
    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Formats minutes since midnight as zero-padded `HH:MM`.
pub fn format_time(minutes: i32) -> Result<String> {
    if !(0..=MINUTES_PER_DAY).contains(&minutes) {
        return Err(StandupError::TimeOutOfRange(minutes));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Merges windows into a sorted list of disjoint, non-touching windows.
pub fn merge_windows(windows: &[TimeWindow]) -> Vec<TimeWindow> {
    let mut sorted: Vec<TimeWindow> = windows.iter().copied().filter(|w| !w.is_empty()).collect();
    sorted.sort_by_key(|w| (w.start_min, w.end_min));

    let mut merged: Vec<TimeWindow> = Vec::with_capacity(sorted.len());
    for w in sorted {
        match merged.last_mut() {
            Some(last) if w.start_min <= last.end_min => {
                last.end_min = last.end_min.max(w.end_min);
            }
            _ => merged.push(w),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:00").unwrap(), 540);
        assert_eq!(parse_time("9:05").unwrap(), 545);
        assert_eq!(parse_time("18:00").unwrap(), 1080);
        assert_eq!(parse_time("00:00").unwrap(), 0);
        assert_eq!(parse_time("24:00").unwrap(), 1440);
    }

    #[test]
    fn test_parse_time_rejects_malformed() {
        for bad in [
            "", "9", "09:0", "09:60", "25:00", "24:01", "ab:cd", "09-00", "123:00",
            "09:+5", "+9:00", "-0:30", "9 :00", "09:0x",
        ] {
            assert!(parse_time(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(540).unwrap(), "09:00");
        assert_eq!(format_time(725).unwrap(), "12:05");
        assert_eq!(format_time(0).unwrap(), "00:00");
        assert!(format_time(-5).is_err());
        assert!(format_time(1445).is_err());
    }

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(540, 600);
        assert_eq!(w.duration_min(), 60);
        assert!(w.contains(540));
        assert!(w.contains(599));
        assert!(!w.contains(600)); // exclusive end
        assert!(!TimeWindow::working_day().is_empty());
    }

    #[test]
    fn test_checked_rejects_inverted() {
        assert!(TimeWindow::checked(600, 540).is_err());
        assert!(TimeWindow::checked(600, 600).is_err());
        assert!(TimeWindow::checked(540, 600).is_ok());
        assert!(TimeWindow::from_duration(540, -1).is_err());
    }

    #[test]
    fn test_from_duration_overflow_is_an_error() {
        assert!(matches!(
            TimeWindow::from_duration(600, i32::MAX),
            Err(StandupError::InvalidDuration(i32::MAX))
        ));
        assert_eq!(
            TimeWindow::from_duration(600, 30).unwrap(),
            TimeWindow::new(600, 630)
        );
    }

    #[test]
    fn test_overlap_touching() {
        let a = TimeWindow::new(540, 570);
        let b = TimeWindow::new(555, 585);
        let c = TimeWindow::new(570, 600);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // touching but not overlapping
    }

    #[test]
    fn test_overlap_symmetric_and_zero_length() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let s1 = rng.random_range(0..200);
            let s2 = rng.random_range(0..200);
            let a = TimeWindow::new(s1, s1 + rng.random_range(0..50));
            let b = TimeWindow::new(s2, s2 + rng.random_range(0..50));
            assert_eq!(a.overlaps(&b), b.overlaps(&a));

            let zero = TimeWindow::new(s1, s1);
            assert!(!zero.overlaps(&b));
            assert!(!b.overlaps(&zero));
        }
    }

    #[test]
    fn test_merge_windows() {
        let merged = merge_windows(&[
            TimeWindow::new(600, 660),
            TimeWindow::new(540, 570),
            TimeWindow::new(570, 580),
            TimeWindow::new(650, 700),
            TimeWindow::new(800, 800),
        ]);
        assert_eq!(
            merged,
            vec![TimeWindow::new(540, 580), TimeWindow::new(600, 700)]
        );
    }
}
