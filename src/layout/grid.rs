//! Month grid geometry.
//!
//! Columns 0-6 are Sunday-Saturday. Column 7 holds weekly summary notes
//! and no date maps to it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::GridGeometry;

/// Column index of the weekly summary column.
pub const WEEKLY_COLUMN: u32 = 7;

/// A day cell in the month grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CellPosition {
    /// Week row (0 = first week of the month).
    pub week_row: u32,
    /// Day column (0 = Sunday).
    pub day_column: u32,
}

impl CellPosition {
    /// Top-left corner of this cell in board units.
    pub fn origin(&self, geometry: &GridGeometry) -> (f64, f64) {
        (
            f64::from(self.day_column) * geometry.cell_width,
            geometry.header_height + f64::from(self.week_row) * geometry.cell_height,
        )
    }
}

/// Weekday of the first day of a month (0 = Sunday).
pub fn first_weekday_of_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.weekday().num_days_from_sunday())
}

/// Number of days in a month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Number of week rows a month occupies.
pub fn week_rows(year: i32, month: u32) -> Option<u32> {
    let first = first_weekday_of_month(year, month)?;
    let days = days_in_month(year, month)?;
    Some((first + days).div_ceil(7))
}

/// Grid cell for a day of a month, or `None` when the day does not exist.
pub fn cell_for_day(year: i32, month: u32, day: u32) -> Option<CellPosition> {
    let days = days_in_month(year, month)?;
    if day == 0 || day > days {
        return None;
    }
    let first = first_weekday_of_month(year, month)?;
    Some(CellPosition {
        week_row: (first + day - 1) / 7,
        day_column: (first + day - 1) % 7,
    })
}

/// Grid cell of a date within its month.
pub fn date_to_cell(date: NaiveDate) -> CellPosition {
    let first = date
        .with_day(1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let offset = first + date.day() - 1;
    CellPosition {
        week_row: offset / 7,
        day_column: offset % 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_weekday_and_days() {
        // April 2025 starts on a Tuesday
        assert_eq!(first_weekday_of_month(2025, 4), Some(2));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn test_date_to_cell() {
        assert_eq!(
            date_to_cell(date(2025, 4, 1)),
            CellPosition { week_row: 0, day_column: 2 }
        );
        assert_eq!(
            date_to_cell(date(2025, 4, 10)),
            CellPosition { week_row: 1, day_column: 4 }
        );
        assert_eq!(
            date_to_cell(date(2025, 4, 30)),
            CellPosition { week_row: 4, day_column: 3 }
        );
        // June 2025 starts on a Sunday
        assert_eq!(
            date_to_cell(date(2025, 6, 1)),
            CellPosition { week_row: 0, day_column: 0 }
        );
    }

    #[test]
    fn test_cell_matches_weekday_and_never_weekly_column() {
        let mut d = date(2024, 1, 1);
        while d < date(2026, 1, 1) {
            let cell = date_to_cell(d);
            assert_eq!(cell.day_column, d.weekday().num_days_from_sunday());
            assert!(cell.day_column < WEEKLY_COLUMN);
            assert!(cell.week_row < week_rows(d.year(), d.month()).unwrap());
            assert_eq!(cell_for_day(d.year(), d.month(), d.day()), Some(cell));
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_cell_for_missing_day() {
        assert_eq!(cell_for_day(2025, 2, 29), None);
        assert_eq!(cell_for_day(2025, 4, 0), None);
        assert_eq!(cell_for_day(2025, 4, 31), None);
    }

    #[test]
    fn test_week_rows() {
        assert_eq!(week_rows(2025, 4), Some(5));
        assert_eq!(week_rows(2026, 2), Some(4)); // Feb 2026 starts on Sunday
        assert_eq!(week_rows(2025, 8), Some(6));
    }

    #[test]
    fn test_origin() {
        let g = GridGeometry::default();
        let cell = CellPosition { week_row: 1, day_column: 4 };
        assert_eq!(cell.origin(&g), (4.0 * 640.0, 120.0 + 480.0));
    }
}
