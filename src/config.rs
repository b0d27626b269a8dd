//! Engine configuration.
//!
//! Working hours and board geometry. Every field has a default, so a
//! partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StandupError};
use crate::models::time::{SLOT_STEP, WORK_DAY_END, WORK_DAY_START};
use crate::models::TimeWindow;

/// Scheduling window and slot granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkingDay {
    /// Day start (minutes since midnight).
    pub start_min: i32,
    /// Day end (minutes since midnight).
    pub end_min: i32,
    /// Slot step (minutes).
    pub slot_step_min: i32,
}

impl Default for WorkingDay {
    fn default() -> Self {
        Self {
            start_min: WORK_DAY_START,
            end_min: WORK_DAY_END,
            slot_step_min: SLOT_STEP,
        }
    }
}

impl WorkingDay {
    /// The working day as a window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_min, self.end_min)
    }
}

/// Fixed month-board geometry (board units).
///
/// Each day cell is split by a divider at half width: the left half
/// holds team items, the right half holds personal notes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridGeometry {
    /// Width of one day cell.
    pub cell_width: f64,
    /// Height of one week row.
    pub cell_height: f64,
    /// Height of the month header above the first row.
    pub header_height: f64,
    /// Height of the day label strip at the top of each cell.
    pub day_label_height: f64,
    /// Width of one item.
    pub item_width: f64,
    /// Height of one item.
    pub item_height: f64,
    /// Gap between items and from cell edges.
    pub gap: f64,
    /// Columns in the personal zone.
    pub personal_columns: usize,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_width: 640.0,
            cell_height: 480.0,
            header_height: 120.0,
            day_label_height: 40.0,
            item_width: 120.0,
            item_height: 60.0,
            gap: 10.0,
            personal_columns: 2,
        }
    }
}

impl GridGeometry {
    /// Half of a cell's width (one zone).
    #[inline]
    pub fn half_cell_width(&self) -> f64 {
        self.cell_width / 2.0
    }

    /// Columns that fit in the team zone (at least 1).
    pub fn team_columns(&self) -> usize {
        let cols = ((self.half_cell_width() - self.gap) / (self.item_width + self.gap)).floor();
        if cols.is_finite() && cols >= 1.0 {
            cols as usize
        } else {
            1
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub working_day: WorkingDay,
    pub grid: GridGeometry,
}

impl BoardConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.working_day.end_min <= config.working_day.start_min {
            return Err(StandupError::InvalidInterval {
                start: config.working_day.start_min,
                end: config.working_day.end_min,
            });
        }
        if config.working_day.slot_step_min <= 0 {
            return Err(StandupError::InvalidDuration(config.working_day.slot_step_min));
        }
        Ok(config)
    }
}
