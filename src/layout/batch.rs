//! Batch reorganization across many dates.
//!
//! The cancellation token is checked between dates, so a stop request
//! takes effect after at most one more cell.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};

use super::packer::{pack_items_in_cell, pack_personal_notes, CellLayout, LayoutItem, PersonalNote};
use crate::config::GridGeometry;
use crate::error::{Result, StandupError};
use crate::models::Task;

/// Shared stop flag for long-running batches.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Layout of one date cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLayout {
    /// Team-zone task placements.
    pub tasks: CellLayout,
    /// Personal-zone note placements.
    pub notes: CellLayout,
}

/// Team-zone items for the tasks on `date`, in task-list order.
///
/// Tasks with a malformed start time fail the whole call.
pub fn items_for_date(date: NaiveDate, tasks: &[Task]) -> Result<Vec<LayoutItem>> {
    tasks
        .iter()
        .filter(|t| t.is_on(date))
        .map(|t| {
            Ok(LayoutItem {
                id: t.id.clone(),
                start_min: t.start_min()?,
            })
        })
        .collect()
}

/// Lays out every date in `dates`.
///
/// Positions are recomputed from the current task list, so deleted
/// tasks drop out. Returns [`StandupError::Cancelled`] if `cancel`
/// fires before the batch finishes.
pub fn reorganize(
    dates: &[NaiveDate],
    tasks: &[Task],
    notes: &BTreeMap<NaiveDate, Vec<PersonalNote>>,
    geometry: &GridGeometry,
    cancel: &CancellationToken,
) -> Result<BTreeMap<NaiveDate, DayLayout>> {
    let mut layouts = BTreeMap::new();

    for (done, &date) in dates.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!("reorganize stopped after {}/{} dates", done, dates.len());
            return Err(StandupError::Cancelled);
        }

        let items = items_for_date(date, tasks)?;
        let day_notes = notes.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let layout = DayLayout {
            tasks: pack_items_in_cell(date, &items, geometry),
            notes: pack_personal_notes(date, day_notes, geometry),
        };
        debug!(
            "{}: {} task(s), {} note(s)",
            date,
            layout.tasks.len(),
            layout.notes.len()
        );
        layouts.insert(date, layout);
    }

    Ok(layouts)
}
