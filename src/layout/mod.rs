//! Calendar grid layout.
//!
//! Maps dates to month-grid cells and packs per-day items into
//! non-overlapping slots. The output is grid slots plus board
//! coordinates; drawing and persisting them is the caller's job.
//!
//! # Cell Layout
//!
//! ```text
//! +-------------------+-------------------+
//! | day label                             |
//! +-------------------+-------------------+
//! | team zone         | personal zone     |
//! | (tasks, N cols)   | (notes, 2 cols)   |
//! +-------------------+-------------------+
//! ```

mod batch;
mod grid;
mod packer;

pub use batch::{items_for_date, reorganize, CancellationToken, DayLayout};
pub use grid::{
    cell_for_day, date_to_cell, days_in_month, first_weekday_of_month, week_rows, CellPosition,
    WEEKLY_COLUMN,
};
pub use packer::{
    pack_items_in_cell, pack_personal_notes, CellLayout, LayoutItem, PersonalNote, Placement,
};
