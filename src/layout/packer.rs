//! Packing of items inside one day cell.
//!
//! The team zone (left half) holds task items, sorted timed-first by
//! start time and then untimed in their original order. The personal
//! zone (right half) holds personal notes in a fixed column count,
//! ordered by their current vertical position so incremental updates
//! move as little as possible.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::grid::date_to_cell;
use crate::config::GridGeometry;

/// An item to place in the team zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutItem {
    /// Item identifier.
    pub id: String,
    /// Start time (minutes). `None` = untimed.
    pub start_min: Option<i32>,
}

impl LayoutItem {
    /// A timed item.
    pub fn timed(id: impl Into<String>, start_min: i32) -> Self {
        Self {
            id: id.into(),
            start_min: Some(start_min),
        }
    }

    /// An untimed item.
    pub fn untimed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_min: None,
        }
    }
}

/// A personal note currently on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalNote {
    /// Note identifier.
    pub id: String,
    /// Current vertical position (board units).
    pub y: f64,
}

/// Computed slot and board position of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    /// Column inside the zone.
    pub col: usize,
    /// Row inside the zone.
    pub row: usize,
    /// Board x of the item's top-left corner.
    pub x: f64,
    /// Board y of the item's top-left corner.
    pub y: f64,
}

/// Computed placements by item id.
pub type CellLayout = HashMap<String, Placement>;

fn place(
    index: usize,
    columns: usize,
    zone_x: f64,
    zone_y: f64,
    geometry: &GridGeometry,
) -> Placement {
    let col = index % columns;
    let row = index / columns;
    Placement {
        col,
        row,
        x: zone_x + geometry.gap + col as f64 * (geometry.item_width + geometry.gap),
        y: zone_y + geometry.gap + row as f64 * (geometry.item_height + geometry.gap),
    }
}

/// Packs team items for `date` into the left half of its cell.
///
/// Items never cross the divider: the column count is the number of
/// items that fit in half a cell, at least 1.
pub fn pack_items_in_cell(
    date: NaiveDate,
    items: &[LayoutItem],
    geometry: &GridGeometry,
) -> CellLayout {
    if items.is_empty() {
        return CellLayout::new();
    }

    let mut ordered: Vec<&LayoutItem> = items.iter().collect();
    // Stable: equal keys (all untimed, or same start) keep input order
    ordered.sort_by_key(|item| match item.start_min {
        Some(start) => (0, start),
        None => (1, 0),
    });

    let (cell_x, cell_y) = date_to_cell(date).origin(geometry);
    let zone_y = cell_y + geometry.day_label_height;
    let columns = geometry.team_columns();

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, item)| (item.id.clone(), place(i, columns, cell_x, zone_y, geometry)))
        .collect()
}

/// Packs personal notes for `date` into the right half of its cell.
pub fn pack_personal_notes(
    date: NaiveDate,
    notes: &[PersonalNote],
    geometry: &GridGeometry,
) -> CellLayout {
    if notes.is_empty() {
        return CellLayout::new();
    }

    let mut ordered: Vec<&PersonalNote> = notes.iter().collect();
    ordered.sort_by(|a, b| a.y.total_cmp(&b.y));

    let (cell_x, cell_y) = date_to_cell(date).origin(geometry);
    let zone_x = cell_x + geometry.half_cell_width();
    let zone_y = cell_y + geometry.day_label_height;
    let columns = geometry.personal_columns.max(1);

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, note)| (note.id.clone(), place(i, columns, zone_x, zone_y, geometry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn slot(layout: &CellLayout, id: &str) -> (usize, usize) {
        let p = layout[id];
        (p.col, p.row)
    }

    #[test]
    fn test_empty_cell() {
        let g = GridGeometry::default();
        assert!(pack_items_in_cell(d(), &[], &g).is_empty());
        assert!(pack_personal_notes(d(), &[], &g).is_empty());
    }

    #[test]
    fn test_timed_first_then_untimed_in_order() {
        let g = GridGeometry::default(); // 2 team columns
        let items = vec![
            LayoutItem::untimed("u1"),
            LayoutItem::timed("late", 900),
            LayoutItem::untimed("u2"),
            LayoutItem::timed("early", 540),
            LayoutItem::untimed("u0"),
        ];
        let layout = pack_items_in_cell(d(), &items, &g);
        assert_eq!(slot(&layout, "early"), (0, 0));
        assert_eq!(slot(&layout, "late"), (1, 0));
        assert_eq!(slot(&layout, "u1"), (0, 1));
        assert_eq!(slot(&layout, "u2"), (1, 1));
        assert_eq!(slot(&layout, "u0"), (0, 2));
    }

    #[test]
    fn test_no_overlap_and_stays_in_team_zone() {
        let g = GridGeometry::default();
        for n in 1..40 {
            let items: Vec<LayoutItem> = (0..n)
                .map(|i| {
                    if i % 3 == 0 {
                        LayoutItem::untimed(format!("i{i}"))
                    } else {
                        LayoutItem::timed(format!("i{i}"), 540 + (i as i32 * 7) % 300)
                    }
                })
                .collect();
            let layout = pack_items_in_cell(d(), &items, &g);
            assert_eq!(layout.len(), n);

            let slots: HashSet<(usize, usize)> = layout.values().map(|p| (p.col, p.row)).collect();
            assert_eq!(slots.len(), n);

            let (cell_x, _) = date_to_cell(d()).origin(&g);
            let divider = cell_x + g.half_cell_width();
            for p in layout.values() {
                assert!(p.x >= cell_x);
                assert!(p.x + g.item_width <= divider);
            }
        }
    }

    #[test]
    fn test_repack_is_stable() {
        let g = GridGeometry::default();
        let items = vec![
            LayoutItem::timed("a", 600),
            LayoutItem::timed("b", 600),
            LayoutItem::untimed("c"),
        ];
        let first = pack_items_in_cell(d(), &items, &g);
        let second = pack_items_in_cell(d(), &items, &g);
        assert_eq!(first, second);
        // Equal start times keep input order
        assert_eq!(slot(&first, "a"), (0, 0));
        assert_eq!(slot(&first, "b"), (1, 0));
    }

    #[test]
    fn test_narrow_cell_uses_one_column() {
        let g = GridGeometry {
            cell_width: 50.0,
            ..GridGeometry::default()
        };
        let items = vec![LayoutItem::untimed("a"), LayoutItem::untimed("b")];
        let layout = pack_items_in_cell(d(), &items, &g);
        assert_eq!(slot(&layout, "a"), (0, 0));
        assert_eq!(slot(&layout, "b"), (0, 1));
    }

    #[test]
    fn test_pixel_offsets() {
        let g = GridGeometry::default();
        let layout = pack_items_in_cell(d(), &[LayoutItem::untimed("a"), LayoutItem::untimed("b")], &g);
        // April 10 2025: row 1, column 4
        let a = layout["a"];
        assert_eq!(a.x, 4.0 * 640.0 + 10.0);
        assert_eq!(a.y, 120.0 + 480.0 + 40.0 + 10.0);
        assert_eq!(layout["b"].x, a.x + 130.0);
    }

    #[test]
    fn test_personal_notes_repack_by_position() {
        let g = GridGeometry::default();
        let notes = vec![
            PersonalNote { id: "n3".into(), y: 900.0 },
            PersonalNote { id: "n1".into(), y: 650.0 },
            PersonalNote { id: "n2".into(), y: 700.0 },
        ];
        let layout = pack_personal_notes(d(), &notes, &g);
        assert_eq!(slot(&layout, "n1"), (0, 0));
        assert_eq!(slot(&layout, "n2"), (1, 0));
        assert_eq!(slot(&layout, "n3"), (0, 1));

        let (cell_x, _) = date_to_cell(d()).origin(&g);
        for p in layout.values() {
            assert!(p.x >= cell_x + g.half_cell_width());
        }
    }
}
