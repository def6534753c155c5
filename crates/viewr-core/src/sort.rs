//! Table sort utility.
//!
//! `sort_table` is the entry point used by header clicks and data refreshes.
//! It is split into a pure `compute_order` (rows → permutation) and a thin
//! `apply_order` that mutates the table.
//!
//! Rows that are spanning placeholders, or that lack a cell at the sorted
//! column, are neutral: they keep their slot and never move. All other rows
//! are stably sorted among the remaining slots.

use std::cmp::Ordering;

use tracing::debug;

use crate::direction::SortDirection;
use crate::table::{Row, SortSurface};
use crate::value::SortKey;

/// Result of a `sort_table` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    /// Rows were sorted and the direction stored.
    Sorted {
        direction: SortDirection,
        /// Number of rows that ended up in a different slot.
        moved: usize,
    },
    /// The table has no body; nothing was touched.
    NoBody,
}

/// Sort a table's body rows by `column`.
///
/// With `forced` set the direction is taken as given; otherwise the stored
/// direction attribute is toggled. Never fails: a table without body is left
/// untouched, and rows lacking the column keep their place.
pub fn sort_table<T>(table: &mut T, column: usize, forced: Option<SortDirection>) -> SortOutcome
where
    T: SortSurface + ?Sized,
{
    let Some(rows) = table.body_rows() else {
        debug!(column, "Table has no body, skipping sort");
        return SortOutcome::NoBody;
    };

    let direction = SortDirection::resolve(table.sort_direction_attr(), forced);
    let order = compute_order(rows, column, direction);
    let moved = order
        .iter()
        .enumerate()
        .filter(|(slot, index)| slot != *index)
        .count();

    apply_order(table, &order, column, direction);

    debug!(
        column,
        %direction,
        forced = forced.is_some(),
        rows = order.len(),
        moved,
        "Table sorted"
    );

    SortOutcome::Sorted { direction, moved }
}

/// Compute the new row order without touching the table.
///
/// Returns a permutation: `order[slot]` is the index of the row that goes
/// into `slot`.
pub fn compute_order(rows: &[Row], column: usize, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let keyed: Vec<(usize, SortKey)> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.is_placeholder())
        .filter_map(|(index, row)| {
            row.cell(column)
                .map(|cell| (index, SortKey::new(cell.trimmed_text())))
        })
        .collect();
    let slots: Vec<usize> = keyed.iter().map(|(index, _)| *index).collect();

    let mut compare =
        |(_, a): &(usize, SortKey), (_, b): &(usize, SortKey)| direction.apply(a.compare(b));
    let sorted = merge_sort_by(keyed, &mut compare);

    for (slot, (index, _)) in slots.into_iter().zip(sorted) {
        order[slot] = index;
    }
    order
}

/// Re-append rows in `order`, store `direction` and move the header marker
/// to `column`.
pub fn apply_order<T>(table: &mut T, order: &[usize], column: usize, direction: SortDirection)
where
    T: SortSurface + ?Sized,
{
    table.reorder_rows(order);
    table.set_sort_direction_attr(direction.as_attr());
    for index in 0..table.header_count() {
        table.set_header_marker(index, (index == column).then_some(direction));
    }
}

/// Stable top-down merge sort.
///
/// Unlike `slice::sort_by` it tolerates comparators that are not a total
/// order (cells of mixed kinds in one column can produce one) and never panics.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}
