//! Table ids, column classes and sort wiring for the market page tables.

use tracing::debug;
use viewr_core::{SortDirection, Table, SORT_DIRECTION_ATTR, SORT_INITIALIZED_ATTR};

pub const BUY_BOOK_TABLE: &str = "buy-book-table";
pub const SELL_BOOK_TABLE: &str = "sell-book-table";
pub const TRADE_HISTORY_TABLE: &str = "trade-history-table";

const NUMBER_CLASSES: &[&str] = &["number-cell", "text-end"];

struct ColumnRule {
    table_id: &'static str,
    columns: &'static [usize],
    classes: &'static [&'static str],
}

static COLUMN_RULES: [ColumnRule; 5] = [
    ColumnRule {
        table_id: BUY_BOOK_TABLE,
        columns: &[2, 3, 4],
        classes: NUMBER_CLASSES,
    },
    ColumnRule {
        table_id: SELL_BOOK_TABLE,
        columns: &[0, 1, 2],
        classes: NUMBER_CLASSES,
    },
    ColumnRule {
        table_id: BUY_BOOK_TABLE,
        columns: &[4],
        classes: &["price-column", "text-success", "fw-bold"],
    },
    ColumnRule {
        table_id: SELL_BOOK_TABLE,
        columns: &[0],
        classes: &["price-column", "text-danger", "fw-bold"],
    },
    ColumnRule {
        table_id: TRADE_HISTORY_TABLE,
        columns: &[4, 5, 6],
        classes: NUMBER_CLASSES,
    },
];

/// Add the column classes for this table's id. Spanning rows are skipped.
///
/// Idempotent; tables with other ids are left untouched.
pub fn apply_column_classes(table: &mut Table) {
    let rules: Vec<&ColumnRule> = COLUMN_RULES
        .iter()
        .filter(|rule| rule.table_id == table.id())
        .collect();
    if rules.is_empty() {
        return;
    }
    let Some(rows) = table.rows_mut() else {
        return;
    };

    for row in rows.iter_mut().filter(|row| !row.is_placeholder()) {
        for rule in &rules {
            for &column in rule.columns {
                if let Some(cell) = row.cells_mut().get_mut(column) {
                    for class in rule.classes {
                        cell.add_class(class);
                    }
                }
            }
        }
    }
}

/// Mark a table as click-sortable, once.
///
/// Returns false if it was already initialized.
pub fn initialize_sorting(table: &mut Table) -> bool {
    if table.has_attribute(SORT_INITIALIZED_ATTR) {
        return false;
    }
    table.set_attribute(SORT_INITIALIZED_ATTR, "true");
    table.set_attribute(SORT_DIRECTION_ATTR, SortDirection::Ascending.as_attr());
    debug!(table = table.id(), headers = table.headers().len(), "Sorting initialized");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewr_core::Row;

    #[test]
    fn test_buy_columns() {
        let mut table = Table::new(BUY_BOOK_TABLE, ["ID", "Account", "Qty", "Total", "Price"])
            .with_rows([
                Row::from_texts(["1", "alice", "1.0", "2.0", "2.0"]),
                Row::placeholder("No orders available", 5),
            ]);
        apply_column_classes(&mut table);

        let rows = table.rows().unwrap();
        assert!(!rows[0].cell(1).unwrap().has_class("number-cell"));
        assert!(rows[0].cell(2).unwrap().has_class("text-end"));
        let price = rows[0].cell(4).unwrap();
        assert!(price.has_class("price-column"));
        assert!(price.has_class("text-success"));
        assert!(!rows[1].cell(0).unwrap().has_class("number-cell"));
    }

    #[test]
    fn test_sell_and_other_tables() {
        let mut sell = Table::new(SELL_BOOK_TABLE, ["Price"])
            .with_rows([Row::from_texts(["1.0", "2.0", "3.0", "bob"])]);
        apply_column_classes(&mut sell);
        let row = &sell.rows().unwrap()[0];
        assert!(row.cell(0).unwrap().has_class("text-danger"));
        assert!(row.cell(2).unwrap().has_class("number-cell"));
        assert!(!row.cell(3).unwrap().has_class("number-cell"));

        let mut other = Table::new("richlist", ["A"]).with_rows([Row::from_texts(["1"])]);
        let before = other.clone();
        apply_column_classes(&mut other);
        assert_eq!(other, before);
    }

    #[test]
    fn test_initialize_once() {
        let mut table = Table::new(TRADE_HISTORY_TABLE, ["Date"]);
        assert!(initialize_sorting(&mut table));
        assert_eq!(table.attribute(SORT_DIRECTION_ATTR), Some("asc"));

        table.set_attribute(SORT_DIRECTION_ATTR, "desc");
        assert!(!initialize_sorting(&mut table));
        assert_eq!(table.attribute(SORT_DIRECTION_ATTR), Some("desc"));
    }
}
