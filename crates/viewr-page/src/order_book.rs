//! Order book tables.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};
use viewr_client::BookOrder;
use viewr_core::{sort_table, Cell, Row, SortDirection, SortSurface, Table};

use crate::formatting::{apply_column_classes, BUY_BOOK_TABLE, SELL_BOOK_TABLE};

/// Text of the row shown when a book side is empty.
pub const EMPTY_BOOK_MESSAGE: &str = "No orders available";

/// Placeholder span used when the table has no header cells.
const DEFAULT_PLACEHOLDER_SPAN: usize = 5;

/// Fixed decimals for quantity, total and price cells.
const BOOK_DECIMALS: usize = 8;

const NUMBER_CLASSES: [&str; 2] = ["number-cell", "text-end"];
const EMPTY_CLASSES: [&str; 3] = ["text-center", "text-muted", "empty-state"];

/// Buy or sell side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSide {
    Buy,
    Sell,
}

impl BookSide {
    pub fn table_id(self) -> &'static str {
        match self {
            Self::Buy => BUY_BOOK_TABLE,
            Self::Sell => SELL_BOOK_TABLE,
        }
    }

    /// Column labels; the price sits next to the spread on both sides.
    pub fn headers(self) -> [&'static str; 5] {
        match self {
            Self::Buy => ["Order ID", "Account", "Quantity", "Total", "Price"],
            Self::Sell => ["Price", "Total", "Quantity", "Account", "Order ID"],
        }
    }

    /// Price column and the direction it is sorted in after each refresh:
    /// best bid first on the buy side, best ask first on the sell side.
    pub fn price_sort(self) -> (usize, SortDirection) {
        match self {
            Self::Buy => (4, SortDirection::Descending),
            Self::Sell => (0, SortDirection::Ascending),
        }
    }

    /// Empty table with this side's id and headers.
    pub fn empty_table(self) -> Table {
        Table::new(self.table_id(), self.headers())
    }

    /// Render one order as a table row.
    pub fn order_row(self, order: &BookOrder) -> Row {
        let quantity = Cell::new(fixed(order.quantity)).with_classes(NUMBER_CLASSES);
        let total = Cell::new(fixed(order.total())).with_classes(NUMBER_CLASSES);
        let id = Cell::new(order.id.to_string());
        let account = Cell::new(order.account.clone());

        match self {
            Self::Buy => {
                let price = Cell::new(fixed(order.price)).with_classes([
                    "text-success",
                    "fw-bold",
                    "number-cell",
                    "text-end",
                    "price-column",
                ]);
                Row::new(vec![id, account, quantity, total, price])
            }
            Self::Sell => {
                let price = Cell::new(fixed(order.price)).with_classes([
                    "text-danger",
                    "fw-bold",
                    "number-cell",
                    "text-end",
                    "price-column",
                ]);
                Row::new(vec![price, total, quantity, account, id])
            }
        }
    }
}

/// Replace the table body with `orders` and sort it by price.
///
/// An empty side gets a single placeholder row spanning every column.
/// Returns false (and leaves the table alone) when it has no body.
pub fn populate_order_book(table: &mut Table, side: BookSide, orders: &[BookOrder]) -> bool {
    if !table.has_body() {
        warn!(table = table.id(), "Order book table has no body");
        return false;
    }

    table.clear_rows();

    if orders.is_empty() {
        let span = match table.header_count() {
            0 => DEFAULT_PLACEHOLDER_SPAN,
            n => n,
        };
        let mut row = Row::placeholder(EMPTY_BOOK_MESSAGE, span);
        for cell in row.cells_mut() {
            for class in EMPTY_CLASSES {
                cell.add_class(class);
            }
        }
        table.push_row(row);
    } else {
        for order in orders {
            table.push_row(side.order_row(order));
        }
        let (column, direction) = side.price_sort();
        sort_table(table, column, Some(direction));
    }

    apply_column_classes(table);
    debug!(table = table.id(), orders = orders.len(), "Order book updated");
    true
}

/// Round half away from zero, then pad to `BOOK_DECIMALS` places.
fn fixed(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(BOOK_DECIMALS as u32, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", BOOK_DECIMALS, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use viewr_client::OrderId;
    use viewr_core::SORT_DIRECTION_ATTR;

    fn order(id: i64, account: &str, quantity: Decimal, price: Decimal) -> BookOrder {
        BookOrder {
            id: OrderId::Number(id),
            account: account.to_string(),
            quantity,
            price,
        }
    }

    fn column(table: &Table, index: usize) -> Vec<String> {
        table
            .column_texts(index)
            .into_iter()
            .map(|text| text.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_buy_rows_best_bid_first() {
        let mut table = BookSide::Buy.empty_table();
        let orders = [
            order(1, "alice", dec!(10), dec!(0.25)),
            order(2, "bob", dec!(1.5), dec!(1.2)),
            order(3, "carol", dec!(4), dec!(0.3)),
        ];
        assert!(populate_order_book(&mut table, BookSide::Buy, &orders));

        assert_eq!(column(&table, 4), ["1.20000000", "0.30000000", "0.25000000"]);
        assert_eq!(column(&table, 1), ["bob", "carol", "alice"]);
        assert_eq!(column(&table, 3)[0], "1.80000000");
        assert_eq!(table.attribute(SORT_DIRECTION_ATTR), Some("desc"));
        assert_eq!(table.headers()[4].marker_class(), Some("sorted-desc"));
    }

    #[test]
    fn test_sell_rows_best_ask_first() {
        let mut table = BookSide::Sell.empty_table();
        let orders = [
            order(7, "dave", dec!(2), dec!(0.5)),
            order(8, "erin", dec!(3), dec!(0.45)),
        ];
        populate_order_book(&mut table, BookSide::Sell, &orders);

        assert_eq!(column(&table, 0), ["0.45000000", "0.50000000"]);
        assert_eq!(column(&table, 4), ["8", "7"]);
        let price = table.rows().unwrap()[0].cell(0).unwrap();
        assert!(price.has_class("text-danger"));
        assert_eq!(table.attribute(SORT_DIRECTION_ATTR), Some("asc"));
    }

    #[test]
    fn test_fixed_rounds_last_place() {
        assert_eq!(fixed(dec!(0.123456789)), "0.12345679");
        assert_eq!(fixed(dec!(1.999999999)), "2.00000000");
        assert_eq!(fixed(dec!(-0.000000005)), "-0.00000001");
        assert_eq!(fixed(dec!(3)), "3.00000000");
    }

    #[test]
    fn test_total_rounded_in_row() {
        let mut table = BookSide::Buy.empty_table();
        let orders = [order(1, "alice", dec!(0.33333333), dec!(0.33333333))];
        populate_order_book(&mut table, BookSide::Buy, &orders);

        assert_eq!(column(&table, 3), ["0.11111111"]);
    }

    #[test]
    fn test_empty_side_placeholder() {
        let mut table = BookSide::Buy.empty_table();
        populate_order_book(&mut table, BookSide::Buy, &[order(1, "a", dec!(1), dec!(1))]);
        populate_order_book(&mut table, BookSide::Buy, &[]);

        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 1);
        let cell = rows[0].cell(0).unwrap();
        assert_eq!(cell.text(), EMPTY_BOOK_MESSAGE);
        assert_eq!(cell.colspan(), Some(5));
        assert!(cell.has_class("empty-state"));
    }

    #[test]
    fn test_placeholder_span_follows_headers() {
        let mut table = Table::new(SELL_BOOK_TABLE, ["Price", "Amount", "Account"]);
        populate_order_book(&mut table, BookSide::Sell, &[]);
        assert_eq!(table.rows().unwrap()[0].cell(0).unwrap().colspan(), Some(3));

        let mut headless = Table::new(SELL_BOOK_TABLE, Vec::<String>::new());
        populate_order_book(&mut headless, BookSide::Sell, &[]);
        assert_eq!(headless.rows().unwrap()[0].cell(0).unwrap().colspan(), Some(5));
    }

    #[test]
    fn test_missing_body_untouched() {
        let mut table = Table::without_body(BUY_BOOK_TABLE, BookSide::Buy.headers());
        let before = table.clone();
        assert!(!populate_order_book(&mut table, BookSide::Buy, &[]));
        assert_eq!(table, before);
    }
}
