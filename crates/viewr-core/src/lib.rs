//! Core types for the Market Viewr client.
//!
//! This crate holds everything that does not touch the network:
//! - `Table`: header cells, body rows and the attributes the page keeps on a table
//! - `sort_table`: type-inferring, direction-toggling row sort
//! - `CellValue`: timestamp / number / text classification of cell text
//! - `AccountFilter`: excluded-accounts state for the order book

pub mod direction;
pub mod error;
pub mod filter;
pub mod sort;
pub mod table;
pub mod value;

pub use direction::SortDirection;
pub use error::{CoreError, Result};
pub use filter::AccountFilter;
pub use sort::{apply_order, compute_order, sort_table, SortOutcome};
pub use table::{
    Cell, HeaderCell, Row, SortSurface, Table, SORT_DIRECTION_ATTR, SORT_INITIALIZED_ATTR,
};
pub use value::{
    classify, compare_cells, locale_compare, parse_number, parse_timestamp, CellValue,
    ParseStrategy, SortKey, ValueKind, STRATEGY_CHAIN,
};
