//! Market page controller.
//!
//! Wires the sort utility, the excluded-accounts filter and the API client
//! into the state of one token's market page:
//! - buy/sell order book tables, re-sorted by price on every refresh
//! - most-active-accounts list with per-account include/exclude
//! - candlestick chart with timespan selection and light/dark theme

pub mod accounts;
pub mod error;
pub mod formatting;
pub mod order_book;
pub mod page;
pub mod theme;
pub mod token;

pub use accounts::{AccountEntry, AccountsView, NO_ACCOUNTS_MESSAGE};
pub use error::{PageError, PageResult};
pub use formatting::{
    apply_column_classes, initialize_sorting, BUY_BOOK_TABLE, SELL_BOOK_TABLE, TRADE_HISTORY_TABLE,
};
pub use order_book::{populate_order_book, BookSide, EMPTY_BOOK_MESSAGE};
pub use page::{chart_error_message, ChartView, MarketPage, PageEvent};
pub use theme::ChartTheme;
pub use token::resolve_token;
