//! Client for the Market Viewr HTTP API.
//!
//! Two endpoints feed the market page:
//! - `GET /api/orderbook/{token}[?exclude=a,b]`: full buy/sell book plus the
//!   most active accounts
//! - `GET /api/chart/{token}/{timespan}`: candlestick figure JSON
//!
//! `MarketApi` abstracts the transport so page logic can run against
//! `MockMarketApi` in tests.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{ApiCall, BoxFuture, MarketApi, MockMarketApi};
pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use types::{ActiveAccount, BookOrder, ChartFigure, OrderBookResponse, OrderId, Timespan};
