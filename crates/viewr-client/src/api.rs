//! Transport abstraction for the market page.
//!
//! `MarketApi` is what the page controller calls. `ApiClient` implements it
//! over HTTP; `MockMarketApi` returns canned responses and records calls.

use std::future::Future;
use std::pin::Pin;

use parking_lot::Mutex;
use viewr_core::AccountFilter;

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::types::{ChartFigure, OrderBookResponse, Timespan};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Data source for the market page.
pub trait MarketApi: Send + Sync {
    /// Fetch the order book for `token` without the excluded accounts.
    fn order_book<'a>(
        &'a self,
        token: &'a str,
        excluded: &'a AccountFilter,
    ) -> BoxFuture<'a, ClientResult<OrderBookResponse>>;

    /// Fetch the candlestick figure for `token`.
    fn chart<'a>(
        &'a self,
        token: &'a str,
        timespan: Timespan,
    ) -> BoxFuture<'a, ClientResult<ChartFigure>>;
}

impl MarketApi for ApiClient {
    fn order_book<'a>(
        &'a self,
        token: &'a str,
        excluded: &'a AccountFilter,
    ) -> BoxFuture<'a, ClientResult<OrderBookResponse>> {
        Box::pin(self.fetch_order_book(token, excluded))
    }

    fn chart<'a>(
        &'a self,
        token: &'a str,
        timespan: Timespan,
    ) -> BoxFuture<'a, ClientResult<ChartFigure>> {
        Box::pin(self.fetch_chart(token, timespan))
    }
}

/// A recorded `MarketApi` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    OrderBook {
        token: String,
        excluded: Vec<String>,
    },
    Chart {
        token: String,
        timespan: Timespan,
    },
}

/// Mock API for testing.
///
/// Unset responses fail with HTTP 500.
#[derive(Debug, Default)]
pub struct MockMarketApi {
    calls: Mutex<Vec<ApiCall>>,
    order_book: Mutex<Option<OrderBookResponse>>,
    chart: Mutex<Option<ChartFigure>>,
}

impl MockMarketApi {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_order_book(self, book: OrderBookResponse) -> Self {
        self.set_order_book(Some(book));
        self
    }

    #[must_use]
    pub fn with_chart(self, figure: ChartFigure) -> Self {
        self.set_chart(Some(figure));
        self
    }

    /// Set (or clear, making calls fail) the order book response.
    pub fn set_order_book(&self, book: Option<OrderBookResponse>) {
        *self.order_book.lock() = book;
    }

    /// Set (or clear, making calls fail) the chart response.
    pub fn set_chart(&self, figure: Option<ChartFigure>) {
        *self.chart.lock() = figure;
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    fn server_error(url: String) -> ClientError {
        ClientError::Status { status: 500, url }
    }
}

impl MarketApi for MockMarketApi {
    fn order_book<'a>(
        &'a self,
        token: &'a str,
        excluded: &'a AccountFilter,
    ) -> BoxFuture<'a, ClientResult<OrderBookResponse>> {
        self.calls.lock().push(ApiCall::OrderBook {
            token: token.to_string(),
            excluded: excluded.accounts().to_vec(),
        });
        let result = self
            .order_book
            .lock()
            .clone()
            .ok_or_else(|| Self::server_error(format!("/api/orderbook/{token}")));
        Box::pin(async move { result })
    }

    fn chart<'a>(
        &'a self,
        token: &'a str,
        timespan: Timespan,
    ) -> BoxFuture<'a, ClientResult<ChartFigure>> {
        self.calls.lock().push(ApiCall::Chart {
            token: token.to_string(),
            timespan,
        });
        let result = self
            .chart
            .lock()
            .clone()
            .ok_or_else(|| Self::server_error(format!("/api/chart/{token}/{timespan}")));
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let api = MockMarketApi::new().with_order_book(OrderBookResponse::default());
        let filter = AccountFilter::parse("alice");

        let book = api.order_book("BEE", &filter).await.unwrap();
        assert!(book.buy_book.is_empty());

        let chart = api.chart("BEE", Timespan::All).await;
        assert!(matches!(chart, Err(ClientError::Status { status: 500, .. })));

        assert_eq!(
            api.calls(),
            vec![
                ApiCall::OrderBook {
                    token: "BEE".to_string(),
                    excluded: vec!["alice".to_string()],
                },
                ApiCall::Chart {
                    token: "BEE".to_string(),
                    timespan: Timespan::All,
                },
            ]
        );
    }

    #[test]
    fn test_mock_as_trait_object() {
        let api: Box<dyn MarketApi> =
            Box::new(MockMarketApi::new().with_chart(ChartFigure::default()));
        let figure = tokio_test::block_on(api.chart("BEE", Timespan::Days(7))).unwrap();
        assert!(figure.data.is_empty());
    }
}
