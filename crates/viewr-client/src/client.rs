//! reqwest-based API client.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use viewr_core::AccountFilter;

use crate::error::{ClientError, ClientResult};
use crate::types::{ChartFigure, OrderBookResponse, Timespan};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the order book and chart endpoints.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Site root serving `/api/...` (e.g., "http://localhost:5000")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the order book endpoint, with `exclude` set when the filter is non-empty.
    pub fn order_book_url(&self, token: &str, excluded: &AccountFilter) -> ClientResult<Url> {
        let mut url = self.endpoint(&["api", "orderbook", token])?;
        if let Some(exclude) = excluded.query_value() {
            url.query_pairs_mut().append_pair("exclude", &exclude);
        }
        Ok(url)
    }

    /// URL of the chart endpoint.
    pub fn chart_url(&self, token: &str, timespan: Timespan) -> ClientResult<Url> {
        let timespan = timespan.to_string();
        self.endpoint(&["api", "chart", token, timespan.as_str()])
    }

    /// Fetch the complete order book for `token`, minus excluded accounts.
    pub async fn fetch_order_book(
        &self,
        token: &str,
        excluded: &AccountFilter,
    ) -> ClientResult<OrderBookResponse> {
        let url = self.order_book_url(token, excluded)?;
        info!(%token, excluded = excluded.len(), "Fetching order book");

        let book: OrderBookResponse = self.get_json(url).await?;

        info!(
            %token,
            buy_orders = book.buy_book.len(),
            sell_orders = book.sell_book.len(),
            active_accounts = book.most_active_accounts.len(),
            "Fetched order book"
        );
        Ok(book)
    }

    /// Fetch the candlestick figure for `token` over `timespan`.
    pub async fn fetch_chart(&self, token: &str, timespan: Timespan) -> ClientResult<ChartFigure> {
        let url = self.chart_url(token, timespan)?;
        info!(%token, %timespan, "Fetching chart");

        let figure: ChartFigure = self.get_json(url).await?;

        debug!(%token, traces = figure.data.len(), "Fetched chart");
        Ok(figure)
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("{url}: {e}")))
    }
}
