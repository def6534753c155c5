//! Application wiring: config → API client → market page → text output.

use tracing::info;
use viewr_client::{ApiClient, MarketApi};
use viewr_core::SortDirection;
use viewr_page::{resolve_token, MarketPage, PageEvent, BUY_BOOK_TABLE, SELL_BOOK_TABLE};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::render::{render_accounts, render_chart, render_table};

/// A sort to apply after the page has loaded. Without a direction it
/// behaves like a header click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub table_id: String,
    pub column: usize,
    pub direction: Option<SortDirection>,
}

/// Token from a CLI target: a bare symbol (`BEE`) or a market page path
/// (`/market/BEE`).
pub fn token_from_target(target: &str) -> AppResult<String> {
    let token = if target.contains('/') {
        resolve_token(None, target)?
    } else {
        resolve_token(Some(target), "")?
    };
    Ok(token)
}

/// One-shot market page session.
pub struct Application<A = ApiClient> {
    page: MarketPage<A>,
}

impl Application<ApiClient> {
    pub fn new(config: &AppConfig, token: &str) -> AppResult<Self> {
        let api = ApiClient::new(&config.api.base_url, config.timeout())?;
        Ok(Self::with_api(api, config, token))
    }
}

impl<A: MarketApi> Application<A> {
    /// Build the page on top of any `MarketApi`.
    pub fn with_api(api: A, config: &AppConfig, token: &str) -> Self {
        let page = MarketPage::new(api, token)
            .with_timespan(config.page.default_timespan)
            .with_theme(config.page.theme)
            .with_excluded(config.page.excluded());
        Self { page }
    }

    pub fn page(&self) -> &MarketPage<A> {
        &self.page
    }

    /// Load the page, replay `sorts` as header clicks and render the result.
    pub async fn run(&mut self, sorts: &[SortRequest]) -> AppResult<String> {
        self.page.load().await?;

        for sort in sorts {
            info!(
                table = %sort.table_id,
                column = sort.column,
                direction = ?sort.direction,
                "Sorting table"
            );
            match sort.direction {
                Some(direction) => {
                    self.page
                        .sort_table_by(&sort.table_id, sort.column, Some(direction))?;
                }
                None => {
                    self.page
                        .handle(PageEvent::HeaderClicked {
                            table_id: sort.table_id.clone(),
                            column: sort.column,
                        })
                        .await?;
                }
            }
        }

        Ok(self.render())
    }

    /// Text rendering of the current page state.
    pub fn render(&self) -> String {
        let page = &self.page;
        let mut out = format!(
            "{} market [timespan: {}, theme: {}]\n",
            page.token(),
            page.timespan(),
            page.theme()
        );
        out.push_str(&render_chart(page.chart(), page.token()));
        out.push_str("\n\n");

        for id in [BUY_BOOK_TABLE, SELL_BOOK_TABLE] {
            if let Some(table) = page.table(id) {
                out.push_str(&render_table(table));
                out.push('\n');
            }
        }

        out.push_str("Most active accounts\n");
        out.push_str(&render_accounts(page.accounts()));
        if !page.filter().is_empty() {
            out.push_str(&format!("Excluded: {}\n", page.filter().to_input_value()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use rust_decimal_macros::dec;
    use viewr_client::{ApiCall, BookOrder, MockMarketApi, OrderBookResponse, OrderId, Timespan};
    use viewr_page::{ChartTheme, PageError};

    fn book() -> OrderBookResponse {
        OrderBookResponse {
            buy_book: vec![
                BookOrder {
                    id: OrderId::Number(1),
                    account: "alice".to_string(),
                    quantity: dec!(2),
                    price: dec!(0.5),
                },
                BookOrder {
                    id: OrderId::Number(2),
                    account: "bob".to_string(),
                    quantity: dec!(1),
                    price: dec!(0.75),
                },
            ],
            ..OrderBookResponse::default()
        }
    }

    #[test]
    fn test_token_from_target() {
        assert_eq!(token_from_target("BEE").unwrap(), "BEE");
        assert_eq!(token_from_target("/market/SWAP.HIVE").unwrap(), "SWAP.HIVE");
        assert!(matches!(
            token_from_target("/richlist"),
            Err(AppError::Page(PageError::TokenNotFound(_)))
        ));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            Application::new(&config, "BEE"),
            Err(AppError::Client(_))
        ));
    }

    #[tokio::test]
    async fn test_run_renders_page() {
        let mut config = AppConfig::default();
        config.page.default_timespan = Timespan::All;
        config.page.theme = ChartTheme::Dark;
        config.page.excluded_accounts = vec!["carol".to_string()];

        let api = MockMarketApi::new().with_order_book(book());
        let mut app = Application::with_api(api, &config, "BEE");
        let sorts = [SortRequest {
            table_id: BUY_BOOK_TABLE.to_string(),
            column: 4,
            direction: None,
        }];
        let out = app.run(&sorts).await.unwrap();

        assert!(out.starts_with("BEE market [timespan: all, theme: dark]\n"));
        assert!(out.contains("Error loading chart data for BEE."));
        assert!(out.contains("Price ▲"));
        assert!(out.contains("No orders available"));
        assert!(out.contains("No account data available"));
        assert!(out.contains("Excluded: carol"));

        let buy = out.find("0.50000000").unwrap();
        let buy_second = out.find("0.75000000").unwrap();
        assert!(buy < buy_second);

        assert_eq!(
            app.page().api().calls()[1],
            ApiCall::OrderBook {
                token: "BEE".to_string(),
                excluded: vec!["carol".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_run_forced_direction() {
        let api = MockMarketApi::new().with_order_book(book());
        let mut app = Application::with_api(api, &AppConfig::default(), "BEE");
        let sorts = [SortRequest {
            table_id: BUY_BOOK_TABLE.to_string(),
            column: 4,
            direction: Some(SortDirection::Descending),
        }];
        let out = app.run(&sorts).await.unwrap();

        assert!(out.contains("Price ▼"));
        assert!(out.find("0.75000000").unwrap() < out.find("0.50000000").unwrap());

        let missing = [SortRequest {
            table_id: "missing".to_string(),
            column: 0,
            direction: Some(SortDirection::Ascending),
        }];
        assert!(matches!(
            app.run(&missing).await,
            Err(AppError::Page(PageError::UnknownTable(_)))
        ));
    }

    #[test]
    fn test_run_fails_without_book() {
        let mut app = Application::with_api(MockMarketApi::new(), &AppConfig::default(), "BEE");
        let result = tokio_test::block_on(app.run(&[]));
        assert!(matches!(result, Err(AppError::Page(PageError::Api(_)))));
    }
}
