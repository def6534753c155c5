//! Market page controller.
//!
//! Owns every piece of page state (tables, filter, timespan, theme, chart)
//! and mutates it in response to `PageEvent`s, one at a time.

use tracing::{debug, error, info, warn};
use viewr_client::{BookOrder, ChartFigure, MarketApi, Timespan};
use viewr_core::{sort_table, AccountFilter, SortDirection, SortOutcome, Table};

use crate::accounts::AccountsView;
use crate::error::{PageError, PageResult};
use crate::formatting::{apply_column_classes, initialize_sorting};
use crate::order_book::{populate_order_book, BookSide};
use crate::theme::ChartTheme;

/// Message shown in place of the chart when it cannot be loaded.
pub fn chart_error_message(token: &str) -> String {
    format!("Error loading chart data for {token}.")
}

/// State of the chart area.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartView {
    #[default]
    Loading,
    Ready(ChartFigure),
    Failed(String),
}

/// User interactions the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Header `column` of table `table_id` was clicked.
    HeaderClicked { table_id: String, column: usize },
    /// Apply button, with the current filter input text.
    ApplyFilters { input: String },
    ClearFilters,
    /// Include/exclude button of an active-accounts entry.
    ToggleAccount(String),
    ToggleFilterPanel,
    SelectTimespan(Timespan),
    SetTheme(ChartTheme),
}

/// Market page for a single token.
pub struct MarketPage<A> {
    api: A,
    token: String,
    timespan: Timespan,
    theme: ChartTheme,
    filter: AccountFilter,
    filter_input: String,
    filters_visible: bool,
    tables: Vec<Table>,
    accounts: AccountsView,
    chart: ChartView,
}

impl<A: MarketApi> MarketPage<A> {
    /// Create the page with empty buy and sell tables, sorting wired.
    pub fn new(api: A, token: impl Into<String>) -> Self {
        let mut page = Self {
            api,
            token: token.into(),
            timespan: Timespan::default(),
            theme: ChartTheme::default(),
            filter: AccountFilter::new(),
            filter_input: String::new(),
            filters_visible: false,
            tables: Vec::new(),
            accounts: AccountsView::default(),
            chart: ChartView::default(),
        };
        page.register_table(BookSide::Buy.empty_table());
        page.register_table(BookSide::Sell.empty_table());
        page
    }

    #[must_use]
    pub fn with_timespan(mut self, timespan: Timespan) -> Self {
        self.timespan = timespan;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Start with some accounts already excluded.
    #[must_use]
    pub fn with_excluded(mut self, filter: AccountFilter) -> Self {
        self.filter_input = filter.to_input_value();
        self.filter = filter;
        self
    }

    /// Add a table (replacing one with the same id) and make it click-sortable.
    pub fn register_table(&mut self, mut table: Table) {
        initialize_sorting(&mut table);
        apply_column_classes(&mut table);
        match self.tables.iter_mut().find(|t| t.id() == table.id()) {
            Some(slot) => *slot = table,
            None => self.tables.push(table),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timespan(&self) -> Timespan {
        self.timespan
    }

    pub fn theme(&self) -> ChartTheme {
        self.theme
    }

    pub fn filter(&self) -> &AccountFilter {
        &self.filter
    }

    /// Current text of the filter input.
    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn filters_visible(&self) -> bool {
        self.filters_visible
    }

    /// Chevron on the filter panel toggle button.
    pub fn filter_toggle_icon(&self) -> &'static str {
        if self.filters_visible {
            "bi-chevron-up"
        } else {
            "bi-chevron-down"
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id() == id)
    }

    pub fn accounts(&self) -> &AccountsView {
        &self.accounts
    }

    pub fn chart(&self) -> &ChartView {
        &self.chart
    }

    /// Initial load: chart, then order book.
    pub async fn load(&mut self) -> PageResult<()> {
        info!(token = %self.token, timespan = %self.timespan, "Loading market page");
        self.load_chart().await;
        self.load_order_book().await
    }

    /// React to one user interaction.
    pub async fn handle(&mut self, event: PageEvent) -> PageResult<()> {
        debug!(?event, "Page event");
        match event {
            PageEvent::HeaderClicked { table_id, column } => {
                self.sort_by_header(&table_id, column)?;
            }
            PageEvent::ApplyFilters { input } => {
                self.filter = AccountFilter::parse(&input);
                self.filter_input = input;
                self.load_order_book().await?;
            }
            PageEvent::ClearFilters => {
                self.filter.clear();
                self.filter_input.clear();
                self.load_order_book().await?;
            }
            PageEvent::ToggleAccount(account) => {
                let excluded = self.filter.toggle(&account);
                debug!(%account, excluded, "Account filter toggled");
                self.filter_input = self.filter.to_input_value();
                self.load_order_book().await?;
            }
            PageEvent::ToggleFilterPanel => {
                self.filters_visible = !self.filters_visible;
            }
            PageEvent::SelectTimespan(timespan) => {
                if timespan == self.timespan {
                    debug!(%timespan, "Timespan already active");
                    return Ok(());
                }
                self.timespan = timespan;
                self.load_chart().await;
            }
            PageEvent::SetTheme(theme) => self.set_theme(theme),
        }
        Ok(())
    }

    /// Header click: toggle-sort the table by `column`.
    pub fn sort_by_header(&mut self, table_id: &str, column: usize) -> PageResult<SortOutcome> {
        self.sort_table_by(table_id, column, None)
    }

    /// Sort the table by `column`, in `forced` direction when given.
    pub fn sort_table_by(
        &mut self,
        table_id: &str,
        column: usize,
        forced: Option<SortDirection>,
    ) -> PageResult<SortOutcome> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.id() == table_id)
            .ok_or_else(|| PageError::UnknownTable(table_id.to_string()))?;
        Ok(sort_table(table, column, forced))
    }

    /// Re-render one side of the book. Returns false if its table is missing
    /// or has no body.
    pub fn update_order_book(&mut self, side: BookSide, orders: &[BookOrder]) -> bool {
        match self.tables.iter_mut().find(|t| t.id() == side.table_id()) {
            Some(table) => populate_order_book(table, side, orders),
            None => {
                warn!(table = side.table_id(), "Order book table not found");
                false
            }
        }
    }

    /// Fetch the book with the current filter and re-render both sides and
    /// the accounts list. On failure nothing is changed.
    pub async fn load_order_book(&mut self) -> PageResult<()> {
        let book = match self.api.order_book(&self.token, &self.filter).await {
            Ok(book) => book,
            Err(e) => {
                error!(token = %self.token, error = %e, "Error loading order book data");
                return Err(e.into());
            }
        };

        self.update_order_book(BookSide::Buy, &book.buy_book);
        self.update_order_book(BookSide::Sell, &book.sell_book);
        self.accounts = AccountsView::build(&book.most_active_accounts, &self.filter);
        Ok(())
    }

    /// Fetch the chart for the current timespan. Failures end up in
    /// `ChartView::Failed`.
    pub async fn load_chart(&mut self) {
        self.chart = ChartView::Loading;
        match self.api.chart(&self.token, self.timespan).await {
            Ok(mut figure) => {
                if self.theme.is_dark() {
                    self.theme.apply(&mut figure);
                }
                self.chart = ChartView::Ready(figure);
            }
            Err(e) => {
                error!(token = %self.token, timespan = %self.timespan, error = %e, "Error loading chart data");
                self.chart = ChartView::Failed(chart_error_message(&self.token));
            }
        }
    }

    /// Switch theme and restyle a loaded chart.
    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        if let ChartView::Ready(figure) = &mut self.chart {
            theme.apply(figure);
        }
        debug!(%theme, "Theme changed");
    }
}
