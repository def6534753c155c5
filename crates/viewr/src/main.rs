//! Market Viewr - Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::info;
use viewr::{AppConfig, Application, SortRequest};
use viewr_client::Timespan;
use viewr_core::{AccountFilter, SortDirection};
use viewr_page::{ChartTheme, BUY_BOOK_TABLE, SELL_BOOK_TABLE};

/// Order book and chart viewer for a token market
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Token symbol or market page path (e.g. BEE or /market/BEE)
    target: String,

    /// Configuration file path (can also be set via VIEWR_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Chart timespan in days, or "all"
    #[arg(short, long)]
    timespan: Option<Timespan>,

    /// Comma separated accounts to hide from the order book
    #[arg(short, long)]
    exclude: Option<String>,

    /// Table to sort after loading
    #[arg(long, requires = "sort_column", value_parser = [BUY_BOOK_TABLE, SELL_BOOK_TABLE])]
    sort_table: Option<String>,

    /// Column index to sort by (clicking it once)
    #[arg(long, requires = "sort_table")]
    sort_column: Option<usize>,

    /// Sort direction (asc or desc) instead of toggling the stored one
    #[arg(long, requires = "sort_column")]
    sort_direction: Option<SortDirection>,

    /// Chart theme (light or dark), overrides the config file
    #[arg(long)]
    theme: Option<ChartTheme>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    viewr::init_logging()?;

    info!("Starting Market Viewr v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(timespan) = args.timespan {
        config.page.default_timespan = timespan;
    }
    if let Some(exclude) = args.exclude.as_deref() {
        config.page.excluded_accounts = AccountFilter::parse(exclude).accounts().to_vec();
    }
    if let Some(theme) = args.theme {
        config.page.theme = theme;
    }
    info!(
        base_url = %config.api.base_url,
        timespan = %config.page.default_timespan,
        theme = %config.page.theme,
        "Configuration loaded"
    );

    let token = viewr::token_from_target(&args.target)?;
    let sorts: Vec<SortRequest> = match (args.sort_table, args.sort_column) {
        (Some(table_id), Some(column)) => vec![SortRequest {
            table_id,
            column,
            direction: args.sort_direction,
        }],
        _ => Vec::new(),
    };

    let mut app = Application::new(&config, &token)?;
    let output = app.run(&sorts).await?;
    print!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_and_theme_flags() {
        let args = Args::try_parse_from([
            "viewr",
            "BEE",
            "--sort-table",
            BUY_BOOK_TABLE,
            "--sort-column",
            "4",
            "--sort-direction",
            "desc",
            "--theme",
            "Dark",
        ])
        .unwrap();
        assert_eq!(args.sort_direction, Some(SortDirection::Descending));
        assert_eq!(args.theme, Some(ChartTheme::Dark));

        let args = Args::try_parse_from(["viewr", "BEE"]).unwrap();
        assert_eq!(args.sort_direction, None);
        assert_eq!(args.theme, None);
    }

    #[test]
    fn test_bad_flag_values_rejected() {
        assert!(Args::try_parse_from(["viewr", "BEE", "--theme", "sepia"]).is_err());
        assert!(Args::try_parse_from([
            "viewr",
            "BEE",
            "--sort-table",
            BUY_BOOK_TABLE,
            "--sort-column",
            "0",
            "--sort-direction",
            "sideways",
        ])
        .is_err());
        // A direction alone has nothing to sort.
        assert!(Args::try_parse_from(["viewr", "BEE", "--sort-direction", "asc"]).is_err());
    }
}
