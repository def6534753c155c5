//! Plain-text rendering of page state.

use viewr_core::{SortDirection, Table};
use viewr_page::{AccountsView, ChartView};

fn marker_symbol(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

/// Render a table with aligned columns.
///
/// The sorted header carries ▲/▼. Cells with `text-end` are right aligned.
/// Spanning rows are printed as-is under the header.
pub fn render_table(table: &Table) -> String {
    let headers: Vec<String> = table
        .headers()
        .iter()
        .map(|h| match h.marker() {
            Some(direction) => format!("{}{}", h.label(), marker_symbol(direction)),
            None => h.label().to_string(),
        })
        .collect();

    let rows = table.rows().unwrap_or_default();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter().filter(|r| !r.is_placeholder()) {
        for (index, cell) in row.cells().iter().enumerate() {
            let len = cell.text().chars().count();
            match widths.get_mut(index) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = format!("[{}]\n", table.id());
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| pad_right(h, w))
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    for row in rows {
        if row.is_placeholder() {
            let text: Vec<&str> = row.cells().iter().map(|c| c.text()).collect();
            out.push_str(&text.join(" "));
            out.push('\n');
            continue;
        }
        let line: Vec<String> = row
            .cells()
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| {
                if cell.has_class("text-end") {
                    pad_left(cell.text(), w)
                } else {
                    pad_right(cell.text(), w)
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Render the most-active-accounts list.
pub fn render_accounts(view: &AccountsView) -> String {
    if let Some(message) = view.empty_message() {
        return format!("{message}\n");
    }
    let width = view
        .entries()
        .iter()
        .map(|e| e.account.chars().count())
        .max()
        .unwrap_or(0);
    view.entries()
        .iter()
        .map(|e| {
            format!(
                "{}  {:>5}  [{}]\n",
                pad_right(&e.account, width),
                e.count,
                e.action_label()
            )
        })
        .collect()
}

/// One-line chart summary.
pub fn render_chart(chart: &ChartView, token: &str) -> String {
    match chart {
        ChartView::Loading => "Chart: loading".to_string(),
        ChartView::Failed(message) => message.clone(),
        ChartView::Ready(figure) => format!(
            "Chart: {} ({} traces, {} candlestick)",
            figure.title().unwrap_or(token),
            figure.data.len(),
            figure.candlestick_traces().len()
        ),
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width.saturating_sub(len)))
}
