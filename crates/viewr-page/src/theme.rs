//! Chart colour themes.
//!
//! A theme is applied the way a plotting library's relayout/restyle calls
//! work: dotted keys (`xaxis.tickfont.color`) are written into the figure's
//! nested JSON, creating intermediate objects as needed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use viewr_client::ChartFigure;

use crate::error::PageError;

struct Palette {
    paper_bg: &'static str,
    plot_bg: &'static str,
    font: &'static str,
    grid: &'static str,
    axis_line: &'static str,
    increasing: &'static str,
    decreasing: &'static str,
    candle_line_width: u32,
}

const LIGHT: Palette = Palette {
    paper_bg: "#ffffff",
    plot_bg: "#ffffff",
    font: "#212529",
    grid: "#e9ecef",
    axis_line: "#ced4da",
    increasing: "#26a69a",
    decreasing: "#ef5350",
    candle_line_width: 2,
};

const DARK: Palette = Palette {
    paper_bg: "#212529",
    plot_bg: "#2c3034",
    font: "#ffffff",
    grid: "#495057",
    axis_line: "#6c757d",
    increasing: "#00e676",
    decreasing: "#ff5252",
    candle_line_width: 3,
};

/// Page colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTheme {
    #[default]
    Light,
    Dark,
}

impl ChartTheme {
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }

    /// Layout update as dotted-key pairs.
    pub fn relayout(self) -> Map<String, Value> {
        let p = self.palette();
        let mut update = Map::new();
        update.insert("paper_bgcolor".into(), json!(p.paper_bg));
        update.insert("plot_bgcolor".into(), json!(p.plot_bg));
        update.insert("font.color".into(), json!(p.font));
        for axis in ["xaxis", "yaxis"] {
            update.insert(format!("{axis}.gridcolor"), json!(p.grid));
            update.insert(format!("{axis}.linecolor"), json!(p.axis_line));
            update.insert(format!("{axis}.tickcolor"), json!(p.axis_line));
            update.insert(format!("{axis}.tickfont.color"), json!(p.font));
        }
        update
    }

    /// Candlestick trace update as dotted-key pairs.
    pub fn candlestick_restyle(self) -> Map<String, Value> {
        let p = self.palette();
        let mut update = Map::new();
        update.insert("increasing.line.color".into(), json!(p.increasing));
        update.insert("increasing.fillcolor".into(), json!(p.increasing));
        update.insert("decreasing.line.color".into(), json!(p.decreasing));
        update.insert("decreasing.fillcolor".into(), json!(p.decreasing));
        update.insert("line.width".into(), json!(p.candle_line_width));
        update
    }

    /// Restyle the figure in place. Non-candlestick traces are left alone.
    pub fn apply(self, figure: &mut ChartFigure) {
        for (key, value) in self.relayout() {
            set_dotted(&mut figure.layout, &key, value);
        }

        let restyle = self.candlestick_restyle();
        for index in figure.candlestick_traces() {
            if let Some(trace) = figure.data.get_mut(index) {
                for (key, value) in &restyle {
                    set_dotted(trace, key, value.clone());
                }
            }
        }
    }
}

impl fmt::Display for ChartTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ChartTheme {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(PageError::InvalidTheme(other.to_string())),
        }
    }
}

fn set_dotted(target: &mut Value, key: &str, value: Value) {
    let path: Vec<&str> = key.split('.').collect();
    set_path(target, &path, value);
}

fn set_path(target: &mut Value, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        *target = value;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let child = map.entry(*first).or_insert(Value::Null);
        set_path(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> ChartFigure {
        serde_json::from_value(json!({
            "data": [
                {"type": "candlestick", "increasing": {"line": {"color": "#000000"}}},
                {"type": "bar", "marker": {"color": "#123456"}}
            ],
            "layout": {"title": "BEE", "xaxis": {"rangeslider": {"visible": false}}}
        }))
        .unwrap()
    }

    #[test]
    fn test_dark_theme_applied() {
        let mut fig = figure();
        ChartTheme::Dark.apply(&mut fig);

        assert_eq!(fig.layout["paper_bgcolor"], "#212529");
        assert_eq!(fig.layout["plot_bgcolor"], "#2c3034");
        assert_eq!(fig.layout["font"]["color"], "#ffffff");
        assert_eq!(fig.layout["xaxis"]["tickfont"]["color"], "#ffffff");
        assert_eq!(fig.layout["yaxis"]["gridcolor"], "#495057");
        // Existing keys survive.
        assert_eq!(fig.layout["xaxis"]["rangeslider"]["visible"], false);
        assert_eq!(fig.layout["title"], "BEE");

        assert_eq!(fig.data[0]["increasing"]["line"]["color"], "#00e676");
        assert_eq!(fig.data[0]["decreasing"]["fillcolor"], "#ff5252");
        assert_eq!(fig.data[0]["line"]["width"], 3);
        assert_eq!(fig.data[1], json!({"type": "bar", "marker": {"color": "#123456"}}));
    }

    #[test]
    fn test_light_after_dark() {
        let mut fig = figure();
        ChartTheme::Dark.apply(&mut fig);
        ChartTheme::Light.apply(&mut fig);

        assert_eq!(fig.layout["paper_bgcolor"], "#ffffff");
        assert_eq!(fig.layout["xaxis"]["linecolor"], "#ced4da");
        assert_eq!(fig.data[0]["increasing"]["fillcolor"], "#26a69a");
        assert_eq!(fig.data[0]["line"]["width"], 2);
    }

    #[test]
    fn test_apply_on_empty_layout() {
        let mut fig = ChartFigure::default();
        ChartTheme::Dark.apply(&mut fig);
        assert_eq!(fig.layout["font"]["color"], "#ffffff");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Dark".parse::<ChartTheme>().unwrap(), ChartTheme::Dark);
        assert_eq!(ChartTheme::default(), ChartTheme::Light);
        assert!("sepia".parse::<ChartTheme>().is_err());
    }
}
