//! API response types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Order identifier; the API returns numbers for some books and strings for others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One resting order in the buy or sell book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookOrder {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub account: String,
    /// Decimal string or number.
    pub quantity: Decimal,
    /// Decimal string or number.
    pub price: Decimal,
}

impl BookOrder {
    /// Order value: quantity × price.
    pub fn total(&self) -> Decimal {
        self.quantity * self.price
    }
}

/// Order count per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAccount {
    pub account: String,
    pub count: u32,
}

/// Response of `/api/orderbook/{token}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBookResponse {
    #[serde(default)]
    pub buy_book: Vec<BookOrder>,
    #[serde(default)]
    pub sell_book: Vec<BookOrder>,
    /// Top accounts by order count (server sends at most 10).
    #[serde(default)]
    pub most_active_accounts: Vec<ActiveAccount>,
    /// Exclusions the server applied.
    #[serde(default)]
    pub excluded_accounts: Vec<String>,
}

/// Response of `/api/chart/{token}/{timespan}`: a plotting-library figure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartFigure {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub layout: serde_json::Value,
}

impl ChartFigure {
    /// Indices of traces whose `type` is `candlestick`.
    pub fn candlestick_traces(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, trace)| trace.get("type").and_then(|t| t.as_str()) == Some("candlestick"))
            .map(|(index, _)| index)
            .collect()
    }

    /// Figure title, if the layout carries one.
    pub fn title(&self) -> Option<&str> {
        let title = self.layout.get("title")?;
        title
            .as_str()
            .or_else(|| title.get("text").and_then(|t| t.as_str()))
    }
}

/// Chart history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timespan {
    /// Last N days.
    Days(u32),
    /// Full history.
    All,
}

impl Default for Timespan {
    fn default() -> Self {
        Self::Days(30)
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::All => f.write_str("all"),
        }
    }
}

impl FromStr for Timespan {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<u32>()
            .ok()
            .filter(|days| *days > 0)
            .map(Self::Days)
            .ok_or_else(|| ClientError::InvalidTimespan(s.to_string()))
    }
}

impl TryFrom<String> for Timespan {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timespan> for String {
    fn from(value: Timespan) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_book_deserialization() {
        let json = r#"{
            "buy_book": [
                {"_id": 42, "account": "alice", "quantity": "10.5", "price": "0.25", "symbol": "BEE"}
            ],
            "sell_book": [
                {"_id": "6601ab", "account": "bob", "quantity": 3, "price": 0.5}
            ],
            "most_active_accounts": [{"account": "alice", "count": 7}],
            "excluded_accounts": ["carol"]
        }"#;

        let book: OrderBookResponse = serde_json::from_str(json).unwrap();
        assert_eq!(book.buy_book[0].id, OrderId::Number(42));
        assert_eq!(book.buy_book[0].quantity, dec!(10.5));
        assert_eq!(book.buy_book[0].total(), dec!(2.625));
        assert_eq!(book.sell_book[0].id.to_string(), "6601ab");
        assert_eq!(book.sell_book[0].price, dec!(0.5));
        assert_eq!(book.most_active_accounts[0].count, 7);
        assert_eq!(book.excluded_accounts, vec!["carol".to_string()]);
    }

    #[test]
    fn test_order_book_missing_sections_default() {
        let book: OrderBookResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(book, OrderBookResponse::default());
    }

    #[test]
    fn test_chart_candlestick_traces() {
        let figure: ChartFigure = serde_json::from_value(serde_json::json!({
            "data": [{"type": "scatter"}, {"type": "candlestick"}],
            "layout": {"title": {"text": "BEE/SWAP.HIVE Market Data"}}
        }))
        .unwrap();
        assert_eq!(figure.candlestick_traces(), vec![1]);
        assert_eq!(figure.title(), Some("BEE/SWAP.HIVE Market Data"));
    }

    #[test]
    fn test_timespan_parse() {
        assert_eq!("30".parse::<Timespan>().unwrap(), Timespan::Days(30));
        assert_eq!("ALL".parse::<Timespan>().unwrap(), Timespan::All);
        assert!("0".parse::<Timespan>().is_err());
        assert!("week".parse::<Timespan>().is_err());
        assert_eq!(Timespan::default().to_string(), "30");
    }

    #[test]
    fn test_timespan_serde_as_string() {
        let json = serde_json::to_string(&Timespan::Days(7)).unwrap();
        assert_eq!(json, r#""7""#);
        let parsed: Timespan = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(parsed, Timespan::All);
    }
}
