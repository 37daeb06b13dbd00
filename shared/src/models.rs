use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::present;

/// Columns a provider table may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl PriceField {
    pub const ALL: [PriceField; 5] = [
        PriceField::Open,
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
        PriceField::Volume,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close",
            PriceField::Volume => "Volume",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One row as delivered by the data source. Any value may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    pub timestamp: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawCandle {
    /// Close price if it is present and finite.
    pub fn close_value(&self) -> Option<f64> {
        present(self.close)
    }
}

/// Unvalidated price table for one instrument.
///
/// `columns` is the schema of the source table. A column can be missing from the
/// schema altogether, which is different from every row having an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    pub symbol: String,
    pub columns: BTreeSet<PriceField>,
    pub rows: Vec<RawCandle>,
}

impl RawSeries {
    /// Series whose schema carries every price column.
    pub fn new(symbol: impl Into<String>, rows: Vec<RawCandle>) -> Self {
        Self::with_columns(symbol, PriceField::ALL.into_iter().collect(), rows)
    }

    pub fn with_columns(
        symbol: impl Into<String>,
        columns: BTreeSet<PriceField>,
        rows: Vec<RawCandle>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            columns,
            rows,
        }
    }

    pub fn has_column(&self, field: PriceField) -> bool {
        self.columns.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps the rows dated within `period` calendar days of the latest row.
    pub fn trim_to_period(&self, period: LookbackPeriod) -> RawSeries {
        let Some(latest) = self.rows.iter().map(|r| r.timestamp).max() else {
            return self.clone();
        };
        let cutoff = latest - Duration::days(period.days());
        RawSeries {
            symbol: self.symbol.clone(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r.timestamp > cutoff)
                .cloned()
                .collect(),
        }
    }
}

/// A sanitized row: the close price is always defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Sanitized series, timestamps strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Lookback windows a user can pick for the price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LookbackPeriod {
    #[serde(rename = "30d")]
    Days30,
    #[default]
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "180d")]
    Days180,
    #[serde(rename = "1y")]
    Year1,
    #[serde(rename = "2y")]
    Year2,
}

impl LookbackPeriod {
    pub const ALL: [LookbackPeriod; 5] = [
        LookbackPeriod::Days30,
        LookbackPeriod::Days90,
        LookbackPeriod::Days180,
        LookbackPeriod::Year1,
        LookbackPeriod::Year2,
    ];

    pub fn days(&self) -> i64 {
        match self {
            LookbackPeriod::Days30 => 30,
            LookbackPeriod::Days90 => 90,
            LookbackPeriod::Days180 => 180,
            LookbackPeriod::Year1 => 365,
            LookbackPeriod::Year2 => 730,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LookbackPeriod::Days30 => "30d",
            LookbackPeriod::Days90 => "90d",
            LookbackPeriod::Days180 => "180d",
            LookbackPeriod::Year1 => "1y",
            LookbackPeriod::Year2 => "2y",
        }
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown period '{0}', expected one of 30d, 90d, 180d, 1y, 2y")]
pub struct ParsePeriodError(pub String);

impl FromStr for LookbackPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LookbackPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    /// Numeric encoding used by chart layers: 1 buy, -1 sell, 0 hold.
    pub fn code(&self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// Name and parameters of an indicator column in the output table.
/// The first `warm_up` rows of the column are always undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorInfo {
    pub name: String,
    pub parameters: serde_json::Value,
    pub warm_up: usize,
}

/// One joined row: prices, indicator values and the derived signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub timestamp: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_diff: Option<f64>,
    pub signal: Signal,
}

/// A buy or sell marker drawn at the close price of its row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub timestamp: NaiveDate,
    pub price: f64,
}

/// One point of the secondary oscillator chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    pub timestamp: NaiveDate,
    pub rsi: Option<f64>,
    pub macd_diff: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub symbol: String,
    pub indicators: Vec<IndicatorInfo>,
    pub rows: Vec<OutputRow>,
}

impl OutputTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn buy_markers(&self) -> Vec<Marker> {
        self.markers(Signal::Buy)
    }

    pub fn sell_markers(&self) -> Vec<Marker> {
        self.markers(Signal::Sell)
    }

    pub fn oscillator_panel(&self) -> Vec<OscillatorPoint> {
        self.rows
            .iter()
            .map(|r| OscillatorPoint {
                timestamp: r.timestamp,
                rsi: r.rsi,
                macd_diff: r.macd_diff,
            })
            .collect()
    }

    fn markers(&self, signal: Signal) -> Vec<Marker> {
        self.rows
            .iter()
            .filter(|r| r.signal == signal)
            .map(|r| Marker {
                timestamp: r.timestamp,
                price: r.close,
            })
            .collect()
    }
}
