use crate::analytics::FactorObservation;
use crate::series::ReturnObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//request metadata the api gateway attaches to every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    #[serde(default)]
    pub cost_usd: Option<f64>,
    #[serde(default)]
    pub cache_status: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

//one trading day of fractional returns: the stock and its three hedge layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerReturnRow {
    pub date: NaiveDate,
    pub stock: f64,
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
}

//etfs backing each hedge layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerMeta {
    pub market_etf: String,
    pub sector_etf: String,
    pub subsector_etf: String,
}

//which return column of a ticker-returns response to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnColumn {
    Stock,
    Market,
    Sector,
    Subsector,
}

impl ReturnColumn {
    pub const ALL: [ReturnColumn; 4] = [
        ReturnColumn::Stock,
        ReturnColumn::Market,
        ReturnColumn::Sector,
        ReturnColumn::Subsector,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReturnColumn::Stock => "stock",
            ReturnColumn::Market => "market",
            ReturnColumn::Sector => "sector",
            ReturnColumn::Subsector => "subsector",
        }
    }
}

//response of /ticker-returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerReturns {
    pub data: Vec<TickerReturnRow>,
    pub meta: TickerMeta,
    #[serde(rename = "_agent", default)]
    pub agent: Option<AgentInfo>,
}

impl TickerReturns {
    //sorts rows chronologically; the api does not guarantee order
    pub fn sort_by_date(&mut self) {
        self.data.sort_by_key(|row| row.date);
    }

    pub fn latest(&self) -> Option<&TickerReturnRow> {
        self.data.last()
    }

    //extracts one column as a return series for compounding
    pub fn series(&self, column: ReturnColumn) -> Vec<ReturnObservation> {
        self.data
            .iter()
            .map(|row| {
                let value = match column {
                    ReturnColumn::Stock => row.stock,
                    ReturnColumn::Market => row.l1,
                    ReturnColumn::Sector => row.l2,
                    ReturnColumn::Subsector => row.l3,
                };
                ReturnObservation::new(row.date, value)
            })
            .collect()
    }
}

//columnar response of /l3-decomposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decomposition {
    pub dates: Vec<NaiveDate>,
    pub l3_market_er: Vec<Option<f64>>,
    pub l3_sector_er: Vec<Option<f64>>,
    pub l3_subsector_er: Vec<Option<f64>>,
    pub l3_residual_er: Vec<Option<f64>>,
    pub market_factor_etf: String,
    pub universe: String,
    #[serde(rename = "_agent", default)]
    pub agent: Option<AgentInfo>,
}

impl Decomposition {
    //tidies the columnar response into chronological rows, excluding any
    //period with a missing component (exclusion, never zero-coercion)
    pub fn rows(&self) -> Vec<FactorObservation> {
        let mut rows = Vec::with_capacity(self.dates.len());

        for (i, &date) in self.dates.iter().enumerate() {
            let market = self.l3_market_er.get(i).copied().flatten();
            let sector = self.l3_sector_er.get(i).copied().flatten();
            let subsector = self.l3_subsector_er.get(i).copied().flatten();
            let residual = self.l3_residual_er.get(i).copied().flatten();

            if let (Some(market), Some(sector), Some(subsector), Some(residual)) =
                (market, sector, subsector, residual)
            {
                rows.push(FactorObservation::new(
                    date, market, sector, subsector, residual,
                ));
            }
        }

        rows.sort_by_key(|obs| obs.date);
        rows
    }
}

//snapshot of /metrics/{ticker}; absent metrics stay None all the way to the
//display layer, which renders them as n/a
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerMetrics {
    #[serde(default)]
    pub close_price: Option<f64>,
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    #[serde(default)]
    pub l1_market_hr: Option<f64>,
    #[serde(default)]
    pub l2_market_hr: Option<f64>,
    #[serde(default)]
    pub l2_sector_hr: Option<f64>,
    #[serde(default)]
    pub l3_market_hr: Option<f64>,
    #[serde(default)]
    pub l3_sector_hr: Option<f64>,
    #[serde(default)]
    pub l3_subsector_hr: Option<f64>,
    #[serde(default)]
    pub l1_market_er: Option<f64>,
    #[serde(default)]
    pub l3_residual_er: Option<f64>,
}

//six-component hedge breakdown from /batch/analyze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeRatios {
    #[serde(default)]
    pub l1_market: Option<f64>,
    #[serde(default)]
    pub l2_market: Option<f64>,
    #[serde(default)]
    pub l2_sector: Option<f64>,
    #[serde(default)]
    pub l3_market: Option<f64>,
    #[serde(default)]
    pub l3_sector: Option<f64>,
    #[serde(default)]
    pub l3_subsector: Option<f64>,
}

fn error_status() -> String {
    "error".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(default = "error_status")]
    pub status: String,
    //null when the api has no coverage for the ticker
    #[serde(default)]
    pub hedge_ratios: Option<HedgeRatios>,
}

//response of /batch/analyze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub results: HashMap<String, BatchResult>,
    #[serde(rename = "_agent", default)]
    pub agent: Option<AgentInfo>,
}
