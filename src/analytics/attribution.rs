use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//one period of erm3 factor excess returns, fractional
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorObservation {
    pub date: NaiveDate,
    pub market: f64,
    pub sector: f64,
    pub subsector: f64,
    pub residual: f64,
}

impl FactorObservation {
    pub fn new(date: NaiveDate, market: f64, sector: f64, subsector: f64, residual: f64) -> Self {
        FactorObservation {
            date,
            market,
            sector,
            subsector,
            residual,
        }
    }

    //sum of the factor components for this period
    pub fn total(&self) -> f64 {
        self.market + self.sector + self.subsector + self.residual
    }
}

//mean factor attribution across periods for one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionSummary {
    pub ticker: String,
    pub periods: usize,
    pub market: f64,
    pub sector: f64,
    pub subsector: f64,
    pub residual: f64,
    pub total: f64,
}

//arithmetic mean of each component across periods, then total = sum of means
//values stay fractional; percentage conversion and rounding happen at display
pub fn summarize(ticker: &str, observations: &[FactorObservation]) -> AttributionSummary {
    if observations.is_empty() {
        return AttributionSummary {
            ticker: ticker.to_string(),
            periods: 0,
            market: 0.0,
            sector: 0.0,
            subsector: 0.0,
            residual: 0.0,
            total: 0.0,
        };
    }

    let market = observations
        .iter()
        .map(|o| o.market)
        .collect::<Vec<_>>()
        .mean();
    let sector = observations
        .iter()
        .map(|o| o.sector)
        .collect::<Vec<_>>()
        .mean();
    let subsector = observations
        .iter()
        .map(|o| o.subsector)
        .collect::<Vec<_>>()
        .mean();
    let residual = observations
        .iter()
        .map(|o| o.residual)
        .collect::<Vec<_>>()
        .mean();

    AttributionSummary {
        ticker: ticker.to_string(),
        periods: observations.len(),
        market,
        sector,
        subsector,
        residual,
        total: market + sector + subsector + residual,
    }
}
