use crate::api::{ApiError, RiskDataSource, TickerMetrics};
use crate::report::format::{opt_fixed, opt_pct, opt_ratio, price};
use prettytable::{Cell, Row, Table};
use rayon::prelude::*;

//risk snapshot for one position; weight is absent when the caller passed
//bare tickers instead of a weighted book
#[derive(Debug, Clone)]
pub struct MetricsRow {
    pub ticker: String,
    pub weight: Option<f64>,
    pub metrics: TickerMetrics,
}

#[derive(Debug)]
pub struct MetricsReport {
    pub rows: Vec<MetricsRow>,
    pub failures: Vec<(String, ApiError)>,
}

//fan-out snapshot fetch; failed tickers are reported and skipped
pub fn run(source: &dyn RiskDataSource, positions: &[(String, Option<f64>)]) -> MetricsReport {
    let results: Vec<(String, Option<f64>, Result<TickerMetrics, ApiError>)> = positions
        .par_iter()
        .map(|(ticker, weight)| (ticker.clone(), *weight, source.metrics(ticker)))
        .collect();

    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for (ticker, weight, result) in results {
        match result {
            Ok(metrics) => rows.push(MetricsRow {
                ticker,
                weight,
                metrics,
            }),
            Err(error) => failures.push((ticker, error)),
        }
    }

    MetricsReport { rows, failures }
}

impl MetricsReport {
    pub fn pretty_print(&self) {
        for (ticker, error) in &self.failures {
            println!("Warning: {} skipped: {}", ticker, error);
        }

        println!("\nLive risk metrics:");

        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("ticker"),
            Cell::new("weight_%"),
            Cell::new("close"),
            Cell::new("vol_ann_%"),
            Cell::new("sharpe"),
            Cell::new("l1_market_hr"),
            Cell::new("l2_market_hr"),
            Cell::new("l2_sector_hr"),
            Cell::new("l3_market_hr"),
            Cell::new("l3_sector_hr"),
            Cell::new("l3_subsector_hr"),
            Cell::new("l1_market_er"),
            Cell::new("l3_residual_er"),
        ]));
        for row in &self.rows {
            let m = &row.metrics;
            table.add_row(Row::new(vec![
                Cell::new(&row.ticker),
                Cell::new(
                    &row.weight
                        .map(|w| format!("{:.1}", w * 100.0))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(&price(m.close_price)),
                Cell::new(&opt_pct(m.volatility, 1)),
                Cell::new(&opt_fixed(m.sharpe_ratio, 3)),
                Cell::new(&opt_ratio(m.l1_market_hr)),
                Cell::new(&opt_ratio(m.l2_market_hr)),
                Cell::new(&opt_ratio(m.l2_sector_hr)),
                Cell::new(&opt_ratio(m.l3_market_hr)),
                Cell::new(&opt_ratio(m.l3_sector_hr)),
                Cell::new(&opt_ratio(m.l3_subsector_hr)),
                Cell::new(&opt_ratio(m.l1_market_er)),
                Cell::new(&opt_ratio(m.l3_residual_er)),
            ]));
        }
        table.printstd();
    }
}
