use crate::analytics::{summarize, AttributionSummary, FactorObservation};
use crate::api::{AgentInfo, ApiError, RiskDataSource};
use crate::report::format::{agent_line, pct};
use prettytable::{Cell, Row, Table};
use rayon::prelude::*;

//monthly factor attribution for one ticker
#[derive(Debug, Clone)]
pub struct TickerAttribution {
    pub ticker: String,
    pub market_etf: String,
    pub universe: String,
    pub rows: Vec<FactorObservation>,
    pub agent: Option<AgentInfo>,
}

pub fn single(
    source: &dyn RiskDataSource,
    ticker: &str,
    market_etf: &str,
) -> Result<TickerAttribution, ApiError> {
    let decomposition = source.l3_decomposition(ticker, market_etf)?;
    let rows = decomposition.rows();

    if rows.is_empty() {
        return Err(ApiError::DataUnavailable {
            ticker: ticker.to_string(),
        });
    }

    Ok(TickerAttribution {
        ticker: ticker.to_string(),
        market_etf: decomposition.market_factor_etf,
        universe: decomposition.universe,
        rows,
        agent: decomposition.agent,
    })
}

//portfolio-level factor table: mean attribution per ticker
#[derive(Debug)]
pub struct MultiAttribution {
    pub market_etf: String,
    pub summaries: Vec<AttributionSummary>,
    pub failures: Vec<(String, ApiError)>,
}

//fan-out across tickers; failed tickers are reported and skipped, the rest
//of the table still renders
pub fn multi(
    source: &dyn RiskDataSource,
    tickers: &[String],
    market_etf: &str,
) -> MultiAttribution {
    let results: Vec<(String, Result<TickerAttribution, ApiError>)> = tickers
        .par_iter()
        .map(|ticker| (ticker.clone(), single(source, ticker, market_etf)))
        .collect();

    let mut summaries = Vec::new();
    let mut failures = Vec::new();

    for (ticker, result) in results {
        match result {
            Ok(attribution) => summaries.push(summarize(&ticker, &attribution.rows)),
            Err(error) => failures.push((ticker, error)),
        }
    }

    MultiAttribution {
        market_etf: market_etf.to_string(),
        summaries,
        failures,
    }
}

impl TickerAttribution {
    //prints the most recent `months` rows, in percent
    pub fn pretty_print(&self, months: usize) {
        let start = self.rows.len().saturating_sub(months);
        let tail = &self.rows[start..];

        println!(
            "Monthly factor risk attribution for {} (most recent {} months)",
            self.ticker,
            tail.len()
        );
        println!(
            "Market ETF: {}  |  Universe: {}\n",
            self.market_etf, self.universe
        );

        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("date"),
            Cell::new("market_%"),
            Cell::new("sector_%"),
            Cell::new("subsector_%"),
            Cell::new("residual_%"),
            Cell::new("total_%"),
        ]));
        for row in tail {
            table.add_row(Row::new(vec![
                Cell::new(&row.date.to_string()),
                Cell::new(&pct(row.market, 3)),
                Cell::new(&pct(row.sector, 3)),
                Cell::new(&pct(row.subsector, 3)),
                Cell::new(&pct(row.residual, 3)),
                Cell::new(&pct(row.total(), 3)),
            ]));
        }
        table.printstd();

        if let Some(line) = agent_line(self.agent.as_ref()) {
            println!("\n{}", line);
        }
    }
}

impl MultiAttribution {
    pub fn pretty_print(&self) {
        for (ticker, error) in &self.failures {
            println!("Warning: {} skipped: {}", ticker, error);
        }

        println!("\nAverage monthly factor attribution by ticker (in %):");

        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("ticker"),
            Cell::new("periods"),
            Cell::new("market_%"),
            Cell::new("sector_%"),
            Cell::new("subsector_%"),
            Cell::new("residual_%"),
            Cell::new("total_%"),
        ]));
        for summary in &self.summaries {
            table.add_row(Row::new(vec![
                Cell::new(&summary.ticker),
                Cell::new(&summary.periods.to_string()),
                Cell::new(&pct(summary.market, 3)),
                Cell::new(&pct(summary.sector, 3)),
                Cell::new(&pct(summary.subsector, 3)),
                Cell::new(&pct(summary.residual, 3)),
                Cell::new(&pct(summary.total, 3)),
            ]));
        }
        table.printstd();
    }
}
