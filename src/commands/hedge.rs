use crate::api::{AgentInfo, ApiError, RiskDataSource, TickerMeta, TickerReturnRow};
use crate::report::format::{agent_line, ratio};
use prettytable::{Cell, Row, Table};

//latest hedge ratios for one ticker; the last row is the ratio to use for
//a live trade
#[derive(Debug, Clone)]
pub struct HedgeReport {
    pub ticker: String,
    pub years: u32,
    pub meta: TickerMeta,
    pub latest: TickerReturnRow,
    pub recent: Vec<TickerReturnRow>,
    pub agent: Option<AgentInfo>,
}

//how many trailing rows the history table shows
const RECENT_ROWS: usize = 10;

pub fn run(source: &dyn RiskDataSource, ticker: &str, years: u32) -> Result<HedgeReport, ApiError> {
    let returns = source.ticker_returns(ticker, years)?;

    let latest = *returns.latest().ok_or_else(|| ApiError::DataUnavailable {
        ticker: ticker.to_string(),
    })?;

    let start = returns.data.len().saturating_sub(RECENT_ROWS);
    let recent = returns.data[start..].to_vec();

    Ok(HedgeReport {
        ticker: ticker.to_string(),
        years,
        meta: returns.meta,
        latest,
        recent,
        agent: returns.agent,
    })
}

impl HedgeReport {
    //prints the latest snapshot and recent history tables
    pub fn pretty_print(&self) {
        println!("Latest hedge ratios — {}", self.ticker);

        let mut snapshot = Table::new();
        snapshot.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
        snapshot.add_row(Row::new(vec![
            Cell::new("market_etf"),
            Cell::new(&self.meta.market_etf),
        ]));
        snapshot.add_row(Row::new(vec![
            Cell::new("sector_etf"),
            Cell::new(&self.meta.sector_etf),
        ]));
        snapshot.add_row(Row::new(vec![
            Cell::new("subsector_etf"),
            Cell::new(&self.meta.subsector_etf),
        ]));
        snapshot.add_row(Row::new(vec![
            Cell::new("L1 hedge (market only)"),
            Cell::new(&ratio(self.latest.l1)),
        ]));
        snapshot.add_row(Row::new(vec![
            Cell::new("L2 hedge (market+sector)"),
            Cell::new(&ratio(self.latest.l2)),
        ]));
        snapshot.add_row(Row::new(vec![
            Cell::new("L3 hedge (full)"),
            Cell::new(&ratio(self.latest.l3)),
        ]));
        snapshot.printstd();

        println!("\nMost recent {} trading days:", self.recent.len());

        let mut history = Table::new();
        history.add_row(Row::new(vec![
            Cell::new("date"),
            Cell::new("stock_return"),
            Cell::new("l1_hedge"),
            Cell::new("l2_hedge"),
            Cell::new("l3_hedge"),
        ]));
        for row in &self.recent {
            history.add_row(Row::new(vec![
                Cell::new(&row.date.to_string()),
                Cell::new(&format!("{:.6}", row.stock)),
                Cell::new(&ratio(row.l1)),
                Cell::new(&ratio(row.l2)),
                Cell::new(&ratio(row.l3)),
            ]));
        }
        history.printstd();

        if let Some(line) = agent_line(self.agent.as_ref()) {
            println!("\n{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::fake::FakeSource;
    use crate::api::TickerReturns;

    fn fixture(rows: usize) -> TickerReturns {
        let data = (0..rows)
            .map(|i| {
                format!(
                    r#"{{"date": "2024-01-{:02}", "stock": 0.001, "l1": 1.0, "l2": 1.1, "l3": 1.2}}"#,
                    i + 1
                )
            })
            .collect::<Vec<_>>()
            .join(",");

        serde_json::from_str(&format!(
            r#"{{"data": [{data}],
                "meta": {{"market_etf": "SPY", "sector_etf": "XLK", "subsector_etf": "SMH"}}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_recent_rows_capped_at_ten() {
        let mut source = FakeSource::default();
        source.returns.insert("NVDA".to_string(), fixture(15));

        let report = run(&source, "NVDA", 1).unwrap();
        assert_eq!(report.recent.len(), 10);
        //most recent day last
        assert_eq!(report.recent.last().unwrap().date.to_string(), "2024-01-15");
        assert_eq!(report.latest.date.to_string(), "2024-01-15");
    }

    #[test]
    fn test_short_history_keeps_all_rows() {
        let mut source = FakeSource::default();
        source.returns.insert("NVDA".to_string(), fixture(4));

        let report = run(&source, "NVDA", 1).unwrap();
        assert_eq!(report.recent.len(), 4);
    }

    #[test]
    fn test_unknown_ticker_is_unavailable() {
        let source = FakeSource::default();
        let result = run(&source, "ZZZZ", 1);
        assert!(matches!(result, Err(ApiError::DataUnavailable { .. })));
    }
}
