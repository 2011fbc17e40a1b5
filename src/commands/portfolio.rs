use crate::analytics::weighted_sum;
use crate::api::{AgentInfo, ApiError, HedgeRatios, RiskDataSource};
use crate::portfolio::Portfolio;
use crate::report::format::{agent_line, opt_ratio, ratio};
use prettytable::{Cell, Row, Table};

//one position of the breakdown; ratios stay absent when the api has no
//coverage for the ticker
#[derive(Debug, Clone)]
pub struct PositionRow {
    pub ticker: String,
    pub weight: f64,
    pub status: String,
    pub ratios: Option<HedgeRatios>,
}

//weighted rollup of one hedge-ratio column; positions without the value
//contribute nothing and are counted as skipped
#[derive(Debug, Clone, Copy)]
pub struct Rollup {
    pub value: f64,
    pub covered: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct PortfolioReport {
    pub years: u32,
    pub rows: Vec<PositionRow>,
    pub l1_market: Rollup,
    pub l2_market: Rollup,
    pub l3_market: Rollup,
    pub agent: Option<AgentInfo>,
}

fn rollup(rows: &[PositionRow], field: fn(&HedgeRatios) -> Option<f64>) -> Rollup {
    let mut pairs = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        match row.ratios.as_ref().and_then(field) {
            Some(value) => pairs.push((row.weight, value)),
            None => skipped += 1,
        }
    }

    Rollup {
        value: weighted_sum(pairs),
        covered: rows.len() - skipped,
        skipped,
    }
}

pub fn run(
    source: &dyn RiskDataSource,
    portfolio: &Portfolio,
    years: u32,
) -> Result<PortfolioReport, ApiError> {
    let batch = source.batch_analyze(&portfolio.tickers(), years)?;

    let rows: Vec<PositionRow> = portfolio
        .iter()
        .map(|(ticker, weight)| match batch.results.get(ticker) {
            Some(result) => PositionRow {
                ticker: ticker.clone(),
                weight,
                status: result.status.clone(),
                ratios: result.hedge_ratios,
            },
            //ticker absent from the response entirely
            None => PositionRow {
                ticker: ticker.clone(),
                weight,
                status: "error".to_string(),
                ratios: None,
            },
        })
        .collect();

    let l1_market = rollup(&rows, |r| r.l1_market);
    let l2_market = rollup(&rows, |r| r.l2_market);
    let l3_market = rollup(&rows, |r| r.l3_market);

    Ok(PortfolioReport {
        years,
        rows,
        l1_market,
        l2_market,
        l3_market,
        agent: batch.agent,
    })
}

impl PortfolioReport {
    pub fn pretty_print(&self) {
        println!("Portfolio-level hedge ratios (weighted):");

        let mut summary = Table::new();
        summary.add_row(Row::new(vec![
            Cell::new("Metric"),
            Cell::new("Value"),
            Cell::new("Coverage"),
        ]));
        for (label, roll) in [
            ("L1 market hedge (wtd)", &self.l1_market),
            ("L2 market hedge (wtd)", &self.l2_market),
            ("L3 market hedge (wtd)", &self.l3_market),
        ] {
            summary.add_row(Row::new(vec![
                Cell::new(label),
                Cell::new(&ratio(roll.value)),
                Cell::new(&format!(
                    "{}/{} positions",
                    roll.covered,
                    roll.covered + roll.skipped
                )),
            ]));
        }
        summary.printstd();

        println!("\nPer-position breakdown:");

        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("ticker"),
            Cell::new("weight"),
            Cell::new("status"),
            Cell::new("l1_market_hr"),
            Cell::new("l2_market_hr"),
            Cell::new("l2_sector_hr"),
            Cell::new("l3_market_hr"),
            Cell::new("l3_sector_hr"),
            Cell::new("l3_sub_hr"),
        ]));
        for row in &self.rows {
            let r = row.ratios;
            table.add_row(Row::new(vec![
                Cell::new(&row.ticker),
                Cell::new(&ratio(row.weight)),
                Cell::new(&row.status),
                Cell::new(&opt_ratio(r.and_then(|r| r.l1_market))),
                Cell::new(&opt_ratio(r.and_then(|r| r.l2_market))),
                Cell::new(&opt_ratio(r.and_then(|r| r.l2_sector))),
                Cell::new(&opt_ratio(r.and_then(|r| r.l3_market))),
                Cell::new(&opt_ratio(r.and_then(|r| r.l3_sector))),
                Cell::new(&opt_ratio(r.and_then(|r| r.l3_subsector))),
            ]));
        }
        table.printstd();

        if let Some(line) = agent_line(self.agent.as_ref()) {
            println!("\n{}  |  Positions: {}", line, self.rows.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::fake::FakeSource;
    use crate::api::BatchAnalysis;
    use indexmap::IndexMap;

    fn portfolio(entries: &[(&str, f64)]) -> Portfolio {
        let mut positions = IndexMap::new();
        for (ticker, weight) in entries {
            positions.insert(ticker.to_string(), *weight);
        }
        Portfolio::new(positions).unwrap()
    }

    fn batch_fixture() -> BatchAnalysis {
        serde_json::from_str(
            r#"{
                "results": {
                    "AAPL": {"status": "ok", "hedge_ratios": {"l1_market": 0.10, "l2_market": 0.08}},
                    "MSFT": {"status": "ok", "hedge_ratios": {"l1_market": 0.20, "l2_market": 0.16}},
                    "ZZZZ": {"status": "not_found", "hedge_ratios": null}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_weighted_rollup() {
        let mut source = FakeSource::default();
        source.batch = Some(batch_fixture());

        let book = portfolio(&[("AAPL", 0.5), ("MSFT", 0.5)]);
        let report = run(&source, &book, 1).unwrap();

        //0.5 * 0.10 + 0.5 * 0.20
        assert!((report.l1_market.value - 0.15).abs() < 1e-12);
        assert_eq!(report.l1_market.covered, 2);
        assert_eq!(report.l1_market.skipped, 0);
    }

    #[test]
    fn test_uncovered_position_skipped_not_zeroed() {
        let mut source = FakeSource::default();
        source.batch = Some(batch_fixture());

        let book = portfolio(&[("AAPL", 0.5), ("ZZZZ", 0.5)]);
        let report = run(&source, &book, 1).unwrap();

        //zzzz has null hedge_ratios: excluded from the sum, counted skipped
        assert!((report.l1_market.value - 0.05).abs() < 1e-12);
        assert_eq!(report.l1_market.skipped, 1);

        let zzzz = &report.rows[1];
        assert_eq!(zzzz.status, "not_found");
        assert!(zzzz.ratios.is_none());
    }

    #[test]
    fn test_ticker_missing_from_response() {
        let mut source = FakeSource::default();
        source.batch = Some(batch_fixture());

        let book = portfolio(&[("AAPL", 0.5), ("TSLA", 0.5)]);
        let report = run(&source, &book, 1).unwrap();

        let tsla = &report.rows[1];
        assert_eq!(tsla.status, "error");
        assert!(tsla.ratios.is_none());
    }

    #[test]
    fn test_rollup_with_missing_column() {
        //l3_market is absent for every position: rollup is 0 with full skip
        let mut source = FakeSource::default();
        source.batch = Some(batch_fixture());

        let book = portfolio(&[("AAPL", 0.5), ("MSFT", 0.5)]);
        let report = run(&source, &book, 1).unwrap();

        assert_eq!(report.l3_market.value, 0.0);
        assert_eq!(report.l3_market.covered, 0);
        assert_eq!(report.l3_market.skipped, 2);
    }

    #[test]
    fn test_rows_follow_portfolio_order() {
        let mut source = FakeSource::default();
        source.batch = Some(batch_fixture());

        let book = portfolio(&[("MSFT", 0.3), ("AAPL", 0.7)]);
        let report = run(&source, &book, 1).unwrap();

        assert_eq!(report.rows[0].ticker, "MSFT");
        assert_eq!(report.rows[1].ticker, "AAPL");
    }
}
