use crate::api::{AgentInfo, ReturnColumn, RiskDataSource};
use crate::report::format::{agent_line, pct};
use crate::series::compound;
use anyhow::{Context, Result};
use chrono::NaiveDate;

//one day of the chart: cumulative compounded returns, fractional
#[derive(Debug, Clone, Copy)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub stock: f64,
    pub market: f64,
    pub sector: f64,
    pub subsector: f64,
}

//cumulative compound return series for a stock and its three hedge layers;
//the gap between stock and subsector is the residual the etf hedges cannot
//capture
#[derive(Debug, Clone)]
pub struct ChartReport {
    pub ticker: String,
    pub years: u32,
    pub points: Vec<ChartPoint>,
    pub agent: Option<AgentInfo>,
}

pub fn run(source: &dyn RiskDataSource, ticker: &str, years: u32) -> Result<ChartReport> {
    let returns = source.ticker_returns(ticker, years)?;

    //each column compounds independently over the shared dates
    let mut curves = Vec::with_capacity(ReturnColumn::ALL.len());
    for column in ReturnColumn::ALL {
        let curve = compound(&returns.series(column)).context(format!(
            "Compounding {} returns for {}",
            column.label(),
            ticker
        ))?;
        curves.push(curve);
    }

    let points = (0..returns.data.len())
        .map(|i| ChartPoint {
            date: returns.data[i].date,
            stock: curves[0][i].cumulative_return,
            market: curves[1][i].cumulative_return,
            sector: curves[2][i].cumulative_return,
            subsector: curves[3][i].cumulative_return,
        })
        .collect();

    Ok(ChartReport {
        ticker: ticker.to_string(),
        years,
        points,
        agent: returns.agent,
    })
}

impl ChartReport {
    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.last()
    }

    //idiosyncratic return left over after the full l3 hedge
    pub fn residual(&self) -> Option<f64> {
        self.latest().map(|p| p.stock - p.subsector)
    }

    pub fn print_summary(&self) {
        let Some(latest) = self.latest() else {
            return;
        };

        println!(
            "Cumulative returns over {}y — as of {}",
            self.years, latest.date
        );
        println!("  {} total return:    {}", self.ticker, pct(latest.stock, 1));
        println!("  Market factor return:    {}", pct(latest.market, 1));
        println!("  Sector factor return:    {}", pct(latest.sector, 1));
        println!("  Subsector factor return: {}", pct(latest.subsector, 1));
        println!(
            "  Residual (unhedgeable):  {}",
            pct(latest.stock - latest.subsector, 1)
        );

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

    fn source_with(json: &str) -> FakeSource {
        let returns: TickerReturns = serde_json::from_str(json).unwrap();
        let mut source = FakeSource::default();
        source.returns.insert("NVDA".to_string(), returns);
        source
    }

    #[test]
    fn test_columns_compound_independently() {
        let source = source_with(
            r#"{
                "data": [
                    {"date": "2024-01-02", "stock": 0.01, "l1": 0.00, "l2": 0.01, "l3": -0.01},
                    {"date": "2024-01-03", "stock": 0.02, "l1": 0.00, "l2": 0.02, "l3": -0.01}
                ],
                "meta": {"market_etf": "SPY", "sector_etf": "XLK", "subsector_etf": "SMH"}
            }"#,
        );

        let report = run(&source, "NVDA", 3).unwrap();
        assert_eq!(report.points.len(), 2);

        let last = report.latest().unwrap();
        //(1.01 * 1.02) - 1
        assert!((last.stock - 0.0302).abs() < 1e-9);
        //flat market column stays at zero
        assert_eq!(last.market, 0.0);
        assert!((last.sector - 0.0302).abs() < 1e-9);
        //(0.99 * 0.99) - 1
        assert!((last.subsector - (-0.0199)).abs() < 1e-9);
    }

    #[test]
    fn test_residual_is_stock_minus_subsector() {
        let source = source_with(
            r#"{
                "data": [
                    {"date": "2024-01-02", "stock": 0.05, "l1": 0.01, "l2": 0.02, "l3": 0.03}
                ],
                "meta": {"market_etf": "SPY", "sector_etf": "XLK", "subsector_etf": "SMH"}
            }"#,
        );

        let report = run(&source, "NVDA", 1).unwrap();
        assert!((report.residual().unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_poison_column_fails_whole_chart() {
        let source = source_with(
            r#"{
                "data": [
                    {"date": "2024-01-02", "stock": 0.01, "l1": 0.0, "l2": -1.5, "l3": 0.0}
                ],
                "meta": {"market_etf": "SPY", "sector_etf": "XLK", "subsector_etf": "SMH"}
            }"#,
        );

        assert!(run(&source, "NVDA", 1).is_err());
    }

    #[test]
    fn test_unknown_ticker_propagates() {
        let source = FakeSource::default();
        assert!(run(&source, "ZZZZ", 1).is_err());
    }
}
