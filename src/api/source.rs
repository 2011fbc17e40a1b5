use crate::api::client::ApiError;
use crate::api::types::{BatchAnalysis, Decomposition, TickerMetrics, TickerReturns};

//producer seam between commands and the network; commands only see this
//trait, so reports are assembled and tested without any live api
//Sync because multi-ticker commands fan out over worker threads
pub trait RiskDataSource: Sync {
    //daily returns plus rolling hedge layers; rows chronological,
    //DataUnavailable when the api has nothing for the ticker
    fn ticker_returns(&self, ticker: &str, years: u32) -> Result<TickerReturns, ApiError>;

    //monthly erm3 factor decomposition against the given market etf
    fn l3_decomposition(&self, ticker: &str, market_etf: &str) -> Result<Decomposition, ApiError>;

    //latest risk metric snapshot
    fn metrics(&self, ticker: &str) -> Result<TickerMetrics, ApiError>;

    //six-component hedge breakdown for many tickers in one call
    fn batch_analyze(&self, tickers: &[String], years: u32) -> Result<BatchAnalysis, ApiError>;
}
