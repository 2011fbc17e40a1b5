use crate::api::source::RiskDataSource;
use crate::api::types::{BatchAnalysis, Decomposition, TickerMetrics, TickerReturns};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://riskmodels.net/api";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("No data available for {ticker}")]
    DataUnavailable { ticker: String },
}

//blocking https client for the riskmodels api, authenticated per request
//with a bearer key
#[derive(Debug, Clone)]
pub struct RiskModelsClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl RiskModelsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        RiskModelsClient {
            base_url,
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    fn get(&self, path: &str, params: &[(&str, String)], ticker: &str) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(params)
            .send()?;

        Self::read_body(response, ticker)
    }

    fn read_body(response: Response, ticker: &str) -> Result<String, ApiError> {
        let status = response.status();

        //the api answers 404 when it has no coverage for the entity
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::DataUnavailable {
                ticker: ticker.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response.text()?)
    }
}

impl RiskDataSource for RiskModelsClient {
    fn ticker_returns(&self, ticker: &str, years: u32) -> Result<TickerReturns, ApiError> {
        let params = [
            ("ticker", ticker.to_string()),
            ("years", years.to_string()),
        ];
        let body = self.get("/ticker-returns", &params, ticker)?;

        let mut returns: TickerReturns = serde_json::from_str(&body)?;
        returns.sort_by_date();

        if returns.data.is_empty() {
            return Err(ApiError::DataUnavailable {
                ticker: ticker.to_string(),
            });
        }

        Ok(returns)
    }

    fn l3_decomposition(&self, ticker: &str, market_etf: &str) -> Result<Decomposition, ApiError> {
        let params = [
            ("ticker", ticker.to_string()),
            ("market_factor_etf", market_etf.to_string()),
        ];
        let body = self.get("/l3-decomposition", &params, ticker)?;

        Ok(serde_json::from_str(&body)?)
    }

    fn metrics(&self, ticker: &str) -> Result<TickerMetrics, ApiError> {
        let body = self.get(&format!("/metrics/{ticker}"), &[], ticker)?;

        Ok(serde_json::from_str(&body)?)
    }

    fn batch_analyze(&self, tickers: &[String], years: u32) -> Result<BatchAnalysis, ApiError> {
        let url = format!("{}/batch/analyze", self.base_url);
        let payload = json!({
            "tickers": tickers,
            "metrics": ["hedge_ratios"],
            "years": years,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()?;

        let body = Self::read_body(response, "batch")?;
        Ok(serde_json::from_str(&body)?)
    }
}
