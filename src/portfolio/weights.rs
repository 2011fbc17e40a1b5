use anyhow::{Context, Result};
use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Portfolio has no positions")]
    Empty,
    #[error("Duplicate ticker: {0}")]
    DuplicateTicker(String),
    #[error("Invalid weight {weight} for {ticker}: must be finite and >= 0")]
    InvalidWeight { ticker: String, weight: f64 },
}

#[derive(Debug, Deserialize)]
struct CsvPosition {
    ticker: String,
    weight: f64,
}

//ordered ticker -> weight book; insertion order drives display order
//weights are not required to sum to 1, rollups stay plain weighted sums
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    positions: IndexMap<String, f64>,
}

impl Portfolio {
    pub fn new(positions: IndexMap<String, f64>) -> Result<Self, PortfolioError> {
        if positions.is_empty() {
            return Err(PortfolioError::Empty);
        }

        for (ticker, &weight) in &positions {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PortfolioError::InvalidWeight {
                    ticker: ticker.clone(),
                    weight,
                });
            }
        }

        Ok(Portfolio { positions })
    }

    //loads a two-column csv: ticker,weight
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .context(format!("Failed to open portfolio file: {:?}", path))?;

        let mut positions = IndexMap::new();

        for (index, result) in reader.deserialize().enumerate() {
            let record: CsvPosition =
                result.context(format!("Failed to parse position at line {}", index + 2))?;

            if positions.insert(record.ticker.clone(), record.weight).is_some() {
                return Err(PortfolioError::DuplicateTicker(record.ticker).into());
            }
        }

        Ok(Self::new(positions)?)
    }

    //loads a json object: {"AAPL": 0.25, ...}
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read portfolio file: {:?}", path))?;
        let positions: IndexMap<String, f64> = serde_json::from_str(&contents)
            .context(format!("Failed to parse portfolio file: {:?}", path))?;

        Ok(Self::new(positions)?)
    }

    pub fn tickers(&self) -> Vec<String> {
        self.positions.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, f64)> {
        self.positions.iter().map(|(ticker, &weight)| (ticker, weight))
    }

    pub fn weight(&self, ticker: &str) -> Option<f64> {
        self.positions.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
