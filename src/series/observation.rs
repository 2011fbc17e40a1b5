use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Invalid periodic return {value} at index {index}: must be finite and > -1")]
    InvalidReturn { index: usize, value: f64 },
    #[error("Timestamps not strictly increasing at index {index}")]
    UnorderedSeries { index: usize },
}

//a single-period fractional return, eg 0.0123 for +1.23%
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    pub timestamp: NaiveDate,
    pub periodic_return: f64,
}

impl ReturnObservation {
    pub fn new(timestamp: NaiveDate, periodic_return: f64) -> Self {
        ReturnObservation {
            timestamp,
            periodic_return,
        }
    }
}

//total compounded return from series start through this period, fractional
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub timestamp: NaiveDate,
    pub cumulative_return: f64,
}

impl CumulativePoint {
    pub fn new(timestamp: NaiveDate, cumulative_return: f64) -> Self {
        CumulativePoint {
            timestamp,
            cumulative_return,
        }
    }
}
