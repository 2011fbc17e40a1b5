pub mod client;
pub mod source;
pub mod types;

pub use client::{ApiError, RiskModelsClient, DEFAULT_BASE_URL};
pub use source::RiskDataSource;
pub use types::{
    AgentInfo, BatchAnalysis, BatchResult, Decomposition, HedgeRatios, ReturnColumn, TickerMeta,
    TickerMetrics, TickerReturnRow, TickerReturns,
};
