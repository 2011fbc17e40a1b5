//a Rust-based client and analytics toolkit for the RiskModels factor-risk API

pub mod analytics;
pub mod api;
pub mod commands;
pub mod config;
pub mod portfolio;
pub mod report;
pub mod series;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::analytics::{summarize, weighted_sum, AttributionSummary, FactorObservation};
    pub use crate::api::{
        ApiError, ReturnColumn, RiskDataSource, RiskModelsClient, TickerMeta, TickerMetrics,
        TickerReturnRow, TickerReturns, DEFAULT_BASE_URL,
    };
    pub use crate::commands::{
        ChartPoint, ChartReport, HedgeReport, MetricsReport, MultiAttribution, PortfolioReport,
        TickerAttribution,
    };
    pub use crate::config::ApiConfig;
    pub use crate::portfolio::{Portfolio, PortfolioError};
    pub use crate::series::{compound, CumulativePoint, ReturnObservation, SeriesError};
}
