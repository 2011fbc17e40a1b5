pub mod attribution;
pub mod chart;
pub mod hedge;
pub mod metrics;
pub mod portfolio;

pub use attribution::{MultiAttribution, TickerAttribution};
pub use chart::{ChartPoint, ChartReport};
pub use hedge::HedgeReport;
pub use metrics::{MetricsReport, MetricsRow};
pub use portfolio::{PortfolioReport, PositionRow, Rollup};
