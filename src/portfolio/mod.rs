pub mod weights;

pub use weights::{Portfolio, PortfolioError};
