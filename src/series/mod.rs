pub mod compound;
pub mod observation;

pub use compound::compound;
pub use observation::{CumulativePoint, ReturnObservation, SeriesError};
