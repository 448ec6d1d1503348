mod error;
mod types;

pub use error::{AggregationError, Result};
pub use types::{CompositeStatistics, StatisticsField};
