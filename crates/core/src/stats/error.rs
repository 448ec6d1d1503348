use thiserror::Error;

use crate::storage::RepositoryError;

use super::StatisticsField;

/// Errors that can occur while aggregating statistics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Statistics sub-query {field} failed: {source}")]
    PartialAggregationFailure {
        field: StatisticsField,
        #[source]
        source: RepositoryError,
    },
}

impl AggregationError {
    /// The sub-query that failed.
    pub fn field(&self) -> StatisticsField {
        match self {
            AggregationError::PartialAggregationFailure { field, .. } => *field,
        }
    }
}

/// Result type for statistics aggregation.
pub type Result<T> = std::result::Result<T, AggregationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure_display() {
        let error = AggregationError::PartialAggregationFailure {
            field: StatisticsField::LikeCount,
            source: RepositoryError::QueryFailed("deadlock detected".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Statistics sub-query likeCount failed: Query failed: deadlock detected"
        );
        assert_eq!(error.field(), StatisticsField::LikeCount);
    }
}
