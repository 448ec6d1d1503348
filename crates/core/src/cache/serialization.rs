//! Pure functions for encoding cache payloads.
//!
//! Payloads are JSON so cached values stay readable with `redis-cli`.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Serializes a value to JSON bytes for storage in the cache.
pub fn to_cache_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes read from the cache.
pub fn from_cache_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{TrendingDestination, TrendingDestinations};

    fn sample() -> TrendingDestinations {
        TrendingDestinations {
            destinations: vec![
                TrendingDestination {
                    id: "x".to_string(),
                    name: "Kyoto".to_string(),
                    country: "Japan".to_string(),
                    score: 9,
                },
                TrendingDestination {
                    id: "y".to_string(),
                    name: "Oaxaca".to_string(),
                    country: "Mexico".to_string(),
                    score: 7,
                },
            ],
            total: 2,
        }
    }

    #[test]
    fn test_trending_payload_survives_cache_encoding() {
        let bytes = to_cache_bytes(&sample()).unwrap();
        let decoded: TrendingDestinations = from_cache_bytes(&bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_payload_is_json() {
        let bytes = to_cache_bytes(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["destinations"][0]["score"], 9);
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        let result: Result<TrendingDestinations, _> = from_cache_bytes(b"not json");
        assert!(matches!(result, Err(SerializationError::DeserializeFailed(_))));
    }

    #[test]
    fn test_deserialize_wrong_shape_fails() {
        let result: Result<TrendingDestinations, _> = from_cache_bytes(br#"{"total": 1}"#);
        assert!(result.is_err());
    }
}
