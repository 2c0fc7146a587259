//! Error types for the reporting engine.
//!
//! Three layers: `DataError` for record-level invariant violations,
//! `StoreError` for dataset loading and query failures, and `EngineError`
//! for everything the report builders can reject. An empty result set is
//! never an error; reports carry explicit empty states instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::FacilityKey;

/// A record field violating the data-model invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A rating outside the 0-5 scale, or not a finite number.
    #[error("rating '{field}' is {value}, expected a finite value in 0.0..=5.0")]
    RatingOutOfRange { field: &'static str, value: f64 },

    /// A negative or non-finite hourly rate.
    #[error("hourly rate {0} is not a finite non-negative amount")]
    InvalidHourlyRate(f64),
}

/// Failures raised by the data access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The dataset snapshot could not be read.
    #[error("failed to read dataset {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset snapshot is not valid JSON for the expected schema.
    #[error("failed to parse dataset {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A review failed invariant validation at load time.
    #[error("invalid review {id}: {source}")]
    InvalidRecord {
        id: u32,
        #[source]
        source: DataError,
    },

    /// Two records of the same collection share an identifier.
    #[error("duplicate {collection} id {id} in dataset")]
    DuplicateId { collection: &'static str, id: u32 },
}

/// Failures surfaced by the report builders.
///
/// `FacilityNotFound` is a structured outcome recovered at the binary
/// boundary, not a crash; the other variants reject bad input before any
/// query is issued.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No facility matches the requested key.
    #[error("facility not found: {0}")]
    FacilityNotFound(FacilityKey),

    /// Caller supplied neither or both of the mutually exclusive lookup keys.
    #[error("facility lookup needs exactly one of an id or a name")]
    InvalidLookup,

    /// The job title pattern did not compile.
    #[error("invalid job title pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The data access layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_messages() {
        let err = DataError::RatingOutOfRange {
            field: "overall",
            value: 7.5,
        };
        assert!(err.to_string().contains("overall"));
        assert!(err.to_string().contains("7.5"));

        let err = DataError::InvalidHourlyRate(-1.0);
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_not_found_names_the_key() {
        let err = EngineError::FacilityNotFound(FacilityKey::Id(9999));
        assert_eq!(err.to_string(), "facility not found: id 9999");

        let err = EngineError::FacilityNotFound(FacilityKey::Name("Mercy General".to_string()));
        assert!(err.to_string().contains("Mercy General"));
    }

    #[test]
    fn test_store_error_wraps_into_engine_error() {
        let store_err = StoreError::DuplicateId {
            collection: "facilities",
            id: 3,
        };
        let engine_err = EngineError::from(store_err);
        assert!(engine_err.to_string().contains("duplicate facilities id 3"));
    }
}
