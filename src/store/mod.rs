//! Data access layer over a facility/review dataset.
//!
//! [`FacilityStore`] is the seam the report builders depend on; the
//! bundled [`MemoryStore`] backs it with a JSON snapshot loaded into
//! memory. Queries return owned records so callers never borrow from the
//! store's internals.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{Facility, Review};

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The single key a facility lookup runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityKey {
    Id(u32),
    Name(String),
}

impl fmt::Display for FacilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityKey::Id(id) => write!(f, "id {id}"),
            FacilityKey::Name(name) => write!(f, "name \"{name}\""),
        }
    }
}

/// Case-insensitive job title predicate.
///
/// The pattern is full regex syntax, so a plain word behaves as a
/// substring match: "Nurse" matches both "Registered Nurse" and "Nurse
/// Practitioner", while "Registered Nurse" does not match "Licensed
/// Practical Nurse".
#[derive(Debug, Clone)]
pub struct TitleFilter {
    pattern: String,
    regex: Regex,
}

impl TitleFilter {
    /// Compiles a case-insensitive filter, rejecting invalid patterns
    /// before any query runs.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as the caller wrote it.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether a job title matches the filter.
    pub fn matches(&self, job_title: &str) -> bool {
        self.regex.is_match(job_title)
    }
}

/// Read-only queries the report builders run against a dataset.
pub trait FacilityStore {
    /// Finds the facility matching the key, or `None` when the dataset has
    /// no match. Duplicate names resolve to the first facility in dataset
    /// order.
    fn find_facility(&self, key: &FacilityKey) -> StoreResult<Option<Facility>>;

    /// All facilities in dataset order.
    fn list_facilities(&self) -> StoreResult<Vec<Facility>>;

    /// All reviews posted against the facility, in dataset order.
    fn find_reviews_by_facility(&self, facility_id: u32) -> StoreResult<Vec<Review>>;

    /// All reviews whose job title matches the filter, across facilities.
    fn find_reviews_by_job_title(&self, filter: &TitleFilter) -> StoreResult<Vec<Review>>;

    /// Facilities in the named city. The comparison is exact and
    /// case-sensitive.
    fn find_facilities_by_city(&self, city: &str) -> StoreResult<Vec<Facility>>;

    /// Reviews for an already-resolved facility.
    fn reviews_for(&self, facility: &Facility) -> StoreResult<Vec<Review>> {
        self.find_reviews_by_facility(facility.id)
    }
}

/// On-disk shape of a dataset snapshot.
#[derive(Debug, Deserialize)]
struct Snapshot {
    facilities: Vec<Facility>,
    reviews: Vec<Review>,
}

/// In-memory store backed by a JSON snapshot.
///
/// Loading validates every review and rejects duplicate identifiers in
/// either collection. Reviews referencing a missing facility are accepted;
/// consumers flag them when reporting.
#[derive(Debug)]
pub struct MemoryStore {
    facilities: Vec<Facility>,
    reviews: Vec<Review>,
}

impl MemoryStore {
    /// Builds a store from already-parsed records, enforcing the load-time
    /// invariants.
    pub fn new(facilities: Vec<Facility>, reviews: Vec<Review>) -> StoreResult<Self> {
        let mut facility_ids = HashSet::new();
        for facility in &facilities {
            if !facility_ids.insert(facility.id) {
                return Err(StoreError::DuplicateId {
                    collection: "facilities",
                    id: facility.id,
                });
            }
        }

        let mut review_ids = HashSet::new();
        for review in &reviews {
            if !review_ids.insert(review.review_id) {
                return Err(StoreError::DuplicateId {
                    collection: "reviews",
                    id: review.review_id,
                });
            }
            review.validate().map_err(|source| StoreError::InvalidRecord {
                id: review.review_id,
                source,
            })?;
        }

        Ok(Self {
            facilities,
            reviews,
        })
    }

    /// Loads and validates a JSON snapshot from disk.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded {} facilities and {} reviews from {}",
            snapshot.facilities.len(),
            snapshot.reviews.len(),
            path.display()
        );
        Self::new(snapshot.facilities, snapshot.reviews)
    }
}

impl FacilityStore for MemoryStore {
    fn find_facility(&self, key: &FacilityKey) -> StoreResult<Option<Facility>> {
        match key {
            FacilityKey::Id(id) => {
                Ok(self.facilities.iter().find(|f| f.id == *id).cloned())
            }
            FacilityKey::Name(name) => {
                let mut matches = self.facilities.iter().filter(|f| &f.name == name);
                let first = matches.next().cloned();
                let extra = matches.count();
                if extra > 0 {
                    warn!(
                        "{} facilities share the name \"{}\"; returning the first in dataset order",
                        extra + 1,
                        name
                    );
                }
                Ok(first)
            }
        }
    }

    fn list_facilities(&self) -> StoreResult<Vec<Facility>> {
        Ok(self.facilities.clone())
    }

    fn find_reviews_by_facility(&self, facility_id: u32) -> StoreResult<Vec<Review>> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.facility_id == facility_id)
            .cloned()
            .collect())
    }

    fn find_reviews_by_job_title(&self, filter: &TitleFilter) -> StoreResult<Vec<Review>> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| filter.matches(&r.job_title))
            .cloned()
            .collect())
    }

    fn find_facilities_by_city(&self, city: &str) -> StoreResult<Vec<Facility>> {
        Ok(self
            .facilities
            .iter()
            .filter(|f| f.address.city == city)
            .cloned()
            .collect())
    }
}
