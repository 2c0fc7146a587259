//! Data models for the review explorer.
//!
//! This module contains the core structures for facilities and employee
//! reviews, mirroring the JSON documents in a dataset snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// A healthcare facility that reviews are posted against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Dataset-wide facility identifier.
    pub id: u32,
    /// Facility display name. Not guaranteed unique across the dataset.
    pub name: String,
    pub address: Address,
}

/// Postal address of a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub full_address: String,
}

/// An employee review of a facility.
///
/// `facility_id` references [`Facility::id`] but is not enforced at load
/// time; a review pointing at a missing facility is kept and flagged when
/// reports render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Dataset-wide review identifier.
    pub review_id: u32,
    /// The facility this review is about.
    pub facility_id: u32,
    pub job_title: String,
    pub department: String,
    /// Free-text band such as "1-2 years" or "5+ years".
    pub years_of_experience: String,
    pub date_posted: NaiveDate,
    pub compensation: Compensation,
    pub ratings: RatingSet,
    pub pros: String,
    pub cons: String,
    pub would_recommend: bool,
    /// Facility name copied onto the review at ingestion time, so listings
    /// render without a join. May be stale if the review is orphaned.
    pub facility_name: String,
}

/// Pay reported by the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    pub hourly_rate: f64,
    pub annual_salary: u32,
}

impl Compensation {
    /// Checks that the hourly rate is a finite non-negative amount.
    pub fn validate(&self) -> Result<(), DataError> {
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(DataError::InvalidHourlyRate(self.hourly_rate));
        }
        Ok(())
    }
}

/// The four rating dimensions of a review, each on a 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSet {
    pub overall: f64,
    pub work_life_balance: f64,
    pub salary_benefits: f64,
    pub management: f64,
}

impl RatingSet {
    /// Checks that each dimension is a finite value within 0-5.
    pub fn validate(&self) -> Result<(), DataError> {
        let fields = [
            ("overall", self.overall),
            ("work_life_balance", self.work_life_balance),
            ("salary_benefits", self.salary_benefits),
            ("management", self.management),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(0.0..=5.0).contains(&value) {
                return Err(DataError::RatingOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

impl Review {
    /// Validates the review's compensation and ratings invariants.
    pub fn validate(&self) -> Result<(), DataError> {
        self.compensation.validate()?;
        self.ratings.validate()?;
        Ok(())
    }
}
