//! Report assembly.
//!
//! Each builder composes store queries and aggregation into a structured,
//! serializable report value. Builders never format text; that happens in
//! the renderer. Builders are generic over [`FacilityStore`] so tests run
//! against hand-built stores.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::analysis::{
    average_ratings, compensation_summary, recommend_rate, CompensationSummary, RatingAverages,
};
use crate::error::EngineError;
use crate::models::{Facility, Review};
use crate::store::{FacilityKey, FacilityStore, TitleFilter};

/// Result alias for report builders.
pub type ReportResult<T> = Result<T, EngineError>;

/// One facility with all its reviews and rating averages.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityDetail {
    pub facility: Facility,
    pub review_count: usize,
    /// `None` when the facility has no reviews yet.
    pub averages: Option<RatingAverages>,
    pub reviews: Vec<Review>,
}

/// A review matched by a title filter, flagged when its facility is missing.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewHit {
    pub review: Review,
    /// Set when `facility_id` matches no facility in the store.
    pub orphaned: bool,
}

/// All reviews whose job title matches a pattern, across facilities.
#[derive(Debug, Clone, Serialize)]
pub struct TitleSearch {
    pub pattern: String,
    pub hits: Vec<ReviewHit>,
}

/// Side-by-side statistics for every facility in the store.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

/// One facility's entry in the comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub facility: Facility,
    pub review_count: usize,
    /// `None` when the facility has no reviews yet.
    pub stats: Option<ComparisonStats>,
}

/// Aggregates backing one comparison row.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComparisonStats {
    pub avg_overall: f64,
    pub avg_salary_rating: f64,
    pub avg_annual_salary: f64,
    pub recommend_pct: f64,
}

/// Pay statistics for one role across facilities.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryInsight {
    pub pattern: String,
    /// `None` when no review matches the pattern.
    pub summary: Option<CompensationSummary>,
    pub hits: Vec<ReviewHit>,
}

/// Facilities in the store, optionally narrowed to one city.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityRoster {
    pub city: Option<String>,
    pub facilities: Vec<Facility>,
}

/// Builds the detail report for the facility matching exactly one of `id`
/// and `name`.
///
/// Passing neither or both keys is rejected before any query runs. An
/// unknown key is the structured [`EngineError::FacilityNotFound`] outcome,
/// while a facility with zero reviews is a valid report with
/// `averages: None`.
pub fn facility_detail<S>(
    store: &S,
    id: Option<u32>,
    name: Option<&str>,
) -> ReportResult<FacilityDetail>
where
    S: FacilityStore + ?Sized,
{
    let key = match (id, name) {
        (Some(id), None) => FacilityKey::Id(id),
        (None, Some(name)) => FacilityKey::Name(name.to_string()),
        _ => return Err(EngineError::InvalidLookup),
    };
    let facility = store
        .find_facility(&key)?
        .ok_or(EngineError::FacilityNotFound(key))?;
    let reviews = store.reviews_for(&facility)?;
    let averages = average_ratings(&reviews);
    Ok(FacilityDetail {
        facility,
        review_count: reviews.len(),
        averages,
        reviews,
    })
}

/// Builds the cross-facility search report for a job title pattern.
pub fn search_by_title<S>(store: &S, pattern: &str) -> ReportResult<TitleSearch>
where
    S: FacilityStore + ?Sized,
{
    let filter = title_filter(pattern)?;
    let reviews = store.find_reviews_by_job_title(&filter)?;
    let hits = flag_orphans(store, reviews)?;
    Ok(TitleSearch {
        pattern: filter.pattern().to_string(),
        hits,
    })
}

/// Builds the side-by-side comparison across every facility.
///
/// Facilities with zero reviews keep their row with `stats: None` rather
/// than being omitted.
pub fn compare_facilities<S>(store: &S) -> ReportResult<Comparison>
where
    S: FacilityStore + ?Sized,
{
    let mut rows = Vec::new();
    for facility in store.list_facilities()? {
        let reviews = store.reviews_for(&facility)?;
        let stats = comparison_stats(&reviews);
        rows.push(ComparisonRow {
            facility,
            review_count: reviews.len(),
            stats,
        });
    }
    Ok(Comparison { rows })
}

fn comparison_stats(reviews: &[Review]) -> Option<ComparisonStats> {
    let averages = average_ratings(reviews)?;
    let pay = compensation_summary(reviews)?;
    let recommend_pct = recommend_rate(reviews)?;
    Some(ComparisonStats {
        avg_overall: averages.overall,
        avg_salary_rating: averages.salary_benefits,
        avg_annual_salary: pay.mean_annual,
        recommend_pct,
    })
}

/// Builds the salary insight report for a role pattern.
pub fn salary_insight<S>(store: &S, pattern: &str) -> ReportResult<SalaryInsight>
where
    S: FacilityStore + ?Sized,
{
    let filter = title_filter(pattern)?;
    let reviews = store.find_reviews_by_job_title(&filter)?;
    let summary = compensation_summary(&reviews);
    let hits = flag_orphans(store, reviews)?;
    Ok(SalaryInsight {
        pattern: filter.pattern().to_string(),
        summary,
        hits,
    })
}

/// Builds the roster of all facilities, optionally narrowed to one city.
pub fn facility_roster<S>(store: &S, city: Option<&str>) -> ReportResult<FacilityRoster>
where
    S: FacilityStore + ?Sized,
{
    let facilities = match city {
        Some(city) => store.find_facilities_by_city(city)?,
        None => store.list_facilities()?,
    };
    Ok(FacilityRoster {
        city: city.map(str::to_string),
        facilities,
    })
}

fn title_filter(pattern: &str) -> ReportResult<TitleFilter> {
    TitleFilter::new(pattern).map_err(|source| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Marks reviews whose facility id resolves to no known facility. Orphans
/// are kept in the result, flagged and logged, never dropped.
fn flag_orphans<S>(store: &S, reviews: Vec<Review>) -> ReportResult<Vec<ReviewHit>>
where
    S: FacilityStore + ?Sized,
{
    let known: HashSet<u32> = store.list_facilities()?.iter().map(|f| f.id).collect();
    Ok(reviews
        .into_iter()
        .map(|review| {
            let orphaned = !known.contains(&review.facility_id);
            if orphaned {
                warn!(
                    "review {} references unknown facility id {}",
                    review.review_id, review.facility_id
                );
            }
            ReviewHit { review, orphaned }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Compensation, RatingSet};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn facility(id: u32, name: &str, city: &str) -> Facility {
        Facility {
            id,
            name: name.to_string(),
            address: Address {
                street: format!("{id} Main St"),
                city: city.to_string(),
                state: "NJ".to_string(),
                full_address: format!("{id} Main St, {city}, NJ"),
            },
        }
    }

    fn review(
        review_id: u32,
        facility_id: u32,
        job_title: &str,
        overall: f64,
        annual_salary: u32,
        would_recommend: bool,
    ) -> Review {
        Review {
            review_id,
            facility_id,
            job_title: job_title.to_string(),
            department: "Medical-Surgical".to_string(),
            years_of_experience: "1-2 years".to_string(),
            date_posted: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            compensation: Compensation {
                hourly_rate: f64::from(annual_salary) / 2080.0,
                annual_salary,
            },
            ratings: RatingSet {
                overall,
                work_life_balance: overall,
                salary_benefits: overall,
                management: overall,
            },
            pros: "Good orientation".to_string(),
            cons: "Parking".to_string(),
            would_recommend,
            facility_name: format!("Facility {facility_id}"),
        }
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new(
            vec![
                facility(0, "Saint Michael's Medical Center", "Newark"),
                facility(1, "Newark Beth Israel Medical Center", "Newark"),
                facility(2, "Jersey City Medical Center", "Jersey City"),
            ],
            vec![
                review(101, 0, "Registered Nurse", 4.0, 80_080, true),
                review(102, 0, "CNA", 5.0, 35_000, true),
                review(103, 1, "CNA", 3.0, 45_000, false),
                review(104, 1, "Licensed Practical Nurse", 3.5, 54_000, true),
                review(105, 77, "Unit Clerk", 2.0, 38_000, false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_facility_detail_averages_ratings() {
        let store = sample_store();
        let detail = facility_detail(&store, Some(0), None).unwrap();
        assert_eq!(detail.facility.name, "Saint Michael's Medical Center");
        assert_eq!(detail.review_count, 2);
        assert_eq!(detail.averages.unwrap().overall, 4.5);
    }

    #[test]
    fn test_facility_detail_by_name() {
        let store = sample_store();
        let detail = facility_detail(&store, None, Some("Jersey City Medical Center")).unwrap();
        assert_eq!(detail.facility.id, 2);
    }

    #[test]
    fn test_facility_detail_unknown_id_is_not_found() {
        let store = sample_store();
        let err = facility_detail(&store, Some(9999), None).unwrap_err();
        assert!(matches!(
            err,
            EngineError::FacilityNotFound(FacilityKey::Id(9999))
        ));
    }

    #[test]
    fn test_facility_detail_requires_exactly_one_key() {
        let store = sample_store();
        let neither = facility_detail(&store, None, None).unwrap_err();
        assert!(matches!(neither, EngineError::InvalidLookup));

        let both = facility_detail(&store, Some(0), Some("Saint Michael's Medical Center"));
        assert!(matches!(both, Err(EngineError::InvalidLookup)));
    }

    #[test]
    fn test_facility_detail_with_no_reviews() {
        let store = sample_store();
        let detail = facility_detail(&store, Some(2), None).unwrap();
        assert_eq!(detail.review_count, 0);
        assert!(detail.averages.is_none());
        assert!(detail.reviews.is_empty());
    }

    #[test]
    fn test_search_excludes_non_matching_titles() {
        let store = sample_store();
        let search = search_by_title(&store, "Registered Nurse").unwrap();
        assert_eq!(search.hits.len(), 1);
        assert_eq!(search.hits[0].review.review_id, 101);
    }

    #[test]
    fn test_search_flags_orphans() {
        let store = sample_store();
        let search = search_by_title(&store, "Unit Clerk").unwrap();
        assert_eq!(search.hits.len(), 1);
        assert!(search.hits[0].orphaned);

        let search = search_by_title(&store, "Registered Nurse").unwrap();
        assert!(!search.hits[0].orphaned);
    }

    #[test]
    fn test_search_rejects_invalid_pattern() {
        let store = sample_store();
        let err = search_by_title(&store, "(").unwrap_err();
        assert!(matches!(err, EngineError::InvalidPattern { .. }));
    }

    #[test]
    fn test_salary_insight_mean_and_range() {
        let store = sample_store();
        let insight = salary_insight(&store, "CNA").unwrap();
        let summary = insight.summary.unwrap();
        assert_eq!(summary.mean_annual, 40_000.0);
        assert_eq!(summary.min_annual, 35_000);
        assert_eq!(summary.max_annual, 45_000);
        assert_eq!(insight.hits.len(), 2);
    }

    #[test]
    fn test_salary_insight_without_matches_is_no_data() {
        let store = sample_store();
        let insight = salary_insight(&store, "Perfusionist").unwrap();
        assert!(insight.summary.is_none());
        assert!(insight.hits.is_empty());
    }

    #[test]
    fn test_comparison_keeps_zero_review_facilities() {
        let store = sample_store();
        let comparison = compare_facilities(&store).unwrap();
        assert_eq!(comparison.rows.len(), 3);

        let jcmc = &comparison.rows[2];
        assert_eq!(jcmc.facility.id, 2);
        assert_eq!(jcmc.review_count, 0);
        assert!(jcmc.stats.is_none());
    }

    #[test]
    fn test_comparison_counts_match_store_queries() {
        let store = sample_store();
        let comparison = compare_facilities(&store).unwrap();
        for row in &comparison.rows {
            let expected = store.find_reviews_by_facility(row.facility.id).unwrap().len();
            assert_eq!(row.review_count, expected);
        }
    }

    #[test]
    fn test_comparison_stats_values() {
        let store = sample_store();
        let comparison = compare_facilities(&store).unwrap();
        let stats = comparison.rows[0].stats.unwrap();
        assert_eq!(stats.avg_overall, 4.5);
        assert_eq!(stats.avg_annual_salary, 57_540.0);
        assert_eq!(stats.recommend_pct, 100.0);
    }

    #[test]
    fn test_roster_filters_by_exact_city() {
        let store = sample_store();
        let all = facility_roster(&store, None).unwrap();
        assert_eq!(all.facilities.len(), 3);

        let newark = facility_roster(&store, Some("Newark")).unwrap();
        assert_eq!(newark.facilities.len(), 2);
        assert_eq!(newark.city.as_deref(), Some("Newark"));

        let nowhere = facility_roster(&store, Some("Hoboken")).unwrap();
        assert!(nowhere.facilities.is_empty());
    }
}
