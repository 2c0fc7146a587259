//! Review aggregation and statistics.
//!
//! Pure functions that fold a set of reviews into descriptive statistics.
//! Every function returns `None` for an empty input so callers can render
//! an explicit empty state instead of inventing a zero.

use serde::Serialize;

use crate::models::Review;

/// Mean of each rating dimension across a set of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingAverages {
    pub overall: f64,
    pub work_life_balance: f64,
    pub salary_benefits: f64,
    pub management: f64,
}

/// Pay statistics across a set of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompensationSummary {
    pub mean_annual: f64,
    pub min_annual: u32,
    pub max_annual: u32,
    pub mean_hourly: f64,
    pub min_hourly: f64,
    pub max_hourly: f64,
}

/// Computes the mean of each rating dimension, or `None` for no reviews.
///
/// Values stay at full precision; rounding happens only when a report is
/// rendered.
pub fn average_ratings<'a, I>(reviews: I) -> Option<RatingAverages>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut count = 0u32;
    let mut overall = 0.0;
    let mut work_life_balance = 0.0;
    let mut salary_benefits = 0.0;
    let mut management = 0.0;

    for review in reviews {
        count += 1;
        overall += review.ratings.overall;
        work_life_balance += review.ratings.work_life_balance;
        salary_benefits += review.ratings.salary_benefits;
        management += review.ratings.management;
    }

    if count == 0 {
        return None;
    }
    let n = f64::from(count);
    Some(RatingAverages {
        overall: overall / n,
        work_life_balance: work_life_balance / n,
        salary_benefits: salary_benefits / n,
        management: management / n,
    })
}

/// Computes annual and hourly pay statistics, or `None` for no reviews.
pub fn compensation_summary<'a, I>(reviews: I) -> Option<CompensationSummary>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut count = 0u32;
    let mut annual_sum = 0u64;
    let mut min_annual = u32::MAX;
    let mut max_annual = 0u32;
    let mut hourly_sum = 0.0;
    let mut min_hourly = f64::INFINITY;
    let mut max_hourly = f64::NEG_INFINITY;

    for review in reviews {
        count += 1;
        let pay = review.compensation;
        annual_sum += u64::from(pay.annual_salary);
        min_annual = min_annual.min(pay.annual_salary);
        max_annual = max_annual.max(pay.annual_salary);
        hourly_sum += pay.hourly_rate;
        min_hourly = min_hourly.min(pay.hourly_rate);
        max_hourly = max_hourly.max(pay.hourly_rate);
    }

    if count == 0 {
        return None;
    }
    let n = f64::from(count);
    Some(CompensationSummary {
        mean_annual: annual_sum as f64 / n,
        min_annual,
        max_annual,
        mean_hourly: hourly_sum / n,
        min_hourly,
        max_hourly,
    })
}

/// Percentage of reviewers who would recommend their facility, in 0-100,
/// or `None` for no reviews.
pub fn recommend_rate<'a, I>(reviews: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut count = 0u32;
    let mut recommended = 0u32;
    for review in reviews {
        count += 1;
        if review.would_recommend {
            recommended += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some(f64::from(recommended) / f64::from(count) * 100.0)
}
