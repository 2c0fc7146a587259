//! Console and JSON rendering for reports.
//!
//! All rounding and currency formatting lives here; the builders hand over
//! full-precision values. Percentages and currency render with two
//! decimals, annual amounts with thousands separators.

use anyhow::Result;
use serde::Serialize;

use crate::config::RenderConfig;
use crate::models::Compensation;
use crate::report::builder::{
    Comparison, FacilityDetail, FacilityRoster, ReviewHit, SalaryInsight, TitleSearch,
};

const RULE_WIDTH: usize = 80;

/// Renders the facility detail report as console text.
pub fn render_facility_detail(detail: &FacilityDetail, config: &RenderConfig) -> String {
    let mut output = String::new();

    output.push_str(&banner(&format!("FACILITY: {}", detail.facility.name)));
    output.push_str(&format!("ID: {}\n", detail.facility.id));
    output.push_str(&format!(
        "Address: {}\n",
        detail.facility.address.full_address
    ));
    output.push_str(&format!("\nTotal Reviews: {}\n", detail.review_count));

    match &detail.averages {
        Some(avg) => {
            output.push_str("\nAverage Ratings:\n");
            output.push_str(&format!("  Overall: {:.2}/5.0\n", avg.overall));
            output.push_str(&format!(
                "  Work-Life Balance: {:.2}/5.0\n",
                avg.work_life_balance
            ));
            output.push_str(&format!(
                "  Salary & Benefits: {:.2}/5.0\n",
                avg.salary_benefits
            ));
            output.push_str(&format!("  Management: {:.2}/5.0\n", avg.management));

            output.push_str(&format!("\n{}\n", light_rule()));
            output.push_str("REVIEWS:\n");
            output.push_str(&format!("{}\n", light_rule()));

            let (visible, hidden) = capped(&detail.reviews, config);
            for review in visible {
                output.push_str(&format!(
                    "\n[Review #{}] {} - {}\n",
                    review.review_id, review.job_title, review.department
                ));
                output.push_str(&format!(
                    "Experience: {} | Posted: {}\n",
                    review.years_of_experience, review.date_posted
                ));
                output.push_str(&format!("Pay: {}\n", pay_line(&review.compensation)));
                output.push_str(&format!(
                    "Overall Rating: {:.1}/5.0\n",
                    review.ratings.overall
                ));
                output.push_str(&format!("Pros: {}\n", review.pros));
                output.push_str(&format!("Cons: {}\n", review.cons));
                output.push_str(&format!(
                    "Would Recommend: {}\n",
                    if review.would_recommend {
                        "✓ Yes"
                    } else {
                        "✗ No"
                    }
                ));
                output.push_str(&format!("{}\n", light_rule()));
            }
            if hidden > 0 {
                output.push_str(&format!("... and {hidden} more reviews\n"));
            }
        }
        None => output.push_str("No reviews yet\n"),
    }

    output
}

/// Renders the job-title search report as console text.
pub fn render_title_search(search: &TitleSearch, config: &RenderConfig) -> String {
    let mut output = String::new();
    output.push_str(&banner(&format!("REVIEWS FOR: {}", search.pattern)));

    if search.hits.is_empty() {
        output.push_str(&format!(
            "No reviews found for job title: {}\n",
            search.pattern
        ));
        return output;
    }

    output.push_str(&format!("Found {} reviews\n\n", search.hits.len()));

    let (visible, hidden) = capped(&search.hits, config);
    for hit in visible {
        let review = &hit.review;
        output.push_str(&format!(
            "Facility: {}{}\n",
            review.facility_name,
            orphan_mark(hit)
        ));
        output.push_str(&format!(
            "Department: {} | Experience: {}\n",
            review.department, review.years_of_experience
        ));
        output.push_str(&format!("Pay: {}\n", pay_line(&review.compensation)));
        output.push_str(&format!(
            "Overall Rating: {:.1}/5.0\n",
            review.ratings.overall
        ));
        output.push_str(&format!("Pros: {}\n", review.pros));
        output.push_str(&format!("Cons: {}\n", review.cons));
        output.push_str(&format!("{}\n", light_rule()));
    }
    if hidden > 0 {
        output.push_str(&format!("... and {hidden} more reviews\n"));
    }

    output
}

/// Renders the facility comparison report as console text.
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut output = String::new();
    output.push_str(&banner("FACILITY COMPARISON"));

    for row in &comparison.rows {
        output.push_str(&format!("\n{}\n", row.facility.name));
        output.push_str(&format!(
            "Address: {}, {}\n",
            row.facility.address.city, row.facility.address.state
        ));
        output.push_str(&format!("Total Reviews: {}\n", row.review_count));
        match &row.stats {
            Some(stats) => {
                output.push_str(&format!(
                    "Average Overall Rating: {:.2}/5.0\n",
                    stats.avg_overall
                ));
                output.push_str(&format!(
                    "Average Salary Rating: {:.2}/5.0\n",
                    stats.avg_salary_rating
                ));
                output.push_str(&format!(
                    "Average Actual Salary: ${}/year\n",
                    money(stats.avg_annual_salary)
                ));
                output.push_str(&format!("Recommend: {:.2}%\n", stats.recommend_pct));
            }
            None => output.push_str("No reviews yet\n"),
        }
        output.push_str(&format!("{}\n", light_rule()));
    }

    output
}

/// Renders the role salary insight report as console text.
pub fn render_salary_insight(insight: &SalaryInsight, config: &RenderConfig) -> String {
    let mut output = String::new();
    output.push_str(&banner(&format!("SALARY INSIGHTS: {}", insight.pattern)));

    let summary = match &insight.summary {
        Some(summary) => summary,
        None => {
            output.push_str(&format!("No data found for: {}\n", insight.pattern));
            return output;
        }
    };

    output.push_str(&format!("\nBased on {} reviews:\n", insight.hits.len()));
    output.push_str(&format!(
        "Average Salary: ${}/year\n",
        money(summary.mean_annual)
    ));
    output.push_str(&format!(
        "Salary Range: ${} - ${}\n",
        money_int(summary.min_annual),
        money_int(summary.max_annual)
    ));
    output.push_str(&format!(
        "Average Hourly: ${:.2}/hour\n",
        summary.mean_hourly
    ));
    output.push_str(&format!(
        "Hourly Range: ${:.2} - ${:.2}\n",
        summary.min_hourly, summary.max_hourly
    ));

    output.push_str("\nBy Facility:\n");
    let (visible, hidden) = capped(&insight.hits, config);
    for hit in visible {
        let review = &hit.review;
        output.push_str(&format!(
            "  {}{}: ${}/year (${:.2}/hr)\n",
            review.facility_name,
            orphan_mark(hit),
            money_int(review.compensation.annual_salary),
            review.compensation.hourly_rate
        ));
    }
    if hidden > 0 {
        output.push_str(&format!("  ... and {hidden} more reviews\n"));
    }

    output
}

/// Renders the facility roster as console text.
pub fn render_roster(roster: &FacilityRoster) -> String {
    let mut output = String::new();
    let title = match &roster.city {
        Some(city) => format!("FACILITIES IN: {city}"),
        None => "FACILITIES".to_string(),
    };
    output.push_str(&banner(&title));

    if roster.facilities.is_empty() {
        match &roster.city {
            Some(city) => output.push_str(&format!("No facilities found in: {city}\n")),
            None => output.push_str("No facilities found\n"),
        }
        return output;
    }

    output.push_str(&format!("Found {} facilities\n", roster.facilities.len()));
    for facility in &roster.facilities {
        output.push_str(&format!("\n[{}] {}\n", facility.id, facility.name));
        output.push_str(&format!("Address: {}\n", facility.address.full_address));
        output.push_str(&format!("{}\n", light_rule()));
    }

    output
}

/// Serializes any report as pretty-printed JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn pay_line(pay: &Compensation) -> String {
    format!(
        "${:.2}/hr (${}/year)",
        pay.hourly_rate,
        money_int(pay.annual_salary)
    )
}

fn orphan_mark(hit: &ReviewHit) -> &'static str {
    if hit.orphaned {
        " (no matching facility record)"
    } else {
        ""
    }
}

/// Applies the configured cap, returning the visible slice and how many
/// entries were held back.
fn capped<'a, T>(items: &'a [T], config: &RenderConfig) -> (&'a [T], usize) {
    match config.max_reviews {
        Some(max) if items.len() > max => (&items[..max], items.len() - max),
        _ => (items, 0),
    }
}

/// Groups a two-decimal amount with thousands separators: `57,540.00`.
fn money(amount: f64) -> String {
    let text = format!("{amount:.2}");
    match text.split_once('.') {
        Some((int_part, frac)) => format!("{}.{frac}", group_thousands(int_part)),
        None => group_thousands(&text),
    }
}

/// Groups a whole amount with thousands separators: `80,080`.
fn money_int(amount: u32) -> String {
    group_thousands(&amount.to_string())
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}
