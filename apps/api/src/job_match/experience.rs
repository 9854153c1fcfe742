//! Employment duration arithmetic on the loose `YYYY-MM` dates the client stores.

use chrono::{Datelike, NaiveDate};

use crate::import::dates::normalize_date;
use crate::models::WorkExperience;

/// Parses `YYYY-MM`, `YYYY-MM-DD`, `YYYY` and anything `normalize_date`
/// understands ("Jan 2020", "01/2020") into (year, month).
pub fn parse_year_month(raw: &str) -> Option<(i32, u32)> {
    let normalized = normalize_date(raw);
    let mut parts = normalized.split('-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if !(1900..=2200).contains(&year) {
        return None;
    }
    let month = match parts.next() {
        Some(m) => m.trim().parse::<u32>().ok().filter(|m| (1..=12).contains(m))?,
        None => 1,
    };
    Some((year, month))
}

/// Whole months between start and end; a current role or a missing end date
/// runs until `today`. `None` when the start date is unusable.
pub fn duration_months(exp: &WorkExperience, today: NaiveDate) -> Option<i32> {
    let (start_year, start_month) = parse_year_month(&exp.start_date)?;
    let (end_year, end_month) = if exp.is_current() {
        (today.year(), today.month())
    } else {
        parse_year_month(exp.end_date_text()).unwrap_or((today.year(), today.month()))
    };
    Some((end_year - start_year) * 12 + (end_month as i32 - start_month as i32))
}

/// "7 months", "2 years", "3 years 1 month".
pub fn format_duration(months: i32) -> String {
    let months = months.max(0);
    let years = months / 12;
    let remaining = months % 12;
    let plural = |n: i32| if n == 1 { "" } else { "s" };

    if years == 0 {
        format!("{months} month{}", plural(months))
    } else if remaining == 0 {
        format!("{years} year{}", plural(years))
    } else {
        format!(
            "{years} year{} {remaining} month{}",
            plural(years),
            plural(remaining)
        )
    }
}

pub fn describe_duration(exp: &WorkExperience, today: NaiveDate) -> String {
    duration_months(exp, today)
        .map(format_duration)
        .unwrap_or_else(|| "Unknown duration".to_string())
}

/// Total years across all roles, rounded to one decimal. Overlaps are not merged.
pub fn total_experience_years(work: &[WorkExperience], today: NaiveDate) -> f64 {
    let months: i32 = work
        .iter()
        .filter_map(|exp| duration_months(exp, today))
        .map(|m| m.max(0))
        .sum();
    (f64::from(months) / 12.0 * 10.0).round() / 10.0
}
