//! Normalisation of the free-form dates found in resumes.

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").expect("iso date regex is valid"));
static MONTH_NAME_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\.?,?\s+(\d{4})$").expect("month-name date regex is valid")
});
static MONTH_SLASH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s*[/.\-]\s*(\d{4})$").expect("numeric month/year regex is valid")
});
static YEAR_SLASH_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[/.](\d{1,2})$").expect("year/month regex is valid"));

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn valid_month(month: u32) -> bool {
    (1..=12).contains(&month)
}

/// Converts resume-style dates into the `YYYY-MM` form used by the editor.
///
/// "Jan 2020" and "January 2020" become "2020-01", "01/2020" becomes
/// "2020-01", "2020" stays "2020". Unrecognised input is returned trimmed.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || ISO_RE.is_match(trimmed) {
        return trimmed.to_string();
    }

    if let Some(caps) = MONTH_NAME_YEAR_RE.captures(trimmed) {
        if let Some(month) = month_number(&caps[1]) {
            return format!("{}-{:02}", &caps[2], month);
        }
    }

    if let Some(caps) = MONTH_SLASH_YEAR_RE.captures(trimmed) {
        if let Ok(month) = caps[1].parse::<u32>() {
            if valid_month(month) {
                return format!("{}-{:02}", &caps[2], month);
            }
        }
    }

    if let Some(caps) = YEAR_SLASH_MONTH_RE.captures(trimmed) {
        if let Ok(month) = caps[2].parse::<u32>() {
            if valid_month(month) {
                return format!("{}-{:02}", &caps[1], month);
            }
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(normalize_date("Jan 2020"), "2020-01");
        assert_eq!(normalize_date("September 2019"), "2019-09");
        assert_eq!(normalize_date("Sept. 2019"), "2019-09");
        assert_eq!(normalize_date("dec, 2022"), "2022-12");
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(normalize_date("01/2020"), "2020-01");
        assert_eq!(normalize_date("3/2021"), "2021-03");
        assert_eq!(normalize_date("2021/07"), "2021-07");
        assert_eq!(normalize_date("13/2021"), "13/2021");
    }

    #[test]
    fn test_iso_and_years_pass_through() {
        assert_eq!(normalize_date(" 2020 "), "2020");
        assert_eq!(normalize_date("2020-05"), "2020-05");
        assert_eq!(normalize_date("2020-05-17"), "2020-05-17");
    }

    #[test]
    fn test_unrecognised_is_trimmed() {
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date(" Present "), "Present");
        assert_eq!(normalize_date("Spring 2020"), "Spring 2020");
    }
}
