//! Parsers for the free-form text found on marketplace job cards.
//!
//! Budgets and posted times arrive as loosely structured strings such as
//! `"$1,500"`, `"$35-$60/hr"` or `"2 hours ago"`. Every parser here returns
//! `None` when nothing usable is found; none of them can fail.

use regex::Regex;
use std::sync::LazyLock;

/// Dollar amount with an optional two-digit cents part.
static BUDGET_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?(\d+(?:\.\d{2})?)").expect("budget pattern is valid"));

/// Any decimal number.
static HOURLY_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?(\d+(?:\.\d+)?)").expect("hourly pattern is valid"));

/// Units recognised in posted-time strings and their length in minutes.
///
/// Order matters: the first unit whose pattern matches wins.
const AGE_UNITS: [(&str, f64); 5] = [
    ("minute", 1.0),
    ("hour", 60.0),
    ("day", 60.0 * 24.0),
    ("week", 60.0 * 24.0 * 7.0),
    ("month", 60.0 * 24.0 * 30.0),
];

static AGE_PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    AGE_UNITS
        .iter()
        .map(|(unit, minutes)| {
            let pattern = Regex::new(&format!(r"(\d+)\s*{unit}")).expect("age pattern is valid");
            (pattern, *minutes)
        })
        .collect()
});

fn strip_thousands(text: &str) -> String {
    text.replace(',', "")
}

fn first_capture(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse the first monetary amount from a fixed-price budget string.
///
/// `"$1,500"` gives `1500.0`, `"$99.50"` gives `99.5`.
pub fn parse_budget_amount(text: &str) -> Option<f64> {
    first_capture(&BUDGET_AMOUNT, &strip_thousands(text))
}

/// Parse the first number from an hourly-rate string.
///
/// For a range such as `"$35-$60/hr"` this is the lower bound.
pub fn parse_hourly_amount(text: &str) -> Option<f64> {
    first_capture(&HOURLY_AMOUNT, &strip_thousands(text))
}

/// Convert a relative posted-time string ("3 days ago") into hours.
pub fn parse_age_hours(text: &str) -> Option<f64> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    AGE_PATTERNS.iter().find_map(|(pattern, minutes_per_unit)| {
        first_capture(pattern, &normalized).map(|quantity| quantity * minutes_per_unit / 60.0)
    })
}
