//! Calendar date helpers shared across the domain.
//!
//! One timezone discipline everywhere: local calendar dates with no
//! time-of-day. Dates cross module boundaries as `YYYY-MM-DD` strings and
//! are parsed into [`NaiveDate`] at the edge.

use chrono::{Datelike, Local, Months, NaiveDate};

/// Parse a strict `YYYY-MM-DD` date. Anything else is `None`, never an
/// error; callers degrade to a placeholder.
pub fn parse_iso(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Format as zero-padded `YYYY-MM-DD`
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `MM/DD` form used for chart tick labels
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// Start of the current local day
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar-correct month addition. When the target month is shorter than
/// the start day-of-month, the day clamps to the end of the target month
/// (Jan 31 + 1 month = Feb 29 in a leap year, Mar 31 + 1 month = Apr 30).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Signed whole days from `from` to `to`; negative when `to` precedes `from`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Elapsed age at `reference` for a child born on `birth`, by calendar-field
/// subtraction: take the year and month components, then borrow a month if
/// the reference day-of-month comes before the birth day-of-month. `None`
/// when the reference precedes the birth date.
///
/// Formats as `"{years}y {months}m"` once a full year has passed, plain
/// `"{months}m"` before that.
pub fn format_age(reference: NaiveDate, birth: NaiveDate) -> Option<String> {
    let mut years = reference.year() - birth.year();
    let mut months = reference.month() as i32 - birth.month() as i32;
    if reference.day() < birth.day() {
        months -= 1;
    }
    while months < 0 {
        years -= 1;
        months += 12;
    }
    if years < 0 {
        return None;
    }
    if years > 0 {
        Some(format!("{}y {}m", years, months))
    } else {
        Some(format!("{}m", months))
    }
}
