//! Consultation number codec.
//!
//! A consultation number is `CS` + 2-digit year + 2-digit month + 2-digit day
//! + 3-digit daily sequence, e.g. `CS241219001` for the first consultation on
//! 2024-12-19. Years are encoded in a fixed 2000-2099 window.

use std::cmp::Ordering;

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would also accept other Unicode digit sets.
static CODE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^CS[0-9]{9}$").unwrap());
static CODE_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CS([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{3})$").unwrap());

/// How far back a consultation number may date and still count as valid.
const MAX_AGE_YEARS: i32 = 10;

const MAX_SEQUENCE: u32 = 999;

/// Decoded form of a consultation number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsultationNumber {
    pub date: NaiveDate,
    pub sequence: u32,
}

/// Render a consultation number for the given day and daily sequence.
///
/// Performs no range validation: the caller owns the 1-999 sequence bound and
/// the 2000-2099 year window. A sequence of 1000 or more widens the 3-digit
/// field instead of truncating; that matches the historical identifiers in
/// production and must not change silently.
pub fn generate(date: NaiveDate, sequence: u32) -> String {
    format!(
        "CS{:02}{:02}{:02}{:03}",
        date.year().rem_euclid(100),
        date.month(),
        date.day(),
        sequence
    )
}

/// Decode a consultation number, or `None` when the input does not match the
/// pattern.
///
/// The year is reconstructed as `2000 + yy`. Digit pairs that do not form a
/// real calendar date (`CS250231001`) are rejected as well; the pattern alone
/// is not enough to name a day.
pub fn parse(code: &str) -> Option<ConsultationNumber> {
    let caps = CODE_PARTS.captures(code)?;
    let yy: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let sequence: u32 = caps[4].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(2000 + yy, month, day)?;
    Some(ConsultationNumber { date, sequence })
}

/// Check a code against today's local date. See [`is_valid_at`].
pub fn is_valid(code: &str) -> bool {
    is_valid_at(code, Local::now().date_naive())
}

/// Full validity check relative to `today`: well-formed, decodable, not dated
/// in the future, at most [`MAX_AGE_YEARS`] old, sequence within 1-999.
///
/// Never panics; every failure is a plain `false`.
pub fn is_valid_at(code: &str, today: NaiveDate) -> bool {
    if !CODE_SHAPE.is_match(code) {
        return false;
    }

    let Some(number) = parse(code) else {
        return false;
    };

    if number.date > today {
        return false;
    }
    if number.date < earliest_valid_date(today) {
        return false;
    }

    (1..=MAX_SEQUENCE).contains(&number.sequence)
}

/// Oldest still-valid consultation date as of `today`.
///
/// A Feb 29 anchor lands on Mar 1 when the target year is not a leap year.
fn earliest_valid_date(today: NaiveDate) -> NaiveDate {
    let year = today.year() - MAX_AGE_YEARS;
    today
        .with_year(year)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).expect("Mar 1 exists in every year"))
}

/// Total order for leaderboard display: most recent consultation first, same
/// days by sequence descending. Entries without a parseable number sort after
/// every entry that has one; two such entries compare equal, so stable sorts
/// keep their input order.
pub fn compare_recent_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse);
    let b = b.and_then(parse);

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.date.cmp(&a.date).then(b.sequence.cmp(&a.sequence)),
    }
}

/// Next daily sequence for `date` given every code already allocated.
///
/// Codes for other days and strings that do not parse are ignored. Returns 1
/// for a fresh day, `max + 1` otherwise - including 1000 on a day that already
/// holds 999 consultations. The missing upper bound is a known quirk of the
/// numbering scheme; callers that care must check before calling [`generate`].
pub fn next_sequence<S: AsRef<str>>(date: NaiveDate, existing_codes: &[S]) -> u32 {
    existing_codes
        .iter()
        .filter_map(|code| parse(code.as_ref()))
        .filter(|number| number.date == date)
        .map(|number| number.sequence)
        .max()
        .map_or(1, |max| max + 1)
}

/// Human-readable rendering: `"2024. 12. 19. (1번)"`. Unparseable input is
/// returned unchanged so display code never has to branch.
pub fn format_display(code: &str) -> String {
    match parse(code) {
        Some(number) => format!(
            "{}. {}. {}. ({}번)",
            number.date.year(),
            number.date.month(),
            number.date.day(),
            number.sequence
        ),
        None => code.to_string(),
    }
}
