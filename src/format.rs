//! Persian-facing display of dates.

use crate::consts::{GREGORIAN_YEAR_THRESHOLD, PERSIAN_DIGITS, PLACEHOLDER};
use crate::parse::{ParseError, clean_input, parse_year_first};
use crate::{GregorianDate, JalaliDate};

/// Jalali months in English.
pub const JALALI_MONTHS: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// Jalali months in Persian.
pub const JALALI_MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// English name of Jalali month `month` (1-based).
pub fn jalali_month_name(month: u8) -> Option<&'static str> {
    JALALI_MONTHS.get(usize::from(month).checked_sub(1)?).copied()
}

/// Persian name of Jalali month `month` (1-based).
pub fn jalali_month_name_fa(month: u8) -> Option<&'static str> {
    JALALI_MONTHS_FA.get(usize::from(month).checked_sub(1)?).copied()
}

/// Replaces ASCII digits with Persian digits, leaving everything else alone.
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// `1403/01/05` written with Persian digits.
pub fn format_jalali_fa(date: JalaliDate) -> String {
    to_persian_digits(&date.to_string())
}

/// `5 Farvardin 1403` written in Persian, e.g. "۵ فروردین ۱۴۰۳".
pub fn format_jalali_long_fa(date: JalaliDate) -> String {
    let month = JALALI_MONTHS_FA[usize::from(date.month() - 1)];
    to_persian_digits(&format!("{} {month} {}", date.day(), date.year()))
}

/// Renders an ISO date (optionally followed by a time) as a Jalali date in Persian digits.
///
/// Years below the Gregorian threshold are assumed to already be Jalali and
/// are only reformatted.
///
/// # Errors
/// Returns a `ParseError` if the input is not a readable, valid date.
pub fn iso_to_jalali_fa(iso: &str) -> Result<String, ParseError> {
    let cleaned = clean_input(iso);
    let date_part = cleaned
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    let (year, month, day) = parse_year_first(date_part)?;

    let jalali = if year < GREGORIAN_YEAR_THRESHOLD {
        JalaliDate::from_ymd(year, month, day)?
    } else {
        GregorianDate::from_ymd(year, month, day)?.to_jalali()?
    };
    Ok(format_jalali_fa(jalali))
}

/// Display helper: any date-ish string becomes a Persian Jalali date, and
/// anything unreadable becomes [`PLACEHOLDER`].
#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
pub fn fmt_date_fa(value: &str) -> String {
    iso_to_jalali_fa(value).unwrap_or_else(|err| {
        trace!("cannot display {value:?} as a date: {err}");
        PLACEHOLDER.to_owned()
    })
}
