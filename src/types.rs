use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, ESFAND, ESFAND_DAYS, ESFAND_DAYS_LEAP, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JALALI_FIRST_HALF_MONTH_DAYS,
    JALALI_SECOND_HALF_MONTH_DAYS, LEAP_YEAR_CYCLE, MAX_MONTH, MIN_DAY,
};
use crate::format::JALALI_MONTHS;
use crate::jalcal::{day_of_year_offset, jal_cal, jal_cal_or_fallback};
use crate::jdn::{checked_jdn_to_gregorian, gregorian_to_jdn, jdn_to_gregorian};
use crate::parse::{self, ParseError};
use crate::prelude::*;
use crate::{ConvertError, jdn_to_jalali};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two calendars this crate converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    Jalali,
    Gregorian,
}

/// A valid date in the Jalali calendar, within the supported year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}/{:02}/{:02}", year, month, day)]
pub struct JalaliDate {
    year: i32,
    month: u8,
    day: u8,
}

/// A valid date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct GregorianDate {
    year: i32,
    month: u8,
    day: u8,
}

/// A date tagged with the calendar it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(tag = "calendar", content = "date", rename_all = "lowercase")]
pub enum CalendarDate {
    #[display(fmt = "{}", _0)]
    Jalali(JalaliDate),
    #[display(fmt = "{}", _0)]
    Gregorian(GregorianDate),
}

/// Narrows raw month/day integers, rejecting anything that cannot be a date field.
fn narrow_fields(
    calendar: Calendar,
    year: i32,
    month: i32,
    day: i32,
) -> Result<(u8, u8), ConvertError> {
    match (u8::try_from(month), u8::try_from(day)) {
        (Ok(m), Ok(d)) => Ok((m, d)),
        _ => Err(ConvertError::invalid_date(calendar, year, month, day)),
    }
}

impl JalaliDate {
    /// Creates a new Jalali date, validating month and day against the year's leap status.
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` if the year is outside the break table,
    /// or `ConvertError::InvalidDate` if the month or day does not exist.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ConvertError> {
        let cal = jal_cal(year)?;
        let invalid = || {
            ConvertError::invalid_date(Calendar::Jalali, year, i32::from(month), i32::from(day))
        };

        if month == 0 || month > MAX_MONTH {
            return Err(invalid());
        }
        if day < MIN_DAY || day > jalali_month_len(cal.is_leap, month) {
            return Err(invalid());
        }

        Ok(Self { year, month, day })
    }

    /// Same as [`JalaliDate::new`] but accepts unnarrowed integers.
    ///
    /// # Errors
    /// See [`JalaliDate::new`].
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<Self, ConvertError> {
        let (m, d) = narrow_fields(Calendar::Jalali, year, month, day)?;
        Self::new(year, m, d)
    }

    /// Builds the date for a Julian Day Number.
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` if the day is outside the supported years.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_jdn(jdn: i64) -> Result<Self, ConvertError> {
        let (year, month, day) = jdn_to_jalali(jdn)?;
        Ok(Self {
            year,
            month: month as u8,
            day: day as u8,
        })
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Returns the English transliteration of the month, e.g. "Farvardin"
    pub const fn month_name(self) -> &'static str {
        JALALI_MONTHS[(self.month - 1) as usize]
    }

    /// Whether this date's year has a 30-day Esfand
    pub fn is_leap_year(self) -> bool {
        jal_cal_or_fallback(self.year).is_leap
    }

    /// Number of days in this date's month
    pub fn days_in_month(self) -> u8 {
        jalali_month_len(self.is_leap_year(), self.month)
    }

    /// 1-based day of the year; 1 Farvardin is day 1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn ordinal(self) -> u16 {
        day_of_year_offset(self.month as i64, self.day as i64) as u16 + 1
    }

    /// Julian Day Number of this date.
    pub fn to_jdn(self) -> i64 {
        // year was checked on construction, so this never takes the fallback
        jal_cal_or_fallback(self.year).nowruz_jdn()
            + day_of_year_offset(i64::from(self.month), i64::from(self.day))
    }

    /// The same day in the proleptic Gregorian calendar.
    pub fn to_gregorian(self) -> GregorianDate {
        GregorianDate::from_jdn_in_range(self.to_jdn())
    }

    /// Moves the date by `days` (negative goes backwards).
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` if the result leaves the supported years.
    pub fn add_days(self, days: i64) -> Result<Self, ConvertError> {
        let jdn = self
            .to_jdn()
            .checked_add(days)
            .ok_or(ConvertError::jdn_overflow(days))?;
        Self::from_jdn(jdn)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        other.to_jdn() - self.to_jdn()
    }
}

impl GregorianDate {
    /// Creates a new Gregorian date, validating month and day.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidDate` if the month or day does not exist.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ConvertError> {
        if month == 0 || month > MAX_MONTH || day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ConvertError::invalid_date(
                Calendar::Gregorian,
                year,
                i32::from(month),
                i32::from(day),
            ));
        }
        Ok(Self { year, month, day })
    }

    /// Same as [`GregorianDate::new`] but accepts unnarrowed integers.
    ///
    /// # Errors
    /// See [`GregorianDate::new`].
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<Self, ConvertError> {
        let (m, d) = narrow_fields(Calendar::Gregorian, year, month, day)?;
        Self::new(year, m, d)
    }

    /// Builds the date for a Julian Day Number.
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` if the year does not fit in an `i32`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_jdn(jdn: i64) -> Result<Self, ConvertError> {
        let (year, month, day) =
            checked_jdn_to_gregorian(jdn).ok_or(ConvertError::jdn_overflow(jdn))?;
        let year = i32::try_from(year).map_err(|_| ConvertError::OutOfRange { year })?;
        Ok(Self {
            year,
            month: month as u8,
            day: day as u8,
        })
    }

    /// Caller guarantees `jdn` comes from a supported Jalali date, whose
    /// Gregorian years all fit in an `i32`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    const fn from_jdn_in_range(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_gregorian(jdn);
        Self {
            year: year as i32,
            month: month as u8,
            day: day as u8,
        }
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    pub const fn is_leap_year(self) -> bool {
        is_leap_year(self.year)
    }

    /// Julian Day Number of this date.
    pub const fn to_jdn(self) -> i64 {
        gregorian_to_jdn(self.year as i64, self.month as i64, self.day as i64)
    }

    /// The same day in the Jalali calendar.
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` if the Jalali year is outside the break table.
    pub fn to_jalali(self) -> Result<JalaliDate, ConvertError> {
        JalaliDate::from_jdn(self.to_jdn())
    }

    /// Moves the date by `days` (negative goes backwards).
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` if the year overflows.
    pub fn add_days(self, days: i64) -> Result<Self, ConvertError> {
        let jdn = self
            .to_jdn()
            .checked_add(days)
            .ok_or(ConvertError::jdn_overflow(days))?;
        Self::from_jdn(jdn)
    }

    /// Signed number of days from `self` to `other`.
    pub const fn days_until(self, other: Self) -> i64 {
        other.to_jdn() - self.to_jdn()
    }
}

impl CalendarDate {
    pub const fn calendar(&self) -> Calendar {
        match self {
            Self::Jalali(_) => Calendar::Jalali,
            Self::Gregorian(_) => Calendar::Gregorian,
        }
    }

    pub fn to_jdn(&self) -> i64 {
        match *self {
            Self::Jalali(date) => date.to_jdn(),
            Self::Gregorian(date) => date.to_jdn(),
        }
    }

    /// Returns the date in the Jalali calendar, converting if needed.
    ///
    /// # Errors
    /// Returns `ConvertError::OutOfRange` for Gregorian dates outside the break table.
    pub fn to_jalali(&self) -> Result<JalaliDate, ConvertError> {
        match *self {
            Self::Jalali(date) => Ok(date),
            Self::Gregorian(date) => date.to_jalali(),
        }
    }

    /// Returns the date in the Gregorian calendar, converting if needed.
    pub fn to_gregorian(&self) -> GregorianDate {
        match *self {
            Self::Jalali(date) => date.to_gregorian(),
            Self::Gregorian(date) => date,
        }
    }
}

impl From<JalaliDate> for GregorianDate {
    fn from(date: JalaliDate) -> Self {
        date.to_gregorian()
    }
}

impl TryFrom<GregorianDate> for JalaliDate {
    type Error = ConvertError;

    fn try_from(date: GregorianDate) -> Result<Self, Self::Error> {
        date.to_jalali()
    }
}

impl From<JalaliDate> for CalendarDate {
    fn from(date: JalaliDate) -> Self {
        Self::Jalali(date)
    }
}

impl From<GregorianDate> for CalendarDate {
    fn from(date: GregorianDate) -> Self {
        Self::Gregorian(date)
    }
}

impl FromStr for JalaliDate {
    type Err = ParseError;

    /// Parses `YYYY/MM/DD` (any accepted separator, Persian digits allowed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse::parse_year_first(s)?;
        Ok(Self::from_ymd(year, month, day)?)
    }
}

impl FromStr for GregorianDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD` (any accepted separator, Persian digits allowed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse::parse_year_first(s)?;
        Ok(Self::from_ymd(year, month, day)?)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses a calendar-tagged date: `J:1403/01/05` or `G:2024-03-24`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_tagged(s)
    }
}

macro_rules! serde_as_string {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_as_string!(JalaliDate);
serde_as_string!(GregorianDate);

// Helper functions

/// Gregorian leap year rule, proleptic for every year including zero and negatives.
pub const fn is_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

/// Days in a Gregorian month.
///
/// # Panics
/// Panics if `month` is not in `1..=12`.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

const fn jalali_month_len(is_leap: bool, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month <= 6 {
        JALALI_FIRST_HALF_MONTH_DAYS
    } else if month < ESFAND {
        JALALI_SECOND_HALF_MONTH_DAYS
    } else if is_leap {
        ESFAND_DAYS_LEAP
    } else {
        ESFAND_DAYS
    }
}

/// Days in a Jalali month.
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if `year` is outside the break table,
/// or `ConvertError::InvalidDate` if `month` is not 1..=12.
pub fn jalali_days_in_month(year: i32, month: u8) -> Result<u8, ConvertError> {
    if month == 0 || month > MAX_MONTH {
        return Err(ConvertError::invalid_date(
            Calendar::Jalali,
            year,
            i32::from(month),
            i32::from(MIN_DAY),
        ));
    }
    Ok(jalali_month_len(jal_cal(year)?.is_leap, month))
}
