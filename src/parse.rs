//! Reading dates typed by people: Persian or Arabic-Indic digits, stray bidi
//! marks, and whichever separator the keyboard produced.

use crate::consts::{ARABIC_DIGITS, GREGORIAN_YEAR_THRESHOLD, INPUT_SEPARATORS, PERSIAN_DIGITS};
use crate::prelude::*;
use crate::{CalendarDate, ConvertError, GregorianDate, JalaliDate};

/// Error type for date parsing.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {}", _0)]
    InvalidFormat(String),
    #[display(fmt = "Invalid number: {}", _0)]
    InvalidNumber(String),
    #[display(fmt = "Ambiguous date, cannot tell which field is the year: {}", _0)]
    Ambiguous(String),
    #[display(fmt = "Missing or unknown calendar tag (expected J: or G:): {}", _0)]
    InvalidTag(String),
    #[display(fmt = "{}", _0)]
    Convert(ConvertError),
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Convert(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConvertError> for ParseError {
    fn from(err: ConvertError) -> Self {
        Self::Convert(err)
    }
}

/// Knobs for [`parse_loose_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    gregorian_threshold: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            gregorian_threshold: GREGORIAN_YEAR_THRESHOLD,
        }
    }

    /// Year fields at or above `year` mark the input as Gregorian.
    #[must_use]
    pub const fn gregorian_threshold(mut self, year: i32) -> Self {
        self.gregorian_threshold = year;
        self
    }

    pub const fn threshold(&self) -> i32 {
        self.gregorian_threshold
    }
}

/// Replaces Persian and Arabic-Indic digits with their ASCII equivalents.
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&d| d == c)
                .or_else(|| ARABIC_DIGITS.iter().position(|&d| d == c))
                .and_then(|i| char::from_digit(u32::try_from(i).ok()?, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Removes LRM, RLM, ZWNJ and the bidi embedding/override controls.
pub fn strip_rtl_marks(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200E}' | '\u{200F}' | '\u{200C}' | '\u{202A}'..='\u{202E}'))
        .collect()
}

/// Strips marks, normalizes digits and trims whitespace and quotes.
pub fn clean_input(s: &str) -> String {
    let stripped = strip_rtl_marks(&normalize_digits(s));
    stripped
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim()
        .to_owned()
}

/// Splits cleaned input into exactly three non-empty fields.
fn split_fields(s: &str) -> Result<[&str; 3], ParseError> {
    let parts: Vec<&str> = s.split(INPUT_SEPARATORS).map(str::trim).collect();
    match parts.as_slice() {
        &[a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => Ok([a, b, c]),
        _ => Err(ParseError::InvalidFormat(s.to_owned())),
    }
}

/// Parses an unsigned run of ASCII digits.
fn parse_number(s: &str) -> Result<i32, ParseError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber(s.to_owned()));
    }
    s.parse::<i32>()
        .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
}

fn parse_numbers(fields: [&str; 3]) -> Result<[i32; 3], ParseError> {
    Ok([
        parse_number(fields[0])?,
        parse_number(fields[1])?,
        parse_number(fields[2])?,
    ])
}

/// Parses `year SEP month SEP day` where the year may carry a leading minus sign.
pub(crate) fn parse_year_first(s: &str) -> Result<(i32, i32, i32), ParseError> {
    let cleaned = clean_input(s);
    if cleaned.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let [year, month, day] = parse_numbers(split_fields(rest)?)?;
    let year = if negative { -year } else { year };
    Ok((year, month, day))
}

/// Parses a calendar-tagged date such as `J:1403/01/05` or `g:2024-03-24`.
pub(crate) fn parse_tagged(s: &str) -> Result<CalendarDate, ParseError> {
    let cleaned = clean_input(s);
    if cleaned.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let Some((tag, rest)) = cleaned.split_once(':') else {
        return Err(ParseError::InvalidTag(cleaned.clone()));
    };
    match tag.trim() {
        "J" | "j" => Ok(CalendarDate::Jalali(rest.parse()?)),
        "G" | "g" => Ok(CalendarDate::Gregorian(rest.parse()?)),
        _ => Err(ParseError::InvalidTag(cleaned.clone())),
    }
}

/// Guesses calendar and field order of a free-text date using default options.
///
/// # Errors
/// See [`parse_loose_with`].
pub fn parse_loose(s: &str) -> Result<CalendarDate, ParseError> {
    parse_loose_with(s, &ParseOptions::default())
}

/// Guesses calendar and field order of a free-text date.
///
/// A first or last field at or above the Gregorian threshold makes the date
/// Gregorian, with the year in that position. Otherwise the date is Jalali
/// and the outer field with more digits is the year. Equal digit counts are
/// refused rather than guessed.
///
/// # Errors
/// Returns `ParseError::EmptyInput`, `InvalidFormat` or `InvalidNumber` for
/// unreadable input, `Ambiguous` when the year cannot be located, and
/// `Convert` when the fields do not form a valid date.
pub fn parse_loose_with(s: &str, options: &ParseOptions) -> Result<CalendarDate, ParseError> {
    let cleaned = clean_input(s);
    if cleaned.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let fields = split_fields(&cleaned)?;
    let [first, middle, last] = parse_numbers(fields)?;
    let threshold = options.threshold();

    if first >= threshold {
        debug!("{cleaned:?}: leading year {first} reads as Gregorian");
        return Ok(GregorianDate::from_ymd(first, middle, last)?.into());
    }
    if last >= threshold {
        debug!("{cleaned:?}: trailing year {last} reads as Gregorian");
        return Ok(GregorianDate::from_ymd(last, middle, first)?.into());
    }

    match fields[0].len().cmp(&fields[2].len()) {
        std::cmp::Ordering::Greater => Ok(JalaliDate::from_ymd(first, middle, last)?.into()),
        std::cmp::Ordering::Less => Ok(JalaliDate::from_ymd(last, middle, first)?.into()),
        std::cmp::Ordering::Equal => {
            debug!("{cleaned:?}: refusing to guess the year position");
            Err(ParseError::Ambiguous(cleaned))
        }
    }
}
