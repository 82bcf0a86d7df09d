//! Conversion between the Jalali (Persian, solar Hijri) calendar and the
//! proleptic Gregorian calendar.
//!
//! Both calendars are mapped onto Julian Day Numbers independently, so each
//! direction is a pair of JDN conversions:
//!
//! ```
//! use jalali_date::{gregorian_to_jalali, jalali_to_gregorian};
//!
//! assert_eq!(jalali_to_gregorian(1403, 1, 1), Ok((2024, 3, 20)));
//! assert_eq!(gregorian_to_jalali(2024, 3, 20), Ok((1403, 1, 1)));
//! ```

#[macro_use]
mod logging;

mod consts;
pub mod format;
pub mod jalcal;
pub mod jdn;
pub mod parse;
mod prelude;
mod types;

pub use consts::*;
pub use jalcal::{
    JalCal, is_jalali_leap_year, is_supported_jalali_year, jal_cal, jal_cal_or_fallback,
};
pub use parse::{ParseError, ParseOptions, parse_loose};
pub use types::{
    Calendar, CalendarDate, GregorianDate, JalaliDate, days_in_month, is_leap_year,
    jalali_days_in_month,
};

use crate::jalcal::day_of_year_offset;
use crate::jdn::checked_jdn_to_gregorian;

/// Error type for calendar conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ConvertError {
    /// Month or day does not exist in the given calendar and year.
    #[error("Invalid {calendar} date: {year}/{month:02}/{day:02}")]
    InvalidDate {
        calendar: Calendar,
        year: i32,
        month: i32,
        day: i32,
    },

    /// Jalali year is outside the leap break table.
    #[error(
        "Jalali year {year} is out of supported range ({min} to {max})",
        min = MIN_JALALI_YEAR,
        max = MAX_JALALI_YEAR_EXCLUSIVE - 1
    )]
    OutOfRange { year: i64 },
}

impl ConvertError {
    /// `OutOfRange` for a day count that left the `i64` JDN range in the
    /// direction of `sign`.
    pub(crate) const fn jdn_overflow(sign: i64) -> Self {
        Self::OutOfRange {
            year: if sign < 0 { i64::MIN } else { i64::MAX },
        }
    }

    pub(crate) const fn invalid_date(calendar: Calendar, year: i32, month: i32, day: i32) -> Self {
        Self::InvalidDate {
            calendar,
            year,
            month,
            day,
        }
    }
}

/// Converts a Jalali date to its Julian Day Number.
///
/// Only the year is checked. Month and day are applied as offsets from
/// Nowruz, so `(1403, 7, 31)` quietly yields the JDN of 1403/08/01.
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if `jy` is outside the break table.
pub fn jalali_to_jdn(jy: i32, jm: i32, jd: i32) -> Result<i64, ConvertError> {
    let cal = jal_cal(jy)?;
    Ok(cal.nowruz_jdn() + day_of_year_offset(i64::from(jm), i64::from(jd)))
}

/// Converts a Julian Day Number to a Jalali `(year, month, day)`.
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if the day falls outside the years
/// covered by the break table.
#[allow(clippy::cast_possible_truncation)]
pub fn jdn_to_jalali(jdn: i64) -> Result<(i32, i32, i32), ConvertError> {
    let (gy, _, _) = checked_jdn_to_gregorian(jdn).ok_or(ConvertError::jdn_overflow(jdn))?;
    let candidate = gy - i64::from(JALALI_EPOCH_OFFSET);
    let mut jy =
        i32::try_from(candidate).map_err(|_| ConvertError::OutOfRange { year: candidate })?;

    // Early in the Gregorian year the day may still belong to the last supported year
    if !is_supported_jalali_year(jy) && jy.checked_sub(1).is_some_and(is_supported_jalali_year) {
        jy -= 1;
    }

    let mut cal = jal_cal(jy)?;
    let mut nowruz = cal.nowruz_jdn();
    if jdn < nowruz {
        jy -= 1;
        cal = jal_cal(jy)?;
        nowruz = cal.nowruz_jdn();
    }

    let mut k = jdn - nowruz;
    let year_len = 365 + i64::from(cal.is_leap);
    if k >= year_len {
        return Err(ConvertError::OutOfRange {
            year: i64::from(jy) + 1,
        });
    }

    let (month, day) = if k < JALALI_FIRST_HALF_DAYS {
        (1 + k / 31, k % 31 + 1)
    } else {
        k -= JALALI_FIRST_HALF_DAYS;
        (7 + k / 30, k % 30 + 1)
    };

    Ok((jy, month as i32, day as i32))
}

/// Converts a Jalali date to a proleptic Gregorian `(year, month, day)`.
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if `jy` is outside the break table and
/// `ConvertError::InvalidDate` if the month or day does not exist in that year.
pub fn jalali_to_gregorian(jy: i32, jm: i32, jd: i32) -> Result<(i32, i32, i32), ConvertError> {
    let date = JalaliDate::from_ymd(jy, jm, jd)?.to_gregorian();
    Ok((date.year(), i32::from(date.month()), i32::from(date.day())))
}

/// Converts a proleptic Gregorian date to a Jalali `(year, month, day)`.
///
/// # Errors
/// Returns `ConvertError::InvalidDate` if the Gregorian date does not exist
/// and `ConvertError::OutOfRange` if its Jalali year is outside the break table.
pub fn gregorian_to_jalali(gy: i32, gm: i32, gd: i32) -> Result<(i32, i32, i32), ConvertError> {
    let date = GregorianDate::from_ymd(gy, gm, gd)?.to_jalali()?;
    Ok((date.year(), i32::from(date.month()), i32::from(date.day())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jdn::gregorian_to_jdn;

    #[test]
    fn test_nowruz_1403() {
        assert_eq!(jalali_to_gregorian(1403, 1, 1), Ok((2024, 3, 20)));
        assert_eq!(gregorian_to_jalali(2024, 3, 20), Ok((1403, 1, 1)));
    }

    #[test]
    fn test_known_dates() {
        struct TestCase {
            jalali: (i32, i32, i32),
            gregorian: (i32, i32, i32),
            description: &'static str,
        }

        let cases = [
            TestCase {
                jalali: (1403, 12, 30),
                gregorian: (2025, 3, 20),
                description: "leap day of 1403",
            },
            TestCase {
                jalali: (1404, 1, 1),
                gregorian: (2025, 3, 21),
                description: "Nowruz 1404",
            },
            TestCase {
                jalali: (1399, 12, 30),
                gregorian: (2021, 3, 20),
                description: "leap day of 1399",
            },
            TestCase {
                jalali: (1357, 11, 22),
                gregorian: (1979, 2, 11),
                description: "mid-Bahman",
            },
            TestCase {
                jalali: (1402, 6, 31),
                gregorian: (2023, 9, 22),
                description: "last day of the 31-day months",
            },
            TestCase {
                jalali: (1402, 7, 1),
                gregorian: (2023, 9, 23),
                description: "first day of Mehr",
            },
            TestCase {
                jalali: (1, 1, 1),
                gregorian: (622, 3, 22),
                description: "first day of the era",
            },
        ];

        for case in &cases {
            let (jy, jm, jd) = case.jalali;
            let (gy, gm, gd) = case.gregorian;
            assert_eq!(
                jalali_to_gregorian(jy, jm, jd),
                Ok(case.gregorian),
                "{}",
                case.description
            );
            assert_eq!(
                gregorian_to_jalali(gy, gm, gd),
                Ok(case.jalali),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_month_lengths_enforced() {
        assert_eq!(jalali_to_gregorian(1402, 7, 30), Ok((2023, 10, 22)));
        assert!(matches!(
            jalali_to_gregorian(1402, 7, 31),
            Err(ConvertError::InvalidDate {
                calendar: Calendar::Jalali,
                month: 7,
                day: 31,
                ..
            })
        ));
        assert!(jalali_to_gregorian(1402, 12, 30).is_err());
        assert!(jalali_to_gregorian(1403, 12, 30).is_ok());
        assert!(jalali_to_gregorian(1403, 13, 1).is_err());
        assert!(jalali_to_gregorian(1403, 0, 1).is_err());
        assert!(jalali_to_gregorian(1403, 1, 0).is_err());
        assert!(jalali_to_gregorian(1403, -1, 300).is_err());
    }

    #[test]
    fn test_invalid_gregorian_rejected() {
        assert!(matches!(
            gregorian_to_jalali(2023, 2, 29),
            Err(ConvertError::InvalidDate {
                calendar: Calendar::Gregorian,
                ..
            })
        ));
        assert!(gregorian_to_jalali(2024, 13, 1).is_err());
        assert!(gregorian_to_jalali(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_out_of_range_years() {
        assert!(matches!(
            jalali_to_gregorian(3178, 1, 1),
            Err(ConvertError::OutOfRange { year: 3178 })
        ));
        assert!(matches!(
            jalali_to_gregorian(-62, 1, 1),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            gregorian_to_jalali(100, 1, 1),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            gregorian_to_jalali(5000, 1, 1),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        for gy in [i32::MIN, i32::MIN + 621, i32::MIN + 622, i32::MAX] {
            assert!(
                matches!(
                    gregorian_to_jalali(gy, 6, 1),
                    Err(ConvertError::OutOfRange { .. })
                ),
                "{gy}"
            );
        }
        assert!(matches!(
            jalali_to_gregorian(i32::MIN, 1, 1),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            jalali_to_gregorian(i32::MAX, 1, 1),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_jdn_to_jalali_extremes() {
        assert_eq!(
            jdn_to_jalali(i64::MAX),
            Err(ConvertError::OutOfRange { year: i64::MAX })
        );
        assert!(matches!(
            jdn_to_jalali(i64::MIN),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_last_supported_year_reachable() {
        let jdn = jalali_to_jdn(3177, 12, 29).unwrap();
        assert_eq!(jdn_to_jalali(jdn), Ok((3177, 12, 29)));
        assert_eq!(jdn_to_jalali(jdn - 400).map(|(y, ..)| y), Ok(3176));
    }

    #[test]
    fn test_first_supported_year_reachable() {
        let jdn = jalali_to_jdn(-61, 1, 1).unwrap();
        assert_eq!(jdn_to_jalali(jdn), Ok((-61, 1, 1)));
        assert!(jdn_to_jalali(jdn - 1).is_err());
    }

    #[test]
    fn test_jdn_monotonic_within_month() {
        for jm in 1..=12 {
            let mut prev = jalali_to_jdn(1403, jm, 1).unwrap();
            for jd in 2..=29 {
                let next = jalali_to_jdn(1403, jm, jd).unwrap();
                assert_eq!(next, prev + 1, "1403/{jm}/{jd}");
                prev = next;
            }
        }
    }

    #[test]
    fn test_unvalidated_offset_spills_over() {
        assert_eq!(jalali_to_jdn(1403, 7, 31), jalali_to_jdn(1403, 8, 1));
    }

    #[test]
    fn test_jdn_pivot_agrees_with_gregorian() {
        let jdn = gregorian_to_jdn(2024, 3, 20);
        assert_eq!(jalali_to_jdn(1403, 1, 1), Ok(jdn));
        assert_eq!(jdn_to_jalali(jdn), Ok((1403, 1, 1)));
    }

    #[test]
    fn test_error_messages() {
        let err = jalali_to_gregorian(1402, 12, 30).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Jalali date: 1402/12/30");

        let err = jalali_to_gregorian(4000, 1, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Jalali year 4000 is out of supported range (-61 to 3177)"
        );
    }
}
