use serde::{Deserialize, Serialize};

use crate::{
    consts::{JALALI_BREAKS, JALALI_EPOCH_OFFSET, MARCH, MAX_JALALI_YEAR_EXCLUSIVE, MIN_JALALI_YEAR},
    jdn::gregorian_to_jdn,
    ConvertError,
};

/// Full and partial 33-year cycles, in years
const CYCLE_YEARS: i32 = 33;
/// Leap years per full 33-year cycle
const LEAPS_PER_CYCLE: i32 = 8;
/// March day Nowruz would fall on with no accumulated drift
const BASE_MARCH_DAY: i32 = 20;

/// Where a Jalali year sits relative to the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JalCal {
    /// Gregorian year containing the March equinox that starts the Jalali year
    pub gregorian_year: i32,
    /// Day of March on which Nowruz (1 Farvardin) falls
    pub march_day: i32,
    /// Whether Esfand has 30 days this year
    pub is_leap: bool,
}

impl JalCal {
    /// Julian Day Number of 1 Farvardin of this year.
    pub const fn nowruz_jdn(&self) -> i64 {
        gregorian_to_jdn(
            self.gregorian_year as i64,
            MARCH as i64,
            self.march_day as i64,
        )
    }
}

/// Zero-based day of the Jalali year for month `jm`, day `jd`.
///
/// Months 1..=6 contribute 31 days each and months 7..=11 contribute 30.
pub(crate) const fn day_of_year_offset(jm: i64, jd: i64) -> i64 {
    (jm - 1) * 31 - jm.div_euclid(7) * (jm - 7) + jd - 1
}

/// Returns `true` if `jy` lies inside the leap break table.
pub const fn is_supported_jalali_year(jy: i32) -> bool {
    jy >= MIN_JALALI_YEAR && jy < MAX_JALALI_YEAR_EXCLUSIVE
}

/// Computes the Gregorian anchor and leap status of Jalali year `jy`.
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if `jy` is outside the break table.
pub fn jal_cal(jy: i32) -> Result<JalCal, ConvertError> {
    if !is_supported_jalali_year(jy) {
        return Err(ConvertError::OutOfRange {
            year: i64::from(jy),
        });
    }

    let gy = jy + JALALI_EPOCH_OFFSET;
    let mut leap_j = -14;
    let mut jp = JALALI_BREAKS[0];
    let mut jump = 0;

    for &jm in &JALALI_BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / CYCLE_YEARS * LEAPS_PER_CYCLE + (jump % CYCLE_YEARS) / 4;
        jp = jm;
    }

    let mut n = jy - jp;

    // leap days since the last break point
    leap_j += n / CYCLE_YEARS * LEAPS_PER_CYCLE + (n % CYCLE_YEARS + 3) / 4;
    if jump % CYCLE_YEARS == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march_day = BASE_MARCH_DAY + leap_j - leap_g;

    // the last few years of a short cycle belong to the next one
    if jump - n < 6 {
        n = n - jump + (jump + 4) / CYCLE_YEARS * CYCLE_YEARS;
    }
    let is_leap = ((n + 1) % CYCLE_YEARS - 1).rem_euclid(4) == 0;

    trace!("jal_cal({jy}): gy={gy} march={march_day} leap={is_leap}");

    Ok(JalCal {
        gregorian_year: gy,
        march_day,
        is_leap,
    })
}

/// Like [`jal_cal`], but degrades to "Nowruz on March 20, common year" for
/// years outside the break table instead of failing.
///
/// The result for unsupported years is only an approximation and may be off
/// by a day.
pub fn jal_cal_or_fallback(jy: i32) -> JalCal {
    jal_cal(jy).unwrap_or_else(|_| {
        warn!("Jalali year {jy} is outside the leap break table, assuming Nowruz on March 20");
        JalCal {
            gregorian_year: jy.saturating_add(JALALI_EPOCH_OFFSET),
            march_day: BASE_MARCH_DAY,
            is_leap: false,
        }
    })
}

/// Returns whether Jalali year `jy` is a leap year (Esfand has 30 days).
///
/// # Errors
/// Returns `ConvertError::OutOfRange` if `jy` is outside the break table.
pub fn is_jalali_leap_year(jy: i32) -> Result<bool, ConvertError> {
    jal_cal(jy).map(|cal| cal.is_leap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaks_strictly_increasing() {
        for pair in JALALI_BREAKS.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_jal_cal_1403() {
        let cal = jal_cal(1403).unwrap();
        assert_eq!(
            cal,
            JalCal {
                gregorian_year: 2024,
                march_day: 20,
                is_leap: true,
            }
        );
    }

    #[test]
    fn test_leap_years_around_present() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            march_day: i32,
        }

        let cases = [
            TestCase {
                year: 1395,
                is_leap: true,
                march_day: 20,
            },
            TestCase {
                year: 1398,
                is_leap: false,
                march_day: 21,
            },
            TestCase {
                year: 1399,
                is_leap: true,
                march_day: 20,
            },
            TestCase {
                year: 1400,
                is_leap: false,
                march_day: 21,
            },
            TestCase {
                year: 1402,
                is_leap: false,
                march_day: 21,
            },
            TestCase {
                year: 1404,
                is_leap: false,
                march_day: 21,
            },
            TestCase {
                year: 1408,
                is_leap: true,
                march_day: 20,
            },
        ];

        for case in &cases {
            let cal = jal_cal(case.year).unwrap();
            assert_eq!(cal.is_leap, case.is_leap, "leap status of {}", case.year);
            assert_eq!(cal.march_day, case.march_day, "Nowruz of {}", case.year);
            assert_eq!(cal.gregorian_year, case.year + 621);
        }
    }

    #[test]
    fn test_eight_leaps_in_a_regular_cycle() {
        // 1210 starts a long run of regular 33-year cycles
        let leaps = (1210..1243)
            .filter(|&y| is_jalali_leap_year(y).unwrap())
            .count();
        assert_eq!(leaps, 8);
    }

    #[test]
    fn test_table_bounds() {
        assert!(jal_cal(MIN_JALALI_YEAR).is_ok());
        assert!(jal_cal(MAX_JALALI_YEAR_EXCLUSIVE - 1).is_ok());
        assert!(matches!(
            jal_cal(MIN_JALALI_YEAR - 1),
            Err(ConvertError::OutOfRange { year: -62 })
        ));
        assert!(matches!(
            jal_cal(MAX_JALALI_YEAR_EXCLUSIVE),
            Err(ConvertError::OutOfRange { year: 3178 })
        ));
    }

    #[test]
    fn test_fallback_only_applies_out_of_range() {
        assert_eq!(jal_cal_or_fallback(1403), jal_cal(1403).unwrap());

        let cal = jal_cal_or_fallback(4000);
        assert_eq!(cal.gregorian_year, 4621);
        assert_eq!(cal.march_day, 20);
        assert!(!cal.is_leap);
    }

    #[test]
    fn test_nowruz_jdn_matches_gregorian() {
        let cal = jal_cal(1403).unwrap();
        assert_eq!(cal.nowruz_jdn(), gregorian_to_jdn(2024, 3, 20));
    }
}
