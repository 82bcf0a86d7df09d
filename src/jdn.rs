//! Proleptic Gregorian calendar ↔ Julian Day Number arithmetic.
//!
//! Nothing here validates its input. A month of 13 still produces a JDN, it
//! just isn't one that corresponds to a real calendar date. Use
//! [`GregorianDate`](crate::GregorianDate) when the input needs checking.

/// Julian Day Number of 0001-01-01 (proleptic Gregorian).
pub const JDN_GREGORIAN_YEAR_ONE: i64 = 1_721_426;

/// Offset that moves the year origin to 4801 BCE so the cycle arithmetic stays non-negative.
const YEAR_SHIFT: i64 = 4800;
const DAYS_PER_400_YEARS: i64 = 146_097;
const DAYS_PER_100_YEARS: i64 = 36_524;
const DAYS_PER_4_YEARS: i64 = 1461;
const DAYS_PER_YEAR: i64 = 365;

/// Converts a proleptic Gregorian date to its Julian Day Number.
///
/// Months are counted from March so that the leap day lands at the end of
/// the computational year.
pub const fn gregorian_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    let a = (14 - month).div_euclid(12);
    let y = year + YEAR_SHIFT - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + DAYS_PER_YEAR * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Shift applied before the cycle decomposition in [`jdn_to_gregorian`].
const JDN_SHIFT: i64 = 32044;

/// Converts a Julian Day Number back to a proleptic Gregorian `(year, month, day)`.
///
/// Exact inverse of [`gregorian_to_jdn`] for every valid date.
///
/// # Panics
/// Overflows (panicking in debug builds) for `jdn` within 32044 days of
/// `i64::MAX`. Use [`checked_jdn_to_gregorian`] for untrusted input.
pub const fn jdn_to_gregorian(jdn: i64) -> (i64, i64, i64) {
    let j = jdn + JDN_SHIFT;
    let g = j.div_euclid(DAYS_PER_400_YEARS);
    let dg = j.rem_euclid(DAYS_PER_400_YEARS);
    let c = (dg / DAYS_PER_100_YEARS + 1) * 3 / 4;
    let dc = dg - c * DAYS_PER_100_YEARS;
    let b = dc / DAYS_PER_4_YEARS;
    let db = dc % DAYS_PER_4_YEARS;
    let a = (db / DAYS_PER_YEAR + 1) * 3 / 4;
    let da = db - a * DAYS_PER_YEAR;
    let y = g * 400 + c * 100 + b * 4 + a;
    // m is March-based: 0 = March .. 11 = February
    let m = (5 * da + 308) / 153 - 2;
    let d = da - (m + 4) * 153 / 5 + 122;

    let year = y - YEAR_SHIFT + (m + 2) / 12;
    let month = (m + 2) % 12 + 1;
    (year, month, d + 1)
}

/// Like [`jdn_to_gregorian`], but `None` where the arithmetic would overflow.
pub const fn checked_jdn_to_gregorian(jdn: i64) -> Option<(i64, i64, i64)> {
    if jdn > i64::MAX - JDN_SHIFT {
        return None;
    }
    Some(jdn_to_gregorian(jdn))
}
