/// Jalali years at which the 33-year leap pattern resets.
/// Strictly increasing; the supported range is `JALALI_BREAKS[0]..JALALI_BREAKS[19]`.
pub const JALALI_BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Smallest supported Jalali year (inclusive)
pub const MIN_JALALI_YEAR: i32 = JALALI_BREAKS[0];

/// Largest supported Jalali year (exclusive)
pub const MAX_JALALI_YEAR_EXCLUSIVE: i32 = JALALI_BREAKS[JALALI_BREAKS.len() - 1];

/// Jalali year `jy` begins in Gregorian year `jy + JALALI_EPOCH_OFFSET`
pub const JALALI_EPOCH_OFFSET: i32 = 621;

/// Maximum valid month in both calendars
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for March (Nowruz always falls in it)
pub const MARCH: u8 = 3;
/// Month number for Esfand, the last Jalali month
pub const ESFAND: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in each of Farvardin..Shahrivar
pub const JALALI_FIRST_HALF_MONTH_DAYS: u8 = 31;
/// Days in each of Mehr..Bahman
pub const JALALI_SECOND_HALF_MONTH_DAYS: u8 = 30;
/// Days in Esfand of a common year
pub const ESFAND_DAYS: u8 = 29;
/// Days in Esfand of a leap year
pub const ESFAND_DAYS_LEAP: u8 = 30;
/// Number of days in the first six (31-day) Jalali months
pub const JALALI_FIRST_HALF_DAYS: i64 = 186;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Years at or above this are taken to be Gregorian when parsing free text
pub const GREGORIAN_YEAR_THRESHOLD: i32 = 1700;

/// Every separator accepted by the free-text parser
pub const INPUT_SEPARATORS: [char; 4] = ['/', '-', '.', '\u{066B}'];

/// Extended Arabic-Indic (Persian) digits, zero through nine
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
/// Arabic-Indic digits, zero through nine
pub const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Shown in place of a date that could not be read
pub const PLACEHOLDER: &str = "—";
