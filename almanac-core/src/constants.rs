//! Shared numeric constants.
//!
//! Day counts are measured past 1 January 1 AD; Julian dates follow the usual
//! astronomical convention of noon-based epochs. The ephemeris-time group holds
//! the coefficients of the periodic TDT→TDB correction (IAU 1976 convention):
//!
//! ```text
//! TDB = TDT + K * sin(g + EB * sin(g)),   g = M0 + M1 * t
//! ```

// Calendar cycle lengths in days.
pub const DAYS_PER_YEAR: i32 = 365;
pub const DAYS_PER_4_YEARS: i32 = 1461;
pub const DAYS_PER_100_YEARS: i32 = 36524;
pub const DAYS_PER_400_YEARS: i32 = 146097;

/// Cumulative days before each month in a 365-day year (index 0 = before January).
pub const DAYS_BEFORE_MONTH_365: [i32; 13] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// Cumulative days before each month in a 366-day year.
pub const DAYS_BEFORE_MONTH_366: [i32; 13] =
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

// Time-of-day units.
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_HALF_DAY: i64 = 43200;
pub const SECONDS_PER_DAY: i64 = 86400;
pub const SECONDS_PER_DAY_F64: f64 = 86400.0;

// Julian dates of 1 January 12:00:00 of years 1, 2000 and 2100 AD.
pub const J0001: f64 = 1721426.0;
pub const J2000: f64 = 2451545.0;
pub const J2100: f64 = 2488070.0;

// The same epochs as day counts past 1 January 1 AD.
pub const D0001: i32 = (J0001 - J0001) as i32;
pub const D2000: i32 = (J2000 - J0001) as i32;
pub const D2100: i32 = (J2100 - J0001) as i32;

// Ephemeris time.
/// TDT - TAI in seconds, fixed by definition.
pub const DELTA_TDT: f64 = 32.184;
/// Amplitude of the periodic TDT→TDB correction in seconds.
pub const K: f64 = 0.001657;
/// Eccentricity-like factor of the correction argument.
pub const EB: f64 = 0.01671;
/// Mean-anomaly argument at J2000, radians.
pub const M0: f64 = 6.239996;
/// Mean-anomaly rate, radians per second.
pub const M1: f64 = 1.99096871E-7;

// Earth rotation. Carried for the UT1/TSD chain, whose conversion step is
// declared but not implemented (see almanac-time).
pub const ERA_AT_J2000: f64 = 0.7790572732640;
pub const ERA_RATE: f64 = 1.00273781191135448;
