//! Astronomical time handling: scales, calendar conversion and leap seconds.
//!
//! The central type is [`Time`], a `(day, time-of-day, scale)` triple counting
//! days past 1 January 1 AD. Conversion between scales is forward-only along
//! two chains:
//!
//! ```text
//! UTC → TAI → TDT → TDB      (atomic chain, leap-second aware)
//! UT1 → UTC → TSD            (Earth rotation chain)
//! ```
//!
//! UTC→TAI needs the cumulative TAI-UTC offset, so the atomic conversion takes
//! an explicit [`LeapSecondTable`] rather than consulting any global state.

pub mod calendar;
pub mod leap;
pub mod scale;
pub mod time;

pub use calendar::{CalendarDate, JulianDay};
pub use leap::LeapSecondTable;
pub use scale::TimeScale;
pub use time::Time;

use thiserror::Error;

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("time scale {0} is not part of this conversion chain")]
    InvalidScale(TimeScale),

    #[error("backward transformation from {from} to {to} is not supported")]
    BackwardTransformation { from: TimeScale, to: TimeScale },

    #[error("conversion from {from} to {to} is not supported")]
    UnsupportedConversion { from: TimeScale, to: TimeScale },

    #[error("invalid date component: {0}")]
    InvalidDate(String),

    #[error("invalid time component: {0}")]
    InvalidTime(String),

    #[error("leap second table line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
