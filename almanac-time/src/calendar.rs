//! Calendar and Julian date conversion.
//!
//! Both formats convert to the continuous day count used by [`Time`]: days
//! past 1 January 1 AD in the proleptic Gregorian calendar. The calendar
//! arithmetic works in 400/100/4/1-year cycles so it stays exact over the
//! whole supported range.

use crate::scale::TimeScale;
use crate::time::Time;
use crate::{TimeError, TimeResult};
use almanac_core::constants::{
    DAYS_BEFORE_MONTH_365, DAYS_BEFORE_MONTH_366, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS,
    DAYS_PER_4_YEARS, DAYS_PER_YEAR, J0001, SECONDS_PER_DAY, SECONDS_PER_DAY_F64,
    SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use almanac_core::math::div_rem_floor;

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_before_month(year: i32) -> &'static [i32; 13] {
    if is_leap_year(year) {
        &DAYS_BEFORE_MONTH_366
    } else {
        &DAYS_BEFORE_MONTH_365
    }
}

/// A proleptic Gregorian calendar date with time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: f64,
}

impl CalendarDate {
    /// A date at midnight. Fails on out-of-range components.
    pub fn new(year: i32, month: i32, day: i32) -> TimeResult<Self> {
        Self::with_time(year, month, day, 0, 0, 0.0)
    }

    /// A date with time of day. A second value of 60 is accepted only at
    /// 23:59, the slot where positive leap seconds occur.
    pub fn with_time(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: f64,
    ) -> TimeResult<Self> {
        if year < 1 || !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate(format!(
                "year {} month {}",
                year, month
            )));
        }
        let before = days_before_month(year);
        let month_length = before[month as usize] - before[month as usize - 1];
        if day < 1 || day > month_length {
            return Err(TimeError::InvalidDate(format!(
                "day {} of {}-{:02}",
                day, year, month
            )));
        }
        if !(0..=23).contains(&hour)
            || !(0..=59).contains(&minute)
            || !(0.0..=60.0).contains(&second)
            || (second > 59.0 && (minute < 59 || hour < 23))
        {
            return Err(TimeError::InvalidTime(format!(
                "{:02}:{:02}:{}",
                hour, minute, second
            )));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// The continuous day count and time of day as a [`Time`] on `scale`.
    pub fn to_time(&self, scale: TimeScale) -> Time {
        let y = self.year - 1;
        let before = days_before_month(self.year);

        let day = 365 * y + y / 4 - y / 100 + y / 400
            + before[self.month as usize - 1]
            + (self.day - 1);
        let time_of_day = (self.hour as i64 * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE) as f64
            + self.second;

        Time::new(day, time_of_day, scale)
    }

    /// Rebuilds calendar components from a [`Time`].
    pub fn from_time(time: &Time) -> Self {
        let mut day = time.day();

        let y400 = day / DAYS_PER_400_YEARS;
        day -= y400 * DAYS_PER_400_YEARS;
        let y100 = (day / DAYS_PER_100_YEARS).min(3);
        day -= y100 * DAYS_PER_100_YEARS;
        let y4 = (day / DAYS_PER_4_YEARS).min(24);
        day -= y4 * DAYS_PER_4_YEARS;
        let y1 = (day / DAYS_PER_YEAR).min(3);
        day -= y1 * DAYS_PER_YEAR;
        let year = y400 * 400 + y100 * 100 + y4 * 4 + y1 + 1;

        // 1-based day of year, then walk the month table.
        let day_of_year = day + 1;
        let before = days_before_month(year);
        let mut month = ((day_of_year >> 5) + 1) as usize;
        while day_of_year > before[month] {
            month += 1;
        }
        let day_of_month = day_of_year - before[month - 1];

        let mut time_of_day = time.time_of_day();
        let hour = (time_of_day / SECONDS_PER_HOUR as f64) as i32;
        time_of_day -= (hour as i64 * SECONDS_PER_HOUR) as f64;
        let minute = (time_of_day / SECONDS_PER_MINUTE as f64) as i32;
        time_of_day -= (minute as i64 * SECONDS_PER_MINUTE) as f64;

        Self {
            year,
            month: month as i32,
            day: day_of_month,
            hour,
            minute,
            second: time_of_day,
        }
    }
}

/// A Julian day number.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDay(pub f64);

impl JulianDay {
    /// Splits the Julian day into the internal day count and time of day.
    ///
    /// Julian days start at noon, so the conversion anchors to the midnight
    /// preceding `J0001`.
    pub fn to_time(&self, scale: TimeScale) -> Time {
        let julian_seconds = (self.0 - (J0001 - 0.5)) * SECONDS_PER_DAY_F64;
        let (day, time_of_day) = div_rem_floor(julian_seconds, SECONDS_PER_DAY);
        Time::new(day as i32, time_of_day, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::constants::{D2000, J2000};

    #[test]
    fn j2000_calendar_date() {
        let date = CalendarDate::with_time(2000, 1, 1, 12, 0, 0.0).unwrap();
        let time = date.to_time(TimeScale::Tdb);
        assert_eq!(time.day(), D2000);
        assert_eq!(time.time_of_day(), 43200.0);
    }

    #[test]
    fn first_day_of_era() {
        let date = CalendarDate::new(1, 1, 1).unwrap();
        assert_eq!(date.to_time(TimeScale::Utc).day(), 0);
    }

    #[test]
    fn julian_day_matches_calendar() {
        let from_jd = JulianDay(J2000).to_time(TimeScale::Tdb);
        let from_calendar = CalendarDate::with_time(2000, 1, 1, 12, 0, 0.0)
            .unwrap()
            .to_time(TimeScale::Tdb);
        assert_eq!(from_jd.day(), from_calendar.day());
        assert!((from_jd.time_of_day() - from_calendar.time_of_day()).abs() < 1e-6);
    }

    #[test]
    fn julian_half_day_starts_a_new_day() {
        let time = JulianDay(J2000 + 0.5).to_time(TimeScale::Tdb);
        assert_eq!(time.day(), D2000 + 1);
        assert!(time.time_of_day().abs() < 1e-6);
    }

    #[test]
    fn round_trip_through_time() {
        let cases = [
            (1972, 1, 1),
            (1999, 12, 31),
            (2000, 2, 29),
            (2016, 12, 31),
            (2100, 3, 1),
            (1, 1, 1),
            (400, 12, 31),
        ];
        for (year, month, day) in cases {
            let date = CalendarDate::new(year, month, day).unwrap();
            let back = CalendarDate::from_time(&date.to_time(TimeScale::Utc));
            assert_eq!((back.year, back.month, back.day), (year, month, day));
        }
    }

    #[test]
    fn time_of_day_components_round_trip() {
        let date = CalendarDate::with_time(2017, 6, 15, 23, 59, 30.5).unwrap();
        let back = CalendarDate::from_time(&date.to_time(TimeScale::Utc));
        assert_eq!(back.hour, 23);
        assert_eq!(back.minute, 59);
        assert!((back.second - 30.5).abs() < 1e-9);
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2016));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2017));
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(CalendarDate::new(0, 1, 1).is_err());
        assert!(CalendarDate::new(2017, 13, 1).is_err());
        assert!(CalendarDate::new(2017, 2, 29).is_err());
        assert!(CalendarDate::with_time(2017, 1, 1, 24, 0, 0.0).is_err());
        assert!(CalendarDate::with_time(2017, 1, 1, 0, 60, 0.0).is_err());
        // Leap second slot only at 23:59.
        assert!(CalendarDate::with_time(2017, 1, 1, 12, 30, 60.0).is_err());
        assert!(CalendarDate::with_time(2016, 12, 31, 23, 59, 60.0).is_ok());
    }
}
