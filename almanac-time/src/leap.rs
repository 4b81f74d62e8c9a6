//! The IERS leap second table.
//!
//! Source files are line-oriented with `#` comments and whitespace-separated
//! fields:
//!
//! ```text
//! <julianDay>  <day> <month> <year>  <TAI-UTC>
//! ```
//!
//! The Julian day token is parsed but not stored; the calendar date is
//! converted to the internal day count instead, and entries are kept as
//! parallel day/offset vectors sorted ascending by day (the source is assumed
//! already ascending).

use crate::calendar::CalendarDate;
use crate::scale::TimeScale;
use crate::{TimeError, TimeResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Cumulative TAI-UTC offsets keyed by day count.
#[derive(Debug, Clone, Default)]
pub struct LeapSecondTable {
    days: Vec<i32>,
    seconds: Vec<i32>,
}

impl LeapSecondTable {
    /// Parses a leap second file.
    pub fn load<P: AsRef<Path>>(path: P) -> TimeResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut days = Vec::new();
        let mut seconds = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let _julian_day = parse_field::<f64>(&mut fields, index, "julian day")?;
            let day = parse_field::<i32>(&mut fields, index, "day")?;
            let month = parse_field::<i32>(&mut fields, index, "month")?;
            let year = parse_field::<i32>(&mut fields, index, "year")?;
            let delta_tai = parse_field::<i32>(&mut fields, index, "TAI-UTC offset")?;

            let date = CalendarDate::new(year, month, day)?;
            days.push(date.to_time(TimeScale::Ut1).day());
            seconds.push(delta_tai);
        }

        Ok(Self { days, seconds })
    }

    /// Cumulative TAI-UTC in seconds effective on `day`.
    ///
    /// An empty table yields 0; a day before the first entry yields the first
    /// offset minus one; otherwise the offset of the greatest table day not
    /// after the query applies.
    pub fn delta_tai(&self, day: i32) -> i32 {
        if self.days.is_empty() {
            return 0;
        }
        if day < self.days[0] {
            return self.seconds[0] - 1;
        }
        match self.days.binary_search(&day) {
            Ok(index) => self.seconds[index],
            Err(insertion) => self.seconds[insertion - 1],
        }
    }

    /// True when a leap second takes effect exactly on `day`.
    ///
    /// The first table entry is the baseline TAI-UTC offset rather than an
    /// inserted leap second, so a match at index 0 does not count.
    pub fn has_leap_second(&self, day: i32) -> bool {
        matches!(self.days.binary_search(&day), Ok(index) if index > 0)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn parse_field<'a, T: std::str::FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    line_index: usize,
    name: &str,
) -> TimeResult<T> {
    let token = fields.next().ok_or_else(|| TimeError::Parse {
        line: line_index + 1,
        message: format!("missing {}", name),
    })?;
    token.parse().map_err(|_| TimeError::Parse {
        line: line_index + 1,
        message: format!("malformed {}: {:?}", name, token),
    })
}
