//! The `Time` value type and forward scale conversion.

use crate::leap::LeapSecondTable;
use crate::scale::TimeScale;
use crate::{TimeError, TimeResult};
use almanac_core::constants::{
    D2000, DELTA_TDT, EB, K, M0, M1, SECONDS_PER_DAY, SECONDS_PER_HALF_DAY,
};
use almanac_core::math::div_rem_floor;

/// An instant on one time scale.
///
/// `day` counts days past 1 January 1 AD; `time_of_day` is seconds from
/// midnight in `[0, 86400)`. Values are immutable: every conversion produces
/// a fresh `Time`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    day: i32,
    time_of_day: f64,
    scale: TimeScale,
}

impl Time {
    pub fn new(day: i32, time_of_day: f64, scale: TimeScale) -> Self {
        Self {
            day,
            time_of_day,
            scale,
        }
    }

    /// Builds a `Time` from seconds relative to the J2000 epoch (noon,
    /// 1 January 2000).
    pub fn from_total_seconds(seconds: f64, scale: TimeScale) -> Self {
        let (days, remainder) =
            div_rem_floor(seconds + SECONDS_PER_HALF_DAY as f64, SECONDS_PER_DAY);
        Self {
            day: days as i32 + D2000,
            time_of_day: remainder,
            scale,
        }
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    pub fn time_of_day(&self) -> f64 {
        self.time_of_day
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Seconds relative to the J2000 epoch.
    pub fn total_seconds(&self) -> f64 {
        (self.day - D2000) as f64 * SECONDS_PER_DAY as f64 - SECONDS_PER_HALF_DAY as f64
            + self.time_of_day
    }

    /// Converts along the atomic chain UTC → TAI → TDT → TDB.
    ///
    /// Only forward conversion is supported; the leap second table feeds the
    /// UTC→TAI step. Conversions that cannot reach the target (for example
    /// UT1 to TAI) fail with [`TimeError::UnsupportedConversion`].
    pub fn to_atomic(&self, scale: TimeScale, leap: &LeapSecondTable) -> TimeResult<Time> {
        if !scale.is_atomic() {
            return Err(TimeError::InvalidScale(scale));
        }
        if scale == self.scale {
            return Ok(*self);
        }
        if scale < self.scale {
            return Err(TimeError::BackwardTransformation {
                from: self.scale,
                to: scale,
            });
        }

        let mut current = self.scale;
        let mut seconds = self.total_seconds();

        if current != scale && current == TimeScale::Utc {
            seconds += leap.delta_tai(self.day) as f64;
            current = TimeScale::Tai;
        }

        if current != scale && current == TimeScale::Tai {
            seconds += DELTA_TDT;
            current = TimeScale::Tdt;
        }

        if current != scale && current == TimeScale::Tdt {
            let g = M0 + M1 * seconds;
            seconds += K * libm::sin(g + EB * libm::sin(g));
            current = TimeScale::Tdb;
        }

        if current != scale {
            return Err(TimeError::UnsupportedConversion {
                from: self.scale,
                to: scale,
            });
        }

        Ok(Time::from_total_seconds(seconds, scale))
    }

    /// Converts along the Earth rotation chain UT1 → UTC → TSD.
    ///
    /// The chain is declared for completeness but its conversion step has no
    /// published formula in this crate yet, so any scale change fails with
    /// [`TimeError::UnsupportedConversion`].
    pub fn to_earth_rotation(&self, scale: TimeScale) -> TimeResult<Time> {
        if !scale.is_earth_rotation() {
            return Err(TimeError::InvalidScale(scale));
        }
        if scale == self.scale {
            return Ok(*self);
        }
        if scale < self.scale {
            return Err(TimeError::BackwardTransformation {
                from: self.scale,
                to: scale,
            });
        }

        Err(TimeError::UnsupportedConversion {
            from: self.scale,
            to: scale,
        })
    }
}
