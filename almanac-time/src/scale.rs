//! Time scale identifiers.

use std::fmt;

/// Astronomical time scales.
///
/// The discriminant order doubles as the conversion order: within either
/// chain, a conversion is "forward" exactly when the target compares greater
/// than the source. The atomic chain is UTC < TAI < TDT < TDB; the Earth
/// rotation chain is UT1 < UTC < TSD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeScale {
    /// Mean solar time.
    Ut1 = 0,
    /// Coordinated Universal Time, leap-second adjusted.
    Utc = 1,
    /// International Atomic Time.
    Tai = 2,
    /// Terrestrial Dynamical Time (TAI + 32.184 s).
    Tdt = 3,
    /// Barycentric Dynamical Time, the ephemeris argument.
    Tdb = 4,
    /// Sidereal-related scale.
    Tsd = 5,
}

impl TimeScale {
    /// True for members of the UTC/TAI/TDT/TDB chain.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            TimeScale::Utc | TimeScale::Tai | TimeScale::Tdt | TimeScale::Tdb
        )
    }

    /// True for members of the UT1/UTC/TSD chain.
    pub fn is_earth_rotation(&self) -> bool {
        matches!(self, TimeScale::Ut1 | TimeScale::Utc | TimeScale::Tsd)
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeScale::Ut1 => "UT1",
            TimeScale::Utc => "UTC",
            TimeScale::Tai => "TAI",
            TimeScale::Tdt => "TDT",
            TimeScale::Tdb => "TDB",
            TimeScale::Tsd => "TSD",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_chain_is_ordered() {
        assert!(TimeScale::Utc < TimeScale::Tai);
        assert!(TimeScale::Tai < TimeScale::Tdt);
        assert!(TimeScale::Tdt < TimeScale::Tdb);
    }

    #[test]
    fn earth_rotation_chain_is_ordered() {
        assert!(TimeScale::Ut1 < TimeScale::Utc);
        assert!(TimeScale::Utc < TimeScale::Tsd);
    }

    #[test]
    fn chain_membership() {
        assert!(TimeScale::Utc.is_atomic());
        assert!(TimeScale::Utc.is_earth_rotation());
        assert!(!TimeScale::Ut1.is_atomic());
        assert!(!TimeScale::Tdb.is_earth_rotation());
        assert!(!TimeScale::Tsd.is_atomic());
    }

    #[test]
    fn display_names() {
        assert_eq!(TimeScale::Tdb.to_string(), "TDB");
        assert_eq!(TimeScale::Ut1.to_string(), "UT1");
    }
}
