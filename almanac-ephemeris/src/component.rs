//! Interpolation targets stored in a development ephemeris.

use std::fmt;

/// Everything a development ephemeris can interpolate.
///
/// Mercury through Sun are bodies; the remaining variants are auxiliary
/// series (Earth nutation angles, lunar libration angles, lunar angular
/// velocity and the TT-TDB offset) that share the same storage mechanism but
/// are not composed against a center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EphemerisComponent {
    Mercury = 0,
    Venus = 1,
    Earth = 2,
    Mars = 3,
    Jupiter = 4,
    Saturn = 5,
    Uranus = 6,
    Neptune = 7,
    Pluto = 8,
    Moon = 9,
    Sun = 10,
    SolarSystemBarycenter = 11,
    EarthMoonBarycenter = 12,
    EarthNutation = 13,
    MoonLibration = 14,
    MoonAngularVelocity = 15,
    TtMinusTdb = 16,
}

use EphemerisComponent::*;

/// All components in discriminant order.
pub const COMPONENTS: [EphemerisComponent; 17] = [
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Sun,
    SolarSystemBarycenter,
    EarthMoonBarycenter,
    EarthNutation,
    MoonLibration,
    MoonAngularVelocity,
    TtMinusTdb,
];

/// Which component each file slot of a DE430-layout ephemeris holds.
///
/// The source export orders its coefficient blocks by this fixed table, which
/// does not match the enum order (slot 2 is the Earth-Moon barycenter, and
/// Earth itself has no stored series — it is derived from the barycenter and
/// the Moon). The table is deliberately explicit rather than inferred from
/// file content.
pub const DE430_COMPONENTS: [EphemerisComponent; 15] = [
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Sun,
    EarthNutation,
    MoonLibration,
    MoonAngularVelocity,
    TtMinusTdb,
];

impl EphemerisComponent {
    /// Number of interpolated coordinates per instant.
    ///
    /// Cartesian bodies have three; nutation stores two angles and TT-TDB a
    /// single offset.
    pub fn coordinate_count(&self) -> usize {
        match self {
            EarthNutation => 2,
            TtMinusTdb => 1,
            _ => 3,
        }
    }

    /// True for series that are returned directly, without body composition.
    pub fn is_auxiliary(&self) -> bool {
        matches!(
            self,
            EarthNutation | MoonLibration | MoonAngularVelocity | TtMinusTdb
        )
    }

    /// The component with the given discriminant, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        COMPONENTS.get(index).copied()
    }
}

impl fmt::Display for EphemerisComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mercury => "Mercury",
            Venus => "Venus",
            Earth => "Earth",
            Mars => "Mars",
            Jupiter => "Jupiter",
            Saturn => "Saturn",
            Uranus => "Uranus",
            Neptune => "Neptune",
            Pluto => "Pluto",
            Moon => "Moon",
            Sun => "Sun",
            SolarSystemBarycenter => "solar system barycenter",
            EarthMoonBarycenter => "Earth-Moon barycenter",
            EarthNutation => "Earth nutation",
            MoonLibration => "Moon libration",
            MoonAngularVelocity => "Moon angular velocity",
            TtMinusTdb => "TT-TDB",
        };
        write!(f, "{}", name)
    }
}
