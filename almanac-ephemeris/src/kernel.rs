//! Loaded data files, grouped per consumer.
//!
//! A [`KernelSet`] owns at most one kernel of each kind. Callers hold their
//! own set rather than sharing a process-wide registry, which keeps loaded
//! files scoped to the code that opened them.

use crate::reader::Ephemeris;
use crate::{EphemResult, EphemerisError};
use almanac_time::LeapSecondTable;
use std::fmt;
use std::path::Path;

/// The kinds of data file a [`KernelSet`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernelKind {
    /// A binary Chebyshev ephemeris.
    Ephemeris,
    /// A leap second table.
    LeapSeconds,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelKind::Ephemeris => write!(f, "ephemeris"),
            KernelKind::LeapSeconds => write!(f, "leap second"),
        }
    }
}

/// A loaded data file.
pub enum Kernel {
    Ephemeris(Ephemeris),
    LeapSeconds(LeapSecondTable),
}

impl Kernel {
    /// Loads the file at `path` as a kernel of the given kind.
    pub fn load<P: AsRef<Path>>(kind: KernelKind, path: P) -> EphemResult<Self> {
        match kind {
            KernelKind::Ephemeris => Ok(Kernel::Ephemeris(Ephemeris::open(path)?)),
            KernelKind::LeapSeconds => Ok(Kernel::LeapSeconds(LeapSecondTable::load(path)?)),
        }
    }

    pub fn kind(&self) -> KernelKind {
        match self {
            Kernel::Ephemeris(_) => KernelKind::Ephemeris,
            Kernel::LeapSeconds(_) => KernelKind::LeapSeconds,
        }
    }
}

/// An owned collection of loaded kernels, one per kind.
#[derive(Default)]
pub struct KernelSet {
    ephemeris: Option<Ephemeris>,
    leap_seconds: Option<LeapSecondTable>,
}

impl KernelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the file at `path` into the set, replacing any kernel of the
    /// same kind.
    pub fn load<P: AsRef<Path>>(&mut self, kind: KernelKind, path: P) -> EphemResult<()> {
        self.insert(Kernel::load(kind, path)?);
        Ok(())
    }

    /// Inserts an already loaded kernel, replacing any of the same kind.
    pub fn insert(&mut self, kernel: Kernel) {
        match kernel {
            Kernel::Ephemeris(ephemeris) => self.ephemeris = Some(ephemeris),
            Kernel::LeapSeconds(table) => self.leap_seconds = Some(table),
        }
    }

    /// Removes the kernel of the given kind; returns whether one was loaded.
    pub fn unload(&mut self, kind: KernelKind) -> bool {
        match kind {
            KernelKind::Ephemeris => self.ephemeris.take().is_some(),
            KernelKind::LeapSeconds => self.leap_seconds.take().is_some(),
        }
    }

    pub fn ephemeris(&self) -> EphemResult<&Ephemeris> {
        self.ephemeris
            .as_ref()
            .ok_or(EphemerisError::KernelNotLoaded(KernelKind::Ephemeris))
    }

    /// Interpolation pages coefficient records, so it needs the ephemeris
    /// mutably.
    pub fn ephemeris_mut(&mut self) -> EphemResult<&mut Ephemeris> {
        self.ephemeris
            .as_mut()
            .ok_or(EphemerisError::KernelNotLoaded(KernelKind::Ephemeris))
    }

    pub fn leap_seconds(&self) -> EphemResult<&LeapSecondTable> {
        self.leap_seconds
            .as_ref()
            .ok_or(EphemerisError::KernelNotLoaded(KernelKind::LeapSeconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_set_reports_missing_kernels() {
        let set = KernelSet::new();
        assert!(matches!(
            set.ephemeris(),
            Err(EphemerisError::KernelNotLoaded(KernelKind::Ephemeris))
        ));
        assert!(matches!(
            set.leap_seconds(),
            Err(EphemerisError::KernelNotLoaded(KernelKind::LeapSeconds))
        ));
    }

    #[test]
    fn leap_second_kernel_loads_and_unloads() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leap.tab");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#    JD        DAY MONTH YEAR  TAI-UTC").unwrap();
        writeln!(file, "2441317.5      1    1  1972    10").unwrap();
        drop(file);

        let mut set = KernelSet::new();
        set.load(KernelKind::LeapSeconds, &path).unwrap();
        assert_eq!(set.leap_seconds().unwrap().len(), 1);

        assert!(set.unload(KernelKind::LeapSeconds));
        assert!(!set.unload(KernelKind::LeapSeconds));
        assert!(set.leap_seconds().is_err());
    }

    #[test]
    fn unload_without_load_is_false() {
        let mut set = KernelSet::new();
        assert!(!set.unload(KernelKind::Ephemeris));
    }

    #[test]
    fn kernel_reports_its_kind() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leap.tab");
        std::fs::write(&path, "2441317.5      1    1  1972    10\n").unwrap();
        let kernel = Kernel::load(KernelKind::LeapSeconds, &path).unwrap();
        assert_eq!(kernel.kind(), KernelKind::LeapSeconds);
    }
}
