//! Binary Chebyshev ephemeris codec and interpolator.
//!
//! A JPL-style ASCII ephemeris export is converted once, offline, into a
//! compact binary file by [`EphemerisBuilder`]. At query time [`Ephemeris`]
//! opens the binary file and interpolates position and velocity of a
//! [`EphemerisComponent`] relative to another at any instant inside the
//! stored range, paging one coefficient record at a time from disk.
//!
//! Kernels (the ephemeris itself and the leap second table used for time
//! scale conversion) are owned by an explicit [`KernelSet`] that callers
//! construct and pass around; there is no process-global registry.

pub mod chebyshev;
pub mod component;
pub mod kernel;
pub mod reader;
pub mod writer;

pub use component::EphemerisComponent;
pub use kernel::{Kernel, KernelKind, KernelSet};
pub use reader::{Ephemeris, RecordPointer};
pub use writer::{join, EphemerisBuilder};

use thiserror::Error;

pub type EphemResult<T> = Result<T, EphemerisError>;

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("time {jd} is outside the ephemeris range [{start}, {end}]")]
    TimeOutOfRange { jd: f64, start: f64, end: f64 },

    #[error("component {0} is not available in this ephemeris")]
    ComponentNotAvailable(EphemerisComponent),

    #[error("constant {0:?} not found in the ephemeris header")]
    ConstantNotFound(String),

    /// Aggregate failure of [`EphemerisBuilder::build`]: whatever went wrong
    /// while parsing the source, the output file must be considered invalid.
    #[error("invalid ephemeris data")]
    InvalidEphemerisData(#[source] Box<EphemerisError>),

    #[error("malformed ephemeris source: {0}")]
    Parse(String),

    #[error("invalid binary ephemeris layout: {0}")]
    InvalidFormat(String),

    #[error("{0} kernel is not loaded")]
    KernelNotLoaded(KernelKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Time(#[from] almanac_time::TimeError),
}
