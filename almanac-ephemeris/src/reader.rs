//! The binary ephemeris reader and interpolator.
//!
//! # Binary layout
//!
//! All integers and floats are little-endian; strings are a `u32` byte length
//! followed by UTF-8 bytes.
//!
//! ```text
//! |---------------------------|---------------------------|
//! |   Data Length             |   Value                   |
//! |---------------------------|---------------------------|
//! |   i32                     |   Header Size             |
//! |   string                  |   Version                 |
//! |   f64                     |   Start Epoch             |
//! |   f64                     |   Final Epoch             |
//! |   f64                     |   Record Span             |
//! |   i32                     |   Constant Count    (i)   |
//! |   i32                     |   Component Count   (j)   |
//! |   i32                     |   Coefficient Count (k)   |
//! |---------------------------|---------------------------|
//! |   (string + f64) × i      |   Constants               |
//! |   i32 × 3 × j             |   Coefficient Pointers    |
//! |---------------------------|---------------------------|
//! |   f64 × k per record      |   Data Records            |
//! |---------------------------|---------------------------|
//! ```
//!
//! Records are contiguous, time-ordered and non-overlapping, each spanning
//! `recordSpan` days; the first two coefficients of every record are its own
//! start and end epoch. The reader keeps exactly one record in memory and
//! pages a new one from disk only when a query leaves the cached bounds.

use crate::chebyshev;
use crate::component::{EphemerisComponent, DE430_COMPONENTS};
use crate::{EphemResult, EphemerisError};
use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Where a component's coefficients live inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordPointer {
    /// Slot of the first coefficient within a record, 0-based.
    pub offset: usize,
    /// Chebyshev coefficients per axis per sub-interval.
    pub coefficients_per_set: usize,
    /// Sub-intervals the record span is split into for this component.
    pub set_count: usize,
}

/// An opened binary ephemeris.
///
/// `interpolate` takes `&mut self` because the reader owns a single paged
/// coefficient block; concurrent consumers should each open their own
/// `Ephemeris` over the same file.
pub struct Ephemeris {
    reader: BufReader<File>,
    data_offset: u64,
    record_count: usize,
    version: String,
    start_epoch: f64,
    final_epoch: f64,
    record_span: f64,
    constants: Vec<(String, f64)>,
    pointers: HashMap<EphemerisComponent, RecordPointer>,
    coefficients: Vec<f64>,
    block_loaded: bool,
}

impl Ephemeris {
    /// Opens a binary ephemeris file and parses its header.
    ///
    /// No coefficient block is loaded until the first interpolation.
    pub fn open<P: AsRef<Path>>(path: P) -> EphemResult<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let data_offset = reader.read_i32::<LittleEndian>()?;
        if data_offset <= 0 {
            return Err(EphemerisError::InvalidFormat(format!(
                "header size {} is not positive",
                data_offset
            )));
        }
        let data_offset = data_offset as u64;

        let version = read_string(&mut reader)?;
        let start_epoch = reader.read_f64::<LittleEndian>()?;
        let final_epoch = reader.read_f64::<LittleEndian>()?;
        let record_span = reader.read_f64::<LittleEndian>()?;

        let constant_count = reader.read_i32::<LittleEndian>()? as usize;
        let component_count = reader.read_i32::<LittleEndian>()? as usize;
        let coefficient_count = reader.read_i32::<LittleEndian>()? as usize;
        if coefficient_count < 2 {
            return Err(EphemerisError::InvalidFormat(format!(
                "coefficient count {} is too small to hold record epochs",
                coefficient_count
            )));
        }
        if component_count > DE430_COMPONENTS.len() {
            return Err(EphemerisError::InvalidFormat(format!(
                "component count {} exceeds the {} known file slots",
                component_count,
                DE430_COMPONENTS.len()
            )));
        }

        let mut constants = Vec::with_capacity(constant_count);
        for _ in 0..constant_count {
            let name = read_string(&mut reader)?;
            let value = reader.read_f64::<LittleEndian>()?;
            constants.push((name, value));
        }

        let mut pointers = HashMap::with_capacity(component_count);
        for slot in 0..component_count {
            let offset = reader.read_i32::<LittleEndian>()?;
            let coefficients_per_set = reader.read_i32::<LittleEndian>()?;
            let set_count = reader.read_i32::<LittleEndian>()?;
            if offset < 1 || coefficients_per_set < 0 || set_count < 0 {
                return Err(EphemerisError::InvalidFormat(format!(
                    "slot {} has pointer ({}, {}, {}) outside the valid range",
                    slot, offset, coefficients_per_set, set_count
                )));
            }
            pointers.insert(
                DE430_COMPONENTS[slot],
                RecordPointer {
                    // The source export counts slots from 1.
                    offset: offset as usize - 1,
                    coefficients_per_set: coefficients_per_set as usize,
                    set_count: set_count as usize,
                },
            );
        }

        let record_bytes = coefficient_count as u64 * 8;
        let record_count = ((file_len.saturating_sub(data_offset)) / record_bytes) as usize;

        Ok(Self {
            reader,
            data_offset,
            record_count,
            version,
            start_epoch,
            final_epoch,
            record_span,
            constants,
            pointers,
            coefficients: vec![0.0; coefficient_count],
            block_loaded: false,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn start_epoch(&self) -> f64 {
        self.start_epoch
    }

    pub fn final_epoch(&self) -> f64 {
        self.final_epoch
    }

    pub fn record_span(&self) -> f64 {
        self.record_span
    }

    /// Number of whole records stored after the header.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Header constants in file order.
    pub fn constants(&self) -> &[(String, f64)] {
        &self.constants
    }

    /// Looks up a header constant by name.
    pub fn constant(&self, name: &str) -> EphemResult<f64> {
        self.constants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| EphemerisError::ConstantNotFound(name.to_string()))
    }

    /// The record pointer for a component, if the file stores one.
    pub fn pointer(&self, component: EphemerisComponent) -> Option<&RecordPointer> {
        self.pointers.get(&component)
    }

    /// Interpolates the state of `target` relative to `center` at `jd_tdb`.
    ///
    /// For bodies the result is `[x, y, z, vx, vy, vz]` in AU and AU/day.
    /// Auxiliary series are returned directly from their stored coefficients
    /// with their own arity (values then rates) and no AU scaling.
    ///
    /// Composition follows the DE convention: the Moon series is stored
    /// relative to Earth and the Earth state is derived from the Earth-Moon
    /// barycenter using the EMRAT mass ratio.
    pub fn interpolate(
        &mut self,
        jd_tdb: f64,
        target: EphemerisComponent,
        center: EphemerisComponent,
    ) -> EphemResult<Vec<f64>> {
        use EphemerisComponent::{Earth, EarthMoonBarycenter, Moon, SolarSystemBarycenter};

        if jd_tdb < self.start_epoch || jd_tdb > self.final_epoch {
            return Err(EphemerisError::TimeOutOfRange {
                jd: jd_tdb,
                start: self.start_epoch,
                end: self.final_epoch,
            });
        }

        // Nutation, libration, angular velocity and TT-TDB stand alone.
        if target.is_auxiliary() {
            return self.evaluate_series(jd_tdb, target);
        }

        // A body relative to itself is identically zero; deciding this up
        // front keeps the Earth/Moon derivation out of the degenerate pairs.
        if target == center {
            return Ok(vec![0.0; 6]);
        }

        let mut coordinates = vec![0.0; 6];

        if target == Moon && center == Earth {
            // The Moon series is natively geocentric.
            coordinates = self.evaluate_series(jd_tdb, target)?;
        } else if target == Earth && center == Moon {
            coordinates = self.evaluate_series(jd_tdb, center)?;
            for value in &mut coordinates {
                *value = -*value;
            }
        } else if target == Earth || target == Moon || center == Earth || center == Moon {
            let mut emrat = 1.0 / (1.0 + self.constant("EMRAT")?);
            if target == Moon || center == Moon {
                emrat -= 1.0;
            }

            let barycenter = self.evaluate_series(jd_tdb, EarthMoonBarycenter)?;
            let moon = self.evaluate_series(jd_tdb, Moon)?;

            if target == Earth || target == Moon {
                if center != SolarSystemBarycenter {
                    coordinates = self.evaluate_series(jd_tdb, center)?;
                }
                for axis in 0..coordinates.len() {
                    coordinates[axis] = (barycenter[axis] - emrat * moon[axis]) - coordinates[axis];
                }
            } else {
                if target != SolarSystemBarycenter {
                    coordinates = self.evaluate_series(jd_tdb, target)?;
                }
                for axis in 0..coordinates.len() {
                    coordinates[axis] -= barycenter[axis] - emrat * moon[axis];
                }
            }
        } else {
            let mut center_coordinates = vec![0.0; 6];
            if target != SolarSystemBarycenter {
                coordinates = self.evaluate_series(jd_tdb, target)?;
            }
            if center != SolarSystemBarycenter {
                center_coordinates = self.evaluate_series(jd_tdb, center)?;
            }
            for axis in 0..coordinates.len() {
                coordinates[axis] -= center_coordinates[axis];
            }
        }

        let au = self.constant("AU")?;
        for value in &mut coordinates {
            *value /= au;
        }

        Ok(coordinates)
    }

    /// Evaluates one stored series at `jd_tdb`.
    ///
    /// Returns `arity` positions followed by `arity` per-day rates, in the
    /// ephemeris's native units.
    fn evaluate_series(
        &mut self,
        jd_tdb: f64,
        component: EphemerisComponent,
    ) -> EphemResult<Vec<f64>> {
        let pointer = match self.pointers.get(&component) {
            Some(pointer) if pointer.set_count > 0 => *pointer,
            _ => return Err(EphemerisError::ComponentNotAvailable(component)),
        };

        let interval = (jd_tdb - self.start_epoch) / self.record_span;
        let mut segment = libm::floor(interval) as i64;

        // A query at the final epoch lands on the end of the last record.
        if jd_tdb == self.final_epoch {
            segment -= 1;
        }

        let sub_interval = (interval - segment as f64) * pointer.set_count as f64;
        // A final-epoch query would otherwise land one sub-interval past the
        // end of the record.
        let sub_segment = (libm::floor(sub_interval) as usize).min(pointer.set_count - 1);
        let x = (2.0 * (sub_interval - sub_segment as f64) - 1.0).clamp(-1.0, 1.0);

        if !self.block_loaded || jd_tdb < self.coefficients[0] || jd_tdb >= self.coefficients[1] {
            self.load_block(segment as u64)?;
        }

        let arity = component.coordinate_count();
        let mut coordinates = vec![0.0; arity * 2];
        for axis in 0..arity {
            let offset =
                pointer.coefficients_per_set * (arity * sub_segment + axis) + pointer.offset;
            let end = offset + pointer.coefficients_per_set;
            if end > self.coefficients.len() {
                return Err(EphemerisError::InvalidFormat(format!(
                    "coefficient slot {}..{} for {} overruns the {}-value record",
                    offset,
                    end,
                    component,
                    self.coefficients.len()
                )));
            }

            let (position, velocity) =
                chebyshev::position_velocity(&self.coefficients[offset..end], x);
            coordinates[axis] = position;
            coordinates[axis + arity] =
                velocity * (2.0 * pointer.set_count as f64) / self.record_span;
        }

        Ok(coordinates)
    }

    /// Pages the record holding `segment` into the coefficient buffer.
    fn load_block(&mut self, segment: u64) -> EphemResult<()> {
        let record_bytes = self.coefficients.len() as u64 * 8;
        self.reader
            .seek(SeekFrom::Start(self.data_offset + segment * record_bytes))?;
        for coefficient in self.coefficients.iter_mut() {
            *coefficient = self.reader.read_f64::<LittleEndian>()?;
        }
        self.block_loaded = true;
        Ok(())
    }
}

fn read_string<R: Read>(reader: &mut R) -> EphemResult<String> {
    let length = reader.read_u32::<LittleEndian>()? as usize;
    let mut bytes = vec![0u8; length];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| EphemerisError::InvalidFormat(format!("string is not UTF-8: {}", e)))
}
