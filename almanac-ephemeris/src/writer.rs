//! Converts the ASCII ephemeris export into the binary format read by
//! [`Ephemeris`](crate::Ephemeris).
//!
//! The ASCII export is organized into numbered groups:
//!
//! * `1000` carries the coefficient count per record as its fourth token,
//! * `1030` the start epoch, final epoch and record span,
//! * `1040` the constant names, ten per line,
//! * `1041` the constant values, three per line, with `D` exponents,
//! * `1050` three rows of per-component integers (offset, coefficients per
//!   set, set count),
//! * `1070` the data records themselves.
//!
//! Header exports and yearly data chunks overlap at their edges; the writer
//! keeps a record only when its start epoch continues the previous record,
//! so duplicated boundary records collapse to one.

use crate::{EphemResult, EphemerisError};
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Version stamped into the binary header.
const FORMAT_VERSION: &str = "0.1";

/// One-shot converter from an ASCII ephemeris export to the binary format.
pub struct EphemerisBuilder {
    reader: BufReader<File>,
    writer: BufWriter<File>,
    start_epoch: f64,
    final_epoch: f64,
    record_span: f64,
    coefficient_count: usize,
    constant_names: Vec<String>,
    constant_values: Vec<f64>,
    pointers: [Vec<i32>; 3],
}

impl EphemerisBuilder {
    /// Opens `input` (a complete ASCII export, header groups followed by a
    /// `1070` data group) for conversion into `output`.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> EphemResult<Self> {
        Ok(Self {
            reader: BufReader::new(File::open(input)?),
            writer: BufWriter::new(File::create(output)?),
            start_epoch: 0.0,
            final_epoch: 0.0,
            record_span: 0.0,
            coefficient_count: 0,
            constant_names: Vec::new(),
            constant_values: Vec::new(),
            pointers: [Vec::new(), Vec::new(), Vec::new()],
        })
    }

    /// Runs the conversion to completion.
    pub fn build(mut self) -> EphemResult<()> {
        self.build_inner()
            .map_err(|e| EphemerisError::InvalidEphemerisData(Box::new(e)))
    }

    fn build_inner(&mut self) -> EphemResult<()> {
        self.write_header()?;
        self.write_records()?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self) -> EphemResult<()> {
        self.read_group_1000()?;
        self.move_to_group("1030")?;
        self.read_group_1030()?;
        self.move_to_group("1040")?;
        self.read_group_1040()?;
        self.move_to_group("1041")?;
        self.read_group_1041()?;
        self.move_to_group("1050")?;
        self.read_group_1050()?;

        // Reserve room for the header size and patch it in afterwards.
        self.writer.write_i32::<LittleEndian>(0)?;

        write_string(&mut self.writer, FORMAT_VERSION)?;
        self.writer.write_f64::<LittleEndian>(self.start_epoch)?;
        self.writer.write_f64::<LittleEndian>(self.final_epoch)?;
        self.writer.write_f64::<LittleEndian>(self.record_span)?;

        let constant_count = self.constant_names.len().min(self.constant_values.len());
        let component_count = self.pointers[0].len();
        self.writer
            .write_i32::<LittleEndian>(constant_count as i32)?;
        self.writer
            .write_i32::<LittleEndian>(component_count as i32)?;
        self.writer
            .write_i32::<LittleEndian>(self.coefficient_count as i32)?;

        for index in 0..constant_count {
            write_string(&mut self.writer, &self.constant_names[index])?;
            self.writer
                .write_f64::<LittleEndian>(self.constant_values[index])?;
        }

        for component in 0..component_count {
            for row in &self.pointers {
                self.writer.write_i32::<LittleEndian>(row[component])?;
            }
        }

        let header_size = self.writer.stream_position()?;
        self.writer.seek(SeekFrom::Start(0))?;
        self.writer.write_i32::<LittleEndian>(header_size as i32)?;
        self.writer.seek(SeekFrom::Start(header_size))?;

        Ok(())
    }

    /// Group `1000` opens the file; its first line carries the coefficient
    /// count per record as the fourth token.
    fn read_group_1000(&mut self) -> EphemResult<()> {
        let tokens = self.read_token_line()?;
        let count = tokens
            .get(3)
            .ok_or_else(|| {
                EphemerisError::Parse("first line is missing the coefficient count".to_string())
            })?
            .parse::<usize>()
            .map_err(|e| EphemerisError::Parse(format!("bad coefficient count: {}", e)))?;
        if count < 2 {
            return Err(EphemerisError::Parse(format!(
                "coefficient count {} cannot hold record epochs",
                count
            )));
        }
        self.coefficient_count = count;
        Ok(())
    }

    fn read_group_1030(&mut self) -> EphemResult<()> {
        let values = self.read_f64_line()?;
        if values.len() < 3 {
            return Err(EphemerisError::Parse(
                "group 1030 must carry start epoch, final epoch and record span".to_string(),
            ));
        }
        self.start_epoch = values[0];
        self.final_epoch = values[1];
        self.record_span = values[2];
        Ok(())
    }

    /// Constant names, ten per line after a count line.
    fn read_group_1040(&mut self) -> EphemResult<()> {
        let count = self.read_count_line()?;
        let lines = count.div_ceil(10);
        for _ in 0..lines {
            for token in self.read_token_line()? {
                if self.constant_names.len() < count {
                    self.constant_names.push(token);
                }
            }
        }
        Ok(())
    }

    /// Constant values, three per line after a count line.
    fn read_group_1041(&mut self) -> EphemResult<()> {
        let count = self.read_count_line()?;
        let lines = count.div_ceil(3);
        for _ in 0..lines {
            for value in self.read_f64_line()? {
                if self.constant_values.len() < count {
                    self.constant_values.push(value);
                }
            }
        }
        Ok(())
    }

    /// Three rows of per-component integers.
    fn read_group_1050(&mut self) -> EphemResult<()> {
        for row in 0..3 {
            let line = self.next_line()?;
            self.pointers[row] = parse_i32_line(&line)?;
        }
        if self.pointers[0].len() != self.pointers[1].len()
            || self.pointers[0].len() != self.pointers[2].len()
        {
            return Err(EphemerisError::Parse(format!(
                "group 1050 rows disagree on component count ({}, {}, {})",
                self.pointers[0].len(),
                self.pointers[1].len(),
                self.pointers[2].len()
            )));
        }
        Ok(())
    }

    fn write_records(&mut self) -> EphemResult<()> {
        self.move_to_group("1070")?;

        let mut coefficients = vec![0.0; self.coefficient_count];
        let mut expected_start = self.start_epoch;
        let lines = self.coefficient_count.div_ceil(3);

        loop {
            // Each record opens with a metadata line (record number, count).
            if self.skip_line()?.is_none() {
                break;
            }

            let mut filled = 0;
            for _ in 0..lines {
                for value in self.read_f64_line()? {
                    if filled < self.coefficient_count {
                        coefficients[filled] = value;
                        filled += 1;
                    }
                }
            }

            // Chunk edges repeat records; keep only the one continuing the
            // timeline.
            if coefficients[0] == expected_start {
                for value in &coefficients {
                    self.writer.write_f64::<LittleEndian>(*value)?;
                }
                expected_start = coefficients[1];
            }

            if coefficients[1] == self.final_epoch {
                break;
            }
        }

        Ok(())
    }

    fn read_line_raw(&mut self) -> EphemResult<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn next_line(&mut self) -> EphemResult<String> {
        self.read_line_raw()?.ok_or_else(|| {
            EphemerisError::Parse("unexpected end of ephemeris source".to_string())
        })
    }

    fn skip_line(&mut self) -> EphemResult<Option<()>> {
        Ok(self.read_line_raw()?.map(|_| ()))
    }

    fn read_token_line(&mut self) -> EphemResult<Vec<String>> {
        let line = self.next_line()?;
        Ok(line.split_whitespace().map(str::to_string).collect())
    }

    fn read_count_line(&mut self) -> EphemResult<usize> {
        let line = self.next_line()?;
        let token = line
            .split_whitespace()
            .next()
            .ok_or_else(|| EphemerisError::Parse("expected a count line".to_string()))?;
        token
            .parse::<usize>()
            .map_err(|e| EphemerisError::Parse(format!("bad count '{}': {}", token, e)))
    }

    fn read_f64_line(&mut self) -> EphemResult<Vec<f64>> {
        let line = self.next_line()?;
        line.split_whitespace()
            .map(|token| {
                // FORTRAN exports spell the exponent marker as D.
                token
                    .replace('D', "E")
                    .parse::<f64>()
                    .map_err(|e| EphemerisError::Parse(format!("bad float '{}': {}", token, e)))
            })
            .collect()
    }

    /// Skips forward until the line ending in `group`, then skips the blank
    /// line that follows it.
    fn move_to_group(&mut self, group: &str) -> EphemResult<()> {
        loop {
            match self.read_line_raw()? {
                Some(line) if line.trim_end().ends_with(group) => break,
                Some(_) => continue,
                None => {
                    return Err(EphemerisError::Parse(format!("group {} not found", group)));
                }
            }
        }
        self.skip_line()?;
        Ok(())
    }
}

/// Appends yearly ASCII chunks to a header export, producing one complete
/// ASCII ephemeris ready for [`EphemerisBuilder`].
///
/// Chunk files in `directory` whose names start with `prefix` are sorted by
/// name; the usual `ascpYYYY.NNN` naming makes that chronological order.
pub fn join<P, Q, R>(directory: P, header_file: Q, prefix: &str, output: R) -> EphemResult<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(output)?);

    let mut header = File::open(header_file)?;
    copy_file(&mut header, &mut writer)?;

    let mut chunks = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(prefix) {
            chunks.push(entry.path());
        }
    }
    chunks.sort();

    for chunk in chunks {
        let mut file = File::open(chunk)?;
        copy_file(&mut file, &mut writer)?;
    }

    writer.flush()?;
    Ok(())
}

fn copy_file<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> EphemResult<()> {
    std::io::copy(reader, writer)?;
    Ok(())
}

fn parse_i32_line(line: &str) -> EphemResult<Vec<i32>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|e| EphemerisError::Parse(format!("bad integer '{}': {}", token, e)))
        })
        .collect()
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> EphemResult<()> {
    writer.write_u32::<LittleEndian>(value.len() as u32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}
