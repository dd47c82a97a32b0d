//! Loader for comma-delimited light curve tables.
//!
//! A table pairs a timestamp with a flux measurement per row. Tables may
//! carry a header row (first field contains `TIME`) and rows where either
//! field holds the literal `null` to mark a missing sample; both are
//! dropped before numeric conversion.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

/// Token marking a missing sample in either field.
const NULL_MARKER: &str = "null";

/// Token identifying a header row in the first field.
const HEADER_MARKER: &str = "TIME";

/// Errors that can occur while loading a light curve table.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {line}: expected at least two fields, found {found}")]
    ShortRow { line: u64, found: usize },

    #[error("row {line}: cannot parse {column} value '{value}' as a number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Time/flux sequences parsed from one light curve table.
///
/// The two sequences are positionally aligned: index `i` of `time` and
/// `flux` reflect the same source row, in source order.
#[derive(Debug, Clone, Default)]
pub struct LightCurve {
    /// Timestamps of all retained rows.
    pub time: Vec<f64>,
    /// Flux measurements of all retained rows.
    pub flux: Vec<f64>,
}

impl LightCurve {
    /// Creates a new empty light curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new light curve with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            flux: Vec::with_capacity(capacity),
        }
    }

    /// Appends one record.
    #[inline]
    pub fn push(&mut self, time: f64, flux: f64) {
        self.time.push(time);
        self.flux.push(flux);
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns true if the curve holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterates over `(time, flux)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.flux.iter().copied())
    }
}

/// Load a light curve from a comma-delimited table file.
///
/// Rows are kept only if the first field does not contain `null`, the
/// second field does not contain `null`, and the first field does not
/// contain `TIME`. The markers match as substrings anywhere in the field,
/// not as exact tokens. Kept rows are converted to `f64` time/flux pairs.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, if a retained
/// row has fewer than two fields, or if a retained field fails numeric
/// conversion. A conversion failure after filtering means the input is
/// malformed, so the whole file is rejected rather than the row skipped.
pub fn load_light_curve<P: AsRef<Path>>(path: P) -> Result<LightCurve> {
    let file = File::open(path.as_ref())?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut curve = LightCurve::with_capacity(1024);

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        // A leading null marks the whole row as missing, even when the
        // flux field is absent.
        let time_field = record.get(0).unwrap_or_default();
        if time_field.contains(NULL_MARKER) {
            continue;
        }

        let flux_field = record.get(1).ok_or(LoaderError::ShortRow {
            line,
            found: record.len(),
        })?;
        if flux_field.contains(NULL_MARKER) || time_field.contains(HEADER_MARKER) {
            continue;
        }

        let time: f64 =
            time_field
                .trim()
                .parse()
                .map_err(|_| LoaderError::InvalidNumber {
                    line,
                    column: "time",
                    value: time_field.to_string(),
                })?;
        let flux: f64 =
            flux_field
                .trim()
                .parse()
                .map_err(|_| LoaderError::InvalidNumber {
                    line,
                    column: "flux",
                    value: flux_field.to_string(),
                })?;

        curve.push(time, flux);
    }

    Ok(curve)
}
