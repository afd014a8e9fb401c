//! In-memory ZIP code → coordinate table.
//!
//! The table is loaded once from a CSV dataset with a header row naming the
//! `ZIP`, `LAT` and `LNG` columns. It is never mutated after loading, so a
//! single instance can be shared behind an `Arc` by any number of readers.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, ZipError};
use crate::types::{Coordinate, ZipCode};

pub const ZIP_COLUMN: &str = "ZIP";
pub const LAT_COLUMN: &str = "LAT";
pub const LNG_COLUMN: &str = "LNG";

/// Immutable mapping from ZIP code to coordinate.
///
/// Iteration follows the order in which each ZIP first appeared in the
/// dataset. A repeated ZIP keeps its original position but takes the
/// coordinate of its last occurrence.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    entries: Vec<(ZipCode, Coordinate)>,
    index: HashMap<ZipCode, usize>,
}

impl CoordinateTable {
    /// Load a table from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ZipError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} ZIP codes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse a table from any CSV source. The first row must be a header.
    ///
    /// Any malformed row aborts the whole load; a partial table would
    /// silently produce wrong query results.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(|e| ZipError::Data {
            row: 0,
            detail: e.to_string(),
        })?;
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(ZipError::MissingColumn(name))
        };
        let zip_idx = column(ZIP_COLUMN)?;
        let lat_idx = column(LAT_COLUMN)?;
        let lng_idx = column(LNG_COLUMN)?;

        let mut table = Self::default();
        let mut duplicates = 0usize;

        for (i, record) in reader.records().enumerate() {
            let row = i + 1;
            let record = record.map_err(|e| ZipError::Data {
                row,
                detail: e.to_string(),
            })?;

            let field = |idx: usize, name: &str| {
                record.get(idx).ok_or_else(|| ZipError::Data {
                    row,
                    detail: format!("missing {} field", name),
                })
            };

            let zip = field(zip_idx, ZIP_COLUMN)?;
            if zip.is_empty() {
                return Err(ZipError::Data {
                    row,
                    detail: "empty ZIP field".to_string(),
                });
            }
            let lat = parse_degrees(field(lat_idx, LAT_COLUMN)?, LAT_COLUMN, 90.0, row)?;
            let lng = parse_degrees(field(lng_idx, LNG_COLUMN)?, LNG_COLUMN, 180.0, row)?;

            if table.insert(zip.to_string(), Coordinate::new(lat, lng)) {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                "{} duplicate ZIP rows in dataset, last occurrence kept",
                duplicates
            );
        }

        Ok(table)
    }

    /// Insert or overwrite an entry. Returns true if the ZIP was already present.
    fn insert(&mut self, zip: ZipCode, coord: Coordinate) -> bool {
        match self.index.get(&zip) {
            Some(&pos) => {
                self.entries[pos].1 = coord;
                true
            }
            None => {
                self.index.insert(zip.clone(), self.entries.len());
                self.entries.push((zip, coord));
                false
            }
        }
    }

    pub fn get(&self, zip: &str) -> Option<Coordinate> {
        self.index.get(zip).map(|&pos| self.entries[pos].1)
    }

    pub fn contains(&self, zip: &str) -> bool {
        self.index.contains_key(zip)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in dataset order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> + '_ {
        self.entries.iter().map(|(zip, coord)| (zip.as_str(), *coord))
    }
}

impl FromIterator<(ZipCode, Coordinate)> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = (ZipCode, Coordinate)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (zip, coord) in iter {
            table.insert(zip, coord);
        }
        table
    }
}

fn parse_degrees(raw: &str, column: &str, limit: f64, row: usize) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| ZipError::Data {
        row,
        detail: format!("{} value {:?} is not a number", column, raw),
    })?;
    if !value.is_finite() || value.abs() > limit {
        return Err(ZipError::Data {
            row,
            detail: format!("{} value {} outside [-{}, {}]", column, value, limit, limit),
        });
    }
    Ok(value)
}
