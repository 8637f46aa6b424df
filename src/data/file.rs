//! CSV file source
//!
//! Expects a header row containing (in any order, extra columns ignored):
//!
//! ```text
//! Incident_zip,Complaint_type,Borough,Created_date
//! 10001,Noise - Residential,MANHATTAN,2024-01-05 23:10:00
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::PathBuf;
use tracing::warn;

use super::source::DataSource;
use super::{ComplaintRecord, COLUMNS};
use crate::error::{NciError, NciResult};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Parse a `Created_date` cell. The time of day, if any, is dropped.
pub fn parse_created_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS.iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
        .or_else(|| {
            DATETIME_FORMATS.iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
                .map(|dt| dt.date())
        })
}

/// Parse complaint records from CSV.
///
/// Rows with a blank zip are skipped (and counted in a warning) so that
/// every loaded record is selectable by zip.
pub fn parse_complaints<R: Read>(reader: R) -> NciResult<Vec<ComplaintRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()
        .map_err(|e| NciError::DataLoad(format!("cannot read header: {}", e)))?
        .clone();

    let mut idx = [0usize; 4];
    for (slot, column) in idx.iter_mut().zip(COLUMNS) {
        *slot = headers.iter().position(|h| h.trim() == column).ok_or_else(|| {
            NciError::DataLoad(format!(
                "missing column '{}' (found: {})",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })?;
    }
    let [zip_idx, type_idx, borough_idx, date_idx] = idx;

    let mut records = Vec::new();
    let mut blank_zips = 0usize;

    for (row_idx, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = row_idx + 2;
        let row = result.map_err(|e| NciError::DataLoad(format!("line {}: {}", line, e)))?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let zip = cell(zip_idx);
        if zip.is_empty() {
            blank_zips += 1;
            continue;
        }

        let raw_date = cell(date_idx);
        let created_date = parse_created_date(raw_date).ok_or_else(|| {
            NciError::DataLoad(format!("line {}: unparseable Created_date '{}'", line, raw_date))
        })?;

        records.push(ComplaintRecord::new(
            zip,
            cell(type_idx),
            Some(cell(borough_idx)),
            created_date,
        ));
    }

    if blank_zips > 0 {
        warn!("Skipped {} complaint rows without Incident_zip", blank_zips);
    }

    Ok(records)
}

/// Reads the cleaned complaint CSV from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn load(&self) -> NciResult<Vec<ComplaintRecord>> {
        let bytes = tokio::fs::read(&self.path).await
            .map_err(|e| NciError::DataLoad(format!("cannot open {}: {}", self.path.display(), e)))?;
        parse_complaints(bytes.as_slice())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
