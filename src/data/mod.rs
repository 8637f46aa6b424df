//! Complaint records and the data sources that produce them
//!
//! A source yields a flat, read-only [`ComplaintTable`]. Two sources exist:
//! [`FileSource`] reads the cleaned CSV export and [`GraphSource`] reshapes
//! the complaint graph into the same table. [`CachedSource`] memoizes
//! whichever one was chosen at startup.

pub mod file;
pub mod graph;
pub mod source;

pub use file::{parse_complaints, FileSource};
pub use graph::GraphSource;
pub use source::{CachedSource, DataSource};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Borough value for records whose borough is unknown
pub const UNKNOWN_BOROUGH: &str = "UNKNOWN";

/// Column names of the tabular file and of the CSV export, in order
pub const COLUMNS: [&str; 4] = ["Incident_zip", "Complaint_type", "Borough", "Created_date"];

/// One complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub zip: String,
    pub complaint_type: String,
    /// Never empty; missing values are loaded as [`UNKNOWN_BOROUGH`]
    pub borough: String,
    pub created_date: NaiveDate,
}

impl ComplaintRecord {
    pub fn new(
        zip: impl Into<String>,
        complaint_type: impl Into<String>,
        borough: Option<&str>,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            zip: zip.into(),
            complaint_type: complaint_type.into(),
            borough: normalize_borough(borough),
            created_date,
        }
    }

    /// Value of a categorical field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Zip => &self.zip,
            Field::ComplaintType => &self.complaint_type,
            Field::Borough => &self.borough,
        }
    }
}

/// Missing or blank boroughs become [`UNKNOWN_BOROUGH`]
pub fn normalize_borough(borough: Option<&str>) -> String {
    match borough.map(str::trim) {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => UNKNOWN_BOROUGH.to_string(),
    }
}

/// Categorical fields that can be grouped on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Zip,
    ComplaintType,
    Borough,
}

impl Field {
    /// Display name used for chart axes
    pub fn label(self) -> &'static str {
        match self {
            Field::Zip => "ZIP Code",
            Field::ComplaintType => "Complaint Type",
            Field::Borough => "Borough",
        }
    }
}

/// The loaded complaint table. Cheap to clone; never mutated after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintTable {
    records: Arc<Vec<ComplaintRecord>>,
}

impl ComplaintTable {
    pub fn new(records: Vec<ComplaintRecord>) -> Self {
        Self { records: Arc::new(records) }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ComplaintRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComplaintRecord> {
        self.records.iter()
    }

    /// Distinct zips, ascending. This is the selectable key set.
    pub fn zip_codes(&self) -> Vec<String> {
        self.records.iter()
            .map(|r| r.zip.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<ComplaintRecord>> for ComplaintTable {
    fn from(records: Vec<ComplaintRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a ComplaintTable {
    type Item = &'a ComplaintRecord;
    type IntoIter = std::slice::Iter<'a, ComplaintRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
