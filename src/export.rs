//! CSV export of a selection
//!
//! Same columns as the input file, so an export can be loaded again.

use crate::data::COLUMNS;
use crate::error::{NciError, NciResult};
use crate::filter::FilteredView;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The selection as CSV text, header included
pub fn export_csv(view: &FilteredView<'_>) -> NciResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let export_err = |e: csv::Error| NciError::Export(e.to_string());

    writer.write_record(COLUMNS).map_err(export_err)?;
    for record in view.iter() {
        let date = record.created_date.format(DATE_FORMAT).to_string();
        writer.write_record([
            record.zip.as_str(),
            record.complaint_type.as_str(),
            record.borough.as_str(),
            date.as_str(),
        ]).map_err(export_err)?;
    }

    let bytes = writer.into_inner().map_err(|e| NciError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| NciError::Export(e.to_string()))
}

/// `complaints_<key>.csv`, with anything but ASCII letters, digits, `-`
/// and `_` in the key replaced by `_`
pub fn export_file_name(key: &str) -> String {
    let safe: String = key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("complaints_{}.csv", safe)
}
