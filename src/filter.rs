//! Selection by zip code

use crate::data::{ComplaintRecord, ComplaintTable};

/// The records of one zip, borrowed from the table they were selected from
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    key: String,
    records: Vec<&'a ComplaintRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a ComplaintRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ComplaintRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Records whose zip equals `key`, in table order.
///
/// A key that is not in the table yields an empty view.
pub fn filter<'a>(table: &'a ComplaintTable, key: &str) -> FilteredView<'a> {
    FilteredView {
        key: key.to_string(),
        records: table.iter().filter(|r| r.zip == key).collect(),
    }
}
