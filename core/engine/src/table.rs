//! FILENAME: core/engine/src/table.rs
//! PURPOSE: The `Tabular` seam between derived tables and exporters.
//! CONTEXT: Filtered sets, aggregates and pivots all expose a header row and
//! value rows; persistence writes anything `Tabular` to CSV or XLSX.

use serde::{Deserialize, Serialize};

use crate::filter::FilteredSet;
use crate::value::FieldValue;

/// A rectangular table with a header row.
pub trait Tabular {
    fn header(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<FieldValue>>;
}

/// A plain owned table, used for column projections and read-back exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}

impl RecordTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<FieldValue>>) -> Self {
        RecordTable { header, rows }
    }

    /// Projects named columns of the first `limit` records.
    /// Unknown column names are skipped.
    pub fn project(set: &FilteredSet<'_>, columns: &[&str], limit: usize) -> Self {
        let positions: Vec<(usize, &str)> = columns
            .iter()
            .filter_map(|name| {
                set.columns()
                    .iter()
                    .position(|c| c == name)
                    .map(|idx| (idx, *name))
            })
            .collect();

        let header = positions.iter().map(|(_, name)| name.to_string()).collect();
        let rows = set
            .iter()
            .take(limit)
            .map(|r| {
                positions
                    .iter()
                    .map(|(idx, _)| r.fields.get(*idx).cloned().unwrap_or(FieldValue::Empty))
                    .collect()
            })
            .collect();

        RecordTable { header, rows }
    }

    /// Takes every `step`-th column in `start..end` of the first `limit`
    /// records.
    pub fn strided(set: &FilteredSet<'_>, start: usize, end: usize, step: usize, limit: usize) -> Self {
        let end = end.min(set.columns().len());
        let positions: Vec<usize> = (start..end).step_by(step.max(1)).collect();
        let names: Vec<&str> = positions.iter().map(|&i| set.columns()[i].as_str()).collect();
        Self::project(set, &names, limit)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&FieldValue>> {
        let idx = self.header.iter().position(|h| h == name)?;
        Some(self.rows.iter().filter_map(|r| r.get(idx)).collect())
    }
}

impl Tabular for RecordTable {
    fn header(&self) -> Vec<String> {
        self.header.clone()
    }

    fn rows(&self) -> Vec<Vec<FieldValue>> {
        self.rows.clone()
    }
}
