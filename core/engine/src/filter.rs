//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Date window and multi-select predicates over sales records.
//! CONTEXT: Filtering never copies or mutates records. A `FilteredSet`
//! borrows from the `SalesTable` and each step returns a new set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::date::DateBounds;
use crate::record::{Dimension, Measure, SalesRecord};
use crate::table::Tabular;
use crate::value::FieldValue;

// ============================================================================
// DATE RANGE
// ============================================================================

/// Inclusive `[start, end]` window. An inverted window matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

impl From<DateBounds> for DateRange {
    fn from(bounds: DateBounds) -> Self {
        DateRange::new(bounds.min, bounds.max)
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// The chosen values of one multi-select.
/// An empty selection places no restriction on the dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, value: &str) -> bool {
        self.0.is_empty() || self.0.contains(value)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Selection::new(iter)
    }
}

// ============================================================================
// FILTER PARAMETERS
// ============================================================================

/// Everything a user can choose on the dashboard. Hashable so a host can
/// key rendered views by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    /// `None` means the dataset's full date bounds.
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub regions: Selection,
    #[serde(default)]
    pub states: Selection,
    #[serde(default)]
    pub cities: Selection,
}

impl FilterParams {
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    pub fn with_regions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = Selection::new(values);
        self
    }

    pub fn with_states<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = Selection::new(values);
        self
    }

    pub fn with_cities<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = Selection::new(values);
        self
    }
}

// ============================================================================
// FILTERED SET
// ============================================================================

/// Records that survived the predicates, in source order.
#[derive(Debug, Clone)]
pub struct FilteredSet<'a> {
    columns: &'a [String],
    records: Vec<&'a SalesRecord>,
}

impl<'a> FilteredSet<'a> {
    pub fn new(columns: &'a [String], records: Vec<&'a SalesRecord>) -> Self {
        FilteredSet { columns, records }
    }

    /// Keeps records whose `dimension` value is in `selection`.
    /// An empty selection returns an identical set.
    pub fn select(&self, dimension: Dimension, selection: &Selection) -> FilteredSet<'a> {
        if selection.is_empty() {
            return self.clone();
        }
        FilteredSet {
            columns: self.columns,
            records: self
                .records
                .iter()
                .copied()
                .filter(|r| selection.matches(r.dimension(dimension)))
                .collect(),
        }
    }

    /// The first `limit` records.
    pub fn head(&self, limit: usize) -> FilteredSet<'a> {
        FilteredSet {
            columns: self.columns,
            records: self.records.iter().take(limit).copied().collect(),
        }
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn records(&self) -> &[&'a SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total(&self, measure: Measure) -> f64 {
        self.iter().map(|r| r.measure(measure)).sum()
    }

    /// Distinct values of `dimension` in first-appearance order; the option
    /// list of a multi-select.
    pub fn distinct(&self, dimension: Dimension) -> Vec<String> {
        let mut seen = HashSet::new();
        self.iter()
            .map(|r| r.dimension(dimension))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}

impl Tabular for FilteredSet<'_> {
    fn header(&self) -> Vec<String> {
        self.columns.to_vec()
    }

    fn rows(&self) -> Vec<Vec<FieldValue>> {
        self.iter().map(|r| r.fields.clone()).collect()
    }
}
