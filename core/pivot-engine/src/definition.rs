//! FILENAME: core/pivot-engine/src/definition.rs
//! Aggregate Definition - what a derived table groups by and how it folds.
//!
//! These structures describe intent only. They are cheap to clone, hashable,
//! and serializable so a host can key cached results by them.

use serde::{Deserialize, Serialize};
use sales_engine::{Dimension, Measure, SalesRecord};

use crate::cache::KeyValue;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for the measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationType {
    #[default]
    Sum,
    Count,
    Average,
    Min,
    Max,
}

// ============================================================================
// GROUP KEYS
// ============================================================================

/// One grouping level of an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// A categorical column.
    Dimension(Dimension),
    /// Order date truncated to its calendar month, ordered chronologically.
    MonthYear,
    /// Calendar month regardless of year, ordered January to December.
    MonthName,
}

impl GroupKey {
    /// Column header used for this key in derived tables.
    pub fn column_name(&self) -> &'static str {
        match self {
            GroupKey::Dimension(d) => d.column(),
            GroupKey::MonthYear => "month_year",
            GroupKey::MonthName => "month",
        }
    }

    /// Extracts this key's value from a record.
    pub fn value_of(&self, record: &SalesRecord) -> KeyValue {
        match self {
            GroupKey::Dimension(d) => KeyValue::Text(record.dimension(*d).to_string()),
            GroupKey::MonthYear => KeyValue::Month(record.month_bucket()),
            GroupKey::MonthName => KeyValue::MonthOfYear(record.month_bucket().month),
        }
    }
}

impl From<Dimension> for GroupKey {
    fn from(dimension: Dimension) -> Self {
        GroupKey::Dimension(dimension)
    }
}

// ============================================================================
// AGGREGATE DEFINITION
// ============================================================================

/// A grouped aggregate: group by `keys`, fold `measure` with `aggregation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateDefinition {
    pub keys: Vec<GroupKey>,
    pub measure: Measure,
    #[serde(default)]
    pub aggregation: AggregationType,
}

impl AggregateDefinition {
    /// Sum of `measure` grouped by `keys`.
    pub fn sum_by<I, K>(keys: I, measure: Measure) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<GroupKey>,
    {
        AggregateDefinition {
            keys: keys.into_iter().map(Into::into).collect(),
            measure,
            aggregation: AggregationType::Sum,
        }
    }

    pub fn with_aggregation(mut self, aggregation: AggregationType) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Header of the value column, e.g. `sales` for a sum, `average_profit`
    /// otherwise.
    pub fn value_column(&self) -> String {
        match self.aggregation {
            AggregationType::Sum => self.measure.column().to_string(),
            AggregationType::Count => format!("count_{}", self.measure.column()),
            AggregationType::Average => format!("average_{}", self.measure.column()),
            AggregationType::Min => format!("min_{}", self.measure.column()),
            AggregationType::Max => format!("max_{}", self.measure.column()),
        }
    }
}

/// A cross-tabulation: one key down the rows, one across the columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PivotDefinition {
    pub row_key: GroupKey,
    pub column_key: GroupKey,
    pub measure: Measure,
    #[serde(default)]
    pub aggregation: AggregationType,
}

impl PivotDefinition {
    pub fn sum(row_key: impl Into<GroupKey>, column_key: impl Into<GroupKey>, measure: Measure) -> Self {
        PivotDefinition {
            row_key: row_key.into(),
            column_key: column_key.into(),
            measure,
            aggregation: AggregationType::Sum,
        }
    }
}
