//! FILENAME: core/pivot-engine/src/cache.rs
//! Group Cache - interned key values and per-group accumulators.
//!
//! Architecture:
//! - Each unique key value is stored once per grouping level and referenced by id
//! - A group is the small vector of ids, one per level
//! - Accumulators are folded in one pass over the filtered records

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

use sales_engine::date::month_name;
use sales_engine::{FieldValue, MonthBucket};

use crate::definition::AggregationType;

// ============================================================================
// KEY VALUES
// ============================================================================

/// A reference to an interned value within one level's value store.
pub type ValueId = u32;

/// Ids of a group, one per grouping level. Three levels cover every view
/// without spilling to the heap.
pub type GroupIds = SmallVec<[ValueId; 3]>;

/// A hashable, ordered grouping value.
///
/// Text orders lexicographically, month buckets chronologically and
/// months of the year from January to December.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyValue {
    Text(String),
    Month(MonthBucket),
    MonthOfYear(u32),
}

impl KeyValue {
    pub fn label(&self) -> String {
        match self {
            KeyValue::Text(s) => s.clone(),
            KeyValue::Month(bucket) => bucket.label(),
            KeyValue::MonthOfYear(m) => month_name(*m).to_string(),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<&KeyValue> for FieldValue {
    fn from(value: &KeyValue) -> Self {
        FieldValue::Text(value.label())
    }
}

// ============================================================================
// KEY INTERNER
// ============================================================================

/// Unique values of one grouping level, with O(1) lookup both ways.
#[derive(Debug, Clone, Default)]
pub struct KeyInterner {
    value_to_id: FxHashMap<KeyValue, ValueId>,
    id_to_value: Vec<KeyValue>,
}

impl KeyInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a value and returns its id. Existing values keep their id.
    pub fn intern(&mut self, value: KeyValue) -> ValueId {
        if let Some(&id) = self.value_to_id.get(&value) {
            return id;
        }

        let id = self.id_to_value.len() as ValueId;
        self.id_to_value.push(value.clone());
        self.value_to_id.insert(value, id);
        id
    }

    pub fn get_value(&self, id: ValueId) -> Option<&KeyValue> {
        self.id_to_value.get(id as usize)
    }

    pub fn unique_count(&self) -> usize {
        self.id_to_value.len()
    }

    /// All ids ordered by their value.
    pub fn sorted_ids(&self) -> Vec<ValueId> {
        let mut ids: Vec<ValueId> = (0..self.id_to_value.len() as ValueId).collect();
        ids.sort_by(|&a, &b| self.id_to_value[a as usize].cmp(&self.id_to_value[b as usize]));
        ids
    }

    /// Compares two ids by their interned values.
    pub fn compare(&self, a: ValueId, b: ValueId) -> Ordering {
        match (self.get_value(a), self.get_value(b)) {
            (Some(va), Some(vb)) => va.cmp(vb),
            _ => a.cmp(&b),
        }
    }
}

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Running state for every supported aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateAccumulator {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn merge(&mut self, other: &AggregateAccumulator) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Computes the final aggregate value.
    pub fn compute(&self, aggregation: AggregationType) -> f64 {
        match aggregation {
            AggregationType::Sum => self.sum,
            AggregationType::Count => self.count as f64,
            AggregationType::Average => {
                if self.count > 0 {
                    self.sum / self.count as f64
                } else {
                    0.0
                }
            }
            AggregationType::Min => self.min.unwrap_or(0.0),
            AggregationType::Max => self.max.unwrap_or(0.0),
        }
    }
}

// ============================================================================
// GROUP CACHE
// ============================================================================

/// One interner per level plus the accumulator of every observed group.
#[derive(Debug, Clone)]
pub struct GroupCache {
    levels: Vec<KeyInterner>,
    groups: FxHashMap<GroupIds, AggregateAccumulator>,
}

impl GroupCache {
    pub fn new(level_count: usize) -> Self {
        GroupCache {
            levels: vec![KeyInterner::new(); level_count],
            groups: FxHashMap::default(),
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Adds one observation. `values` must hold one value per level.
    pub fn add<I>(&mut self, values: I, measure: f64)
    where
        I: IntoIterator<Item = KeyValue>,
    {
        let ids: GroupIds = values
            .into_iter()
            .zip(self.levels.iter_mut())
            .map(|(value, interner)| interner.intern(value))
            .collect();
        self.groups.entry(ids).or_default().add(measure);
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn level(&self, idx: usize) -> Option<&KeyInterner> {
        self.levels.get(idx)
    }

    pub fn get(&self, ids: &[ValueId]) -> Option<&AggregateAccumulator> {
        self.groups.get(ids)
    }

    /// Groups in natural key order: level by level, each level by its own
    /// value ordering.
    pub fn sorted_groups(&self) -> Vec<(&GroupIds, &AggregateAccumulator)> {
        let mut groups: Vec<_> = self.groups.iter().collect();
        groups.sort_by(|(a, _), (b, _)| self.compare_ids(a, b));
        groups
    }

    /// Resolves group ids back to their values.
    pub fn resolve(&self, ids: &[ValueId]) -> Vec<KeyValue> {
        ids.iter()
            .zip(&self.levels)
            .filter_map(|(&id, interner)| interner.get_value(id).cloned())
            .collect()
    }

    fn compare_ids(&self, a: &[ValueId], b: &[ValueId]) -> Ordering {
        for ((&ia, &ib), interner) in a.iter().zip(b).zip(&self.levels) {
            let ord = interner.compare(ia, ib);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.len().cmp(&b.len())
    }
}
