//! FILENAME: core/pivot-engine/src/engine.rs
//! Aggregation Engine - folds a filtered record set into derived tables.
//!
//! Algorithm:
//! 1. One pass over the records interning each level's key value
//! 2. Accumulate the measure per group of interned ids
//! 3. Sort groups by natural key order (level by level)
//! 4. Emit the table; pivots widen the column key, hierarchies nest
//!    successive key prefixes into a tree

use log::debug;
use sales_engine::{Dimension, FilteredSet};

use crate::cache::{GroupCache, KeyValue};
use crate::definition::{AggregateDefinition, GroupKey, PivotDefinition};
use crate::view::{AggregateRow, AggregateTable, HierarchyNode, PivotRow, PivotTable};

/// Groups `set` by the definition's keys and folds the measure.
///
/// The output has one row per key combination present in the data. With no
/// keys the result is a single row holding the aggregate over the whole set
/// (or no rows for an empty set).
pub fn aggregate(set: &FilteredSet<'_>, definition: &AggregateDefinition) -> AggregateTable {
    let cache = build_cache(set, &definition.keys, definition);

    let rows: Vec<AggregateRow> = cache
        .sorted_groups()
        .into_iter()
        .map(|(ids, acc)| AggregateRow {
            keys: cache.resolve(ids),
            value: acc.compute(definition.aggregation),
        })
        .collect();

    debug!(
        "aggregate by {:?}: {} records -> {} groups",
        definition.keys,
        set.len(),
        rows.len()
    );

    AggregateTable {
        key_columns: definition
            .keys
            .iter()
            .map(|k| k.column_name().to_string())
            .collect(),
        value_column: definition.value_column(),
        rows,
    }
}

/// Cross-tabulates `set`: one row per row-key value, one column per
/// column-key value, both in natural order.
pub fn pivot(set: &FilteredSet<'_>, definition: &PivotDefinition) -> PivotTable {
    let keys = [definition.row_key, definition.column_key];
    let agg_def = AggregateDefinition {
        keys: keys.to_vec(),
        measure: definition.measure,
        aggregation: definition.aggregation,
    };
    let cache = build_cache(set, &keys, &agg_def);

    let row_column = definition.row_key.column_name().to_string();
    let (Some(row_level), Some(col_level)) = (cache.level(0), cache.level(1)) else {
        return PivotTable {
            row_column,
            columns: Vec::new(),
            rows: Vec::new(),
        };
    };
    let row_ids = row_level.sorted_ids();
    let col_ids = col_level.sorted_ids();

    let rows = row_ids
        .iter()
        .map(|&row_id| PivotRow {
            key: row_level.get_value(row_id).cloned().unwrap_or(KeyValue::Text(String::new())),
            cells: col_ids
                .iter()
                .map(|&col_id| {
                    cache
                        .get(&[row_id, col_id])
                        .map(|acc| acc.compute(definition.aggregation))
                })
                .collect(),
        })
        .collect();

    let columns = col_ids
        .iter()
        .filter_map(|&id| col_level.get_value(id).cloned())
        .collect();

    debug!(
        "pivot {:?} x {:?}: {} rows x {} columns",
        definition.row_key,
        definition.column_key,
        row_ids.len(),
        col_ids.len()
    );

    PivotTable {
        row_column,
        columns,
        rows,
    }
}

/// Nested sums of `definition.measure` by successive keys, e.g.
/// region → category → sub-category. Every node carries its subtree total.
pub fn hierarchy(set: &FilteredSet<'_>, definition: &AggregateDefinition) -> Vec<HierarchyNode> {
    let leaves = aggregate(set, definition);
    let mut roots: Vec<HierarchyNode> = Vec::new();

    for row in &leaves.rows {
        insert_path(&mut roots, &row.keys, row.value);
    }
    roots
}

/// Convenience for the common case of summing sales over dimensions.
pub fn dimension_hierarchy(
    set: &FilteredSet<'_>,
    dimensions: &[Dimension],
    measure: sales_engine::Measure,
) -> Vec<HierarchyNode> {
    hierarchy(
        set,
        &AggregateDefinition::sum_by(dimensions.iter().copied(), measure),
    )
}

// ============================================================================
// HELPERS
// ============================================================================

fn build_cache(
    set: &FilteredSet<'_>,
    keys: &[GroupKey],
    definition: &AggregateDefinition,
) -> GroupCache {
    let mut cache = GroupCache::new(keys.len());
    for record in set.iter() {
        cache.add(
            keys.iter().map(|k| k.value_of(record)),
            record.measure(definition.measure),
        );
    }
    cache
}

/// Adds a leaf value along `path`, creating nodes as needed. Leaves arrive
/// in sorted order, so appending keeps every level sorted.
fn insert_path(nodes: &mut Vec<HierarchyNode>, path: &[KeyValue], value: f64) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };

    let idx = match nodes.iter().position(|n| &n.key == head) {
        Some(idx) => idx,
        None => {
            nodes.push(HierarchyNode {
                key: head.clone(),
                value: 0.0,
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };

    let node = &mut nodes[idx];
    node.value += value;
    insert_path(&mut node.children, rest, value);
}
