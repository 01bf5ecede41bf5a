//! FILENAME: core/pivot-engine/src/view.rs
//! Aggregate Views - the derived tables handed to the renderer.
//!
//! - `AggregateTable`: one row per group, key columns then a value column
//! - `PivotTable`: rows by one key, columns by another, empty where no data
//! - `HierarchyNode` / `FlatNode`: nested totals for treemap-style views

use serde::{Deserialize, Serialize};
use sales_engine::{FieldValue, Tabular};

use crate::cache::KeyValue;

// ============================================================================
// AGGREGATE TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub keys: Vec<KeyValue>,
    pub value: f64,
}

impl AggregateRow {
    pub fn labels(&self) -> Vec<String> {
        self.keys.iter().map(KeyValue::label).collect()
    }
}

/// Grouped result, rows in natural key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    pub key_columns: Vec<String>,
    pub value_column: String,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the value column.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Looks a group up by its key labels.
    pub fn get(&self, labels: &[&str]) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| {
                r.keys.len() == labels.len()
                    && r.keys.iter().zip(labels).all(|(k, l)| k.label() == *l)
            })
            .map(|r| r.value)
    }

    /// Labels of the first key column, in row order.
    pub fn labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.keys.first().map(KeyValue::label).unwrap_or_default())
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }
}

impl Tabular for AggregateTable {
    fn header(&self) -> Vec<String> {
        let mut header = self.key_columns.clone();
        header.push(self.value_column.clone());
        header
    }

    fn rows(&self) -> Vec<Vec<FieldValue>> {
        self.rows
            .iter()
            .map(|r| {
                let mut cells: Vec<FieldValue> = r.keys.iter().map(FieldValue::from).collect();
                cells.push(FieldValue::Number(r.value));
                cells
            })
            .collect()
    }
}

// ============================================================================
// PIVOT TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub key: KeyValue,
    /// One cell per pivot column; `None` where the combination never occurs.
    pub cells: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub row_column: String,
    pub columns: Vec<KeyValue>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn column_labels(&self) -> Vec<String> {
        self.columns.iter().map(KeyValue::label).collect()
    }

    /// Sum over every non-empty cell.
    pub fn total(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter().flatten())
            .sum()
    }

    pub fn cell(&self, row: &str, column: &str) -> Option<f64> {
        let col_idx = self.columns.iter().position(|c| c.label() == column)?;
        self.rows
            .iter()
            .find(|r| r.key.label() == row)
            .and_then(|r| r.cells.get(col_idx).copied().flatten())
    }
}

impl Tabular for PivotTable {
    fn header(&self) -> Vec<String> {
        let mut header = vec![self.row_column.clone()];
        header.extend(self.column_labels());
        header
    }

    fn rows(&self) -> Vec<Vec<FieldValue>> {
        self.rows
            .iter()
            .map(|r| {
                let mut cells = vec![FieldValue::from(&r.key)];
                cells.extend(r.cells.iter().map(|c| match c {
                    Some(v) => FieldValue::Number(*v),
                    None => FieldValue::Empty,
                }));
                cells
            })
            .collect()
    }
}

// ============================================================================
// HIERARCHY
// ============================================================================

/// A node in a nested aggregate. Each node's value is the total of its
/// subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub key: KeyValue,
    pub value: f64,
    pub children: Vec<HierarchyNode>,
}

/// A hierarchy node flattened with its path, in depth-first order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    /// Path labels joined by `/`, e.g. `East/Furniture/Chairs`. A `/` or
    /// `\` inside a label is escaped with `\`, so ids never collide.
    pub id: String,
    /// Id of the parent node, empty for top-level nodes.
    pub parent: String,
    pub label: String,
    /// Unescaped labels from the root down to this node.
    pub path: Vec<String>,
    pub depth: usize,
    pub value: f64,
}

/// Flattens a forest depth-first.
pub fn flatten_hierarchy(nodes: &[HierarchyNode]) -> Vec<FlatNode> {
    let mut items = Vec::new();
    flatten_nodes(nodes, &[], "", &mut items);
    items
}

fn flatten_nodes(nodes: &[HierarchyNode], path: &[String], parent: &str, out: &mut Vec<FlatNode>) {
    for node in nodes {
        let label = node.key.label();
        let escaped = escape_label(&label);
        let id = if parent.is_empty() {
            escaped
        } else {
            format!("{}/{}", parent, escaped)
        };
        let mut node_path = path.to_vec();
        node_path.push(label.clone());

        out.push(FlatNode {
            id: id.clone(),
            parent: parent.to_string(),
            label,
            path: node_path.clone(),
            depth: path.len(),
            value: node.value,
        });
        flatten_nodes(&node.children, &node_path, &id, out);
    }
}

fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '/' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
