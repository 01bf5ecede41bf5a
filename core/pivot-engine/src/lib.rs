//! FILENAME: core/pivot-engine/src/lib.rs
//! Aggregation subsystem for the sales dashboard.
//!
//! This crate turns a filtered record set into the derived tables every
//! chart consumes. It depends on `sales-engine` only for the record model.
//!
//! Layers:
//! - `definition`: what to group by and how to fold (what the aggregate IS)
//! - `cache`: interned key values and accumulators (HOW we compute)
//! - `view`: aggregate, pivot and hierarchy tables (WHAT we display)
//! - `engine`: the grouping passes (HOW we calculate)

pub mod cache;
pub mod definition;
pub mod engine;
pub mod view;

pub use cache::{AggregateAccumulator, GroupCache, KeyInterner, KeyValue, ValueId};
pub use definition::{AggregateDefinition, AggregationType, GroupKey, PivotDefinition};
pub use engine::{aggregate, dimension_hierarchy, hierarchy, pivot};
pub use view::{
    flatten_hierarchy, AggregateRow, AggregateTable, FlatNode, HierarchyNode, PivotRow,
    PivotTable,
};
