//! FILENAME: core/engine/src/schema.rs
//! PURPOSE: Column name normalization and the typed schema of a sales table.
//! CONTEXT: Source headers are normalized once at load time and resolved to
//! column positions here, so nothing downstream looks columns up by string.

use crate::error::EngineError;

pub const ORDER_DATE: &str = "order_date";
pub const REGION: &str = "region";
pub const STATE: &str = "state";
pub const CITY: &str = "city";
pub const CATEGORY: &str = "category";
pub const SUB_CATEGORY: &str = "sub-category";
pub const SEGMENT: &str = "segment";
pub const SALES: &str = "sales";
pub const PROFIT: &str = "profit";
pub const QUANTITY: &str = "quantity";

/// Normalized names every source must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    ORDER_DATE,
    REGION,
    STATE,
    CITY,
    CATEGORY,
    SUB_CATEGORY,
    SEGMENT,
    SALES,
    PROFIT,
    QUANTITY,
];

/// Canonical form of a header: trimmed, lowercased, spaces replaced by `_`.
///
/// `" Order Date"` becomes `"order_date"`; `"Sub-Category"` becomes
/// `"sub-category"`. Applying it twice gives the same result as once.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers
        .iter()
        .map(|h| normalize_column_name(h.as_ref()))
        .collect()
}

/// Positions of the required columns within a normalized header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub order_date: usize,
    pub region: usize,
    pub state: usize,
    pub city: usize,
    pub category: usize,
    pub sub_category: usize,
    pub segment: usize,
    pub sales: usize,
    pub profit: usize,
    pub quantity: usize,
}

impl Schema {
    /// Resolves every required column against normalized headers.
    /// The first header with a given name wins.
    pub fn resolve(headers: &[String]) -> Result<Self, EngineError> {
        let find = |name: &str| -> Result<usize, EngineError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| EngineError::MissingColumn(name.to_string()))
        };

        Ok(Schema {
            order_date: find(ORDER_DATE)?,
            region: find(REGION)?,
            state: find(STATE)?,
            city: find(CITY)?,
            category: find(CATEGORY)?,
            sub_category: find(SUB_CATEGORY)?,
            segment: find(SEGMENT)?,
            sales: find(SALES)?,
            profit: find(PROFIT)?,
            quantity: find(QUANTITY)?,
        })
    }
}
