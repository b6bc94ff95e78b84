//! Data models for Belongings.
//!
//! - Item (the only persisted entity)
//! - Category (static, compiled in)
//! - TrendPoint (one sample of the cumulative value curve)

pub mod category;
pub mod item;

pub use category::{find_category, Category, CATEGORIES};
pub use item::{generate_id, Item, ItemStatus};

use serde::{Deserialize, Serialize};

/// Cumulative value of everything bought up to the end of `month`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar month as `YYYY-MM`
    pub month: String,
    pub value: f64,
}
