//! Item model for Belongings.
//!
//! An item is a single owned belonging: what it is, which category it
//! sits in, what it cost, and when it was bought.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[default]
    InUse,
    Sold,
    Retired,
}

impl ItemStatus {
    pub const ALL: [Self; 3] = [Self::InUse, Self::Sold, Self::Retired];

    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InUse => "in-use",
            Self::Sold => "sold",
            Self::Retired => "retired",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InUse => "In use",
            Self::Sold => "Sold",
            Self::Retired => "Retired",
        }
    }

    /// Parse a stored status value.
    ///
    /// Accepts the canonical strings and the labels written by earlier
    /// builds of the app. Anything else is rejected; user input goes through
    /// [`crate::validate::normalize_status`] instead.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in-use" | "服役中" => Some(Self::InUse),
            "sold" | "已出售" => Some(Self::Sold),
            "retired" | "已退役" => Some(Self::Retired),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for ItemStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ItemStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown item status '{s}'").into()))
    }
}

/// A persisted belonging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, immutable after creation
    pub id: String,

    /// Display name (non-empty after trimming)
    pub name: String,

    /// Reference into the static category table
    pub category_id: String,

    pub status: ItemStatus,

    /// Purchase price, always > 0
    pub price: f64,

    /// Icon name, resolved through [`crate::icons::resolve_icon`]
    pub icon: String,

    /// Local file URI of the item photo. The file itself is not owned here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Purchase date as `YYYY-MM-DD`
    pub purchase_date: String,
}

/// Generate a fresh item id: Unix millis followed by a 9-char random suffix.
#[must_use]
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = uuid::Uuid::new_v4().simple().to_string()[..9].to_string();
    format!("{millis}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_in_use() {
        assert_eq!(ItemStatus::default(), ItemStatus::InUse);
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in ItemStatus::ALL {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ItemStatus::parse("IN-USE"), None);
    }

    #[test]
    fn test_status_accepts_legacy_labels() {
        assert_eq!(ItemStatus::parse("服役中"), Some(ItemStatus::InUse));
        assert_eq!(ItemStatus::parse("已出售"), Some(ItemStatus::Sold));
        assert_eq!(ItemStatus::parse("已退役"), Some(ItemStatus::Retired));
    }

    #[test]
    fn test_generate_id_shape() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(a.len() >= 13 + 9);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item {
            id: "a".into(),
            name: "Desk".into(),
            category_id: "furniture".into(),
            status: ItemStatus::InUse,
            price: 500.0,
            icon: "table".into(),
            image_path: None,
            description: None,
            purchase_date: "2024-01-10".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["categoryId"], "furniture");
        assert_eq!(json["purchaseDate"], "2024-01-10");
        assert_eq!(json["status"], "in-use");
        assert!(json.get("imagePath").is_none());
    }
}
