//! Per-item and per-list derived values.

use crate::model::Item;
use crate::validate::DATE_FORMAT;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Sum of `price` over `items`.
#[must_use]
pub fn total_value(items: &[Item]) -> f64 {
    items.iter().map(|i| i.price).sum()
}

/// Whole days the item has been owned, at least 1.
///
/// The purchase date counts from midnight UTC. An unparseable date yields 0.
#[must_use]
pub fn days_in_use(purchase_date: &str, now: DateTime<Utc>) -> i64 {
    let Ok(date) = NaiveDate::parse_from_str(purchase_date.trim(), DATE_FORMAT) else {
        return 0;
    };
    let bought = date.and_time(NaiveTime::MIN).and_utc();
    (now - bought).num_days().max(1)
}

/// Price spread over the days in use, rounded; `None` when `days` is 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn daily_value(price: f64, days: i64) -> Option<i64> {
    if days <= 0 {
        return None;
    }
    Some((price / days as f64).round() as i64)
}

/// Display values for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUsage {
    pub days_in_use: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_value: Option<i64>,
}

impl ItemUsage {
    #[must_use]
    pub fn of(item: &Item, now: DateTime<Utc>) -> Self {
        let days_in_use = days_in_use(&item.purchase_date, now);
        Self {
            days_in_use,
            daily_value: daily_value(item.price, days_in_use),
        }
    }
}
