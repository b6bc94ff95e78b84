//! Summary statistics for the profile page.

use crate::error::Result;
use crate::model::TrendPoint;
use crate::storage::ItemRepository;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub total_count: usize,
    pub this_month_count: usize,
    pub trend: Vec<TrendPoint>,
}

impl ProfileSummary {
    /// Value at the most recent trend point.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.trend.last().map_or(0.0, |p| p.value)
    }
}

#[derive(Debug, Clone)]
pub struct ProfileView {
    repo: ItemRepository,
}

impl ProfileView {
    #[must_use]
    pub fn new(repo: ItemRepository) -> Self {
        Self { repo }
    }

    /// Load the three aggregates together.
    ///
    /// # Errors
    ///
    /// Returns the first repository error.
    pub async fn load(&self) -> Result<ProfileSummary> {
        let (total_count, this_month_count, trend) = tokio::try_join!(
            self.repo.total_count(),
            self.repo.this_month_new_items_count(),
            self.repo.last_6_months_trend(),
        )?;

        Ok(ProfileSummary {
            total_count,
            this_month_count,
            trend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::StoreOptions;
    use crate::error::Error;
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_load_seeded_store() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 10, 20).unwrap());
        let repo = ItemRepository::in_memory(StoreOptions::default()).with_clock(Arc::new(clock));
        repo.initialize().await.unwrap();

        let summary = ProfileView::new(repo).load().await.unwrap();
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.this_month_count, 1);

        let months: Vec<&str> = summary.trend.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(
            months,
            vec!["2024-05", "2024-06", "2024-07", "2024-08", "2024-09", "2024-10"]
        );
        let values: Vec<f64> = summary.trend.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 1899.0, 16898.0, 25897.0]);
        assert_eq!(summary.current_value(), 25897.0);
    }

    #[tokio::test]
    async fn test_load_requires_initialize() {
        let repo = ItemRepository::in_memory(StoreOptions::default());
        let err = ProfileView::new(repo).load().await.unwrap_err();
        assert!(matches!(err, Error::NotInitialized));
    }
}
