//! State behind the item list: category filter, loaded items, totals.

use crate::error::Result;
use crate::model::Item;
use crate::storage::ItemRepository;
use crate::view::usage::{total_value, ItemUsage};
use tracing::warn;

/// Items currently shown, optionally filtered to one category.
#[derive(Debug)]
pub struct ItemsView {
    repo: ItemRepository,
    category: Option<String>,
    items: Vec<Item>,
}

impl ItemsView {
    #[must_use]
    pub fn new(repo: ItemRepository) -> Self {
        Self {
            repo,
            category: None,
            items: Vec::new(),
        }
    }

    /// Set the category filter. `None` shows everything.
    ///
    /// Takes effect on the next [`Self::refresh`].
    pub fn select_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Reload items for the current filter.
    ///
    /// On failure the previously loaded items are kept.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let loaded = match &self.category {
            Some(category) => self.repo.get_by_category(category).await,
            None => self.repo.get_all().await,
        };

        match loaded {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Loading items failed");
                Err(e)
            }
        }
    }

    /// Delete an item, then reload the list.
    ///
    /// Returns whether anything was deleted.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged; the list is left as it was.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let deleted = self.repo.delete(id).await?;
        self.refresh().await?;
        Ok(deleted)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Total value of the items currently shown.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        total_value(&self.items)
    }

    /// Days-in-use figures for one item, relative to the repository clock.
    #[must_use]
    pub fn usage(&self, item: &Item) -> ItemUsage {
        ItemUsage::of(item, self.repo.clock().now())
    }
}
