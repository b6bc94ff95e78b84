//! Async item repository.
//!
//! [`ItemRepository`] owns the storage handle for its whole lifetime. It is
//! built once at startup, opened with [`ItemRepository::initialize`], and
//! handed to whatever needs items. Every call runs on tokio's blocking pool
//! against a single connection and completes (or fails) before its result
//! is returned. Overlapping calls are serialized by the connection mutex.

use crate::clock::{Clock, SystemClock};
use crate::config::StoreOptions;
use crate::error::{Error, Result};
use crate::model::{Item, TrendPoint};
use crate::storage::sqlite::SqliteStorage;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Where the repository keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    File(PathBuf),
    /// Private in-memory database, gone on close
    Memory,
}

impl StoreTarget {
    fn display_path(&self) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Memory => PathBuf::from(":memory:"),
        }
    }
}

/// Lifecycle-managed, async access to the `items` table.
#[derive(Clone)]
pub struct ItemRepository {
    target: StoreTarget,
    options: StoreOptions,
    clock: Arc<dyn Clock>,
    storage: Arc<Mutex<Option<SqliteStorage>>>,
}

impl std::fmt::Debug for ItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRepository")
            .field("target", &self.target)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ItemRepository {
    /// Create an unopened repository using the system clock.
    #[must_use]
    pub fn new(target: StoreTarget, options: StoreOptions) -> Self {
        Self {
            target,
            options,
            clock: Arc::new(SystemClock),
            storage: Arc::new(Mutex::new(None)),
        }
    }

    /// Repository backed by a database file.
    #[must_use]
    pub fn file(path: impl AsRef<Path>, options: StoreOptions) -> Self {
        Self::new(StoreTarget::File(path.as_ref().to_path_buf()), options)
    }

    /// Repository backed by a private in-memory database.
    #[must_use]
    pub fn in_memory(options: StoreOptions) -> Self {
        Self::new(StoreTarget::Memory, options)
    }

    /// Replace the clock used for month aggregation.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    #[must_use]
    pub fn target(&self) -> &StoreTarget {
        &self.target
    }

    /// Open the store: create the table, run migrations, seed if empty.
    ///
    /// Calling it again on an open repository does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the store cannot be opened
    /// or prepared.
    pub async fn initialize(&self) -> Result<()> {
        if self.is_initialized()? {
            return Ok(());
        }

        let target = self.target.clone();
        let options = self.options.clone();
        let opened = tokio::task::spawn_blocking(move || match &target {
            StoreTarget::File(path) => SqliteStorage::open(path, &options),
            StoreTarget::Memory => SqliteStorage::open_memory(&options),
        })
        .await?;

        let storage = opened.map_err(|e| {
            error!(error = %e, "Item store initialization failed");
            Error::StorageUnavailable {
                path: self.target.display_path(),
                reason: e.to_string(),
            }
        })?;

        let mut slot = lock(&self.storage)?;
        if slot.is_none() {
            *slot = Some(storage);
            info!(store = ?self.target, "Item repository ready");
        }
        Ok(())
    }

    /// Close the store. Later calls fail with [`Error::NotInitialized`]
    /// until [`Self::initialize`] runs again.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage lock is poisoned.
    pub fn close(&self) -> Result<()> {
        if lock(&self.storage)?.take().is_some() {
            debug!("Item repository closed");
        }
        Ok(())
    }

    /// Whether [`Self::initialize`] has completed and the store is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage lock is poisoned.
    pub fn is_initialized(&self) -> Result<bool> {
        Ok(lock(&self.storage)?.is_some())
    }

    /// Run `f` against the open store on the blocking pool.
    async fn run<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&SqliteStorage) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || {
            let guard = lock(&storage)?;
            let store = guard.as_ref().ok_or(Error::NotInitialized)?;
            f(store)
        })
        .await?
    }

    // ==================
    // CRUD
    // ==================

    /// Insert a new item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the id already exists.
    pub async fn insert(&self, item: &Item) -> Result<()> {
        let item = item.clone();
        self.run(move |s| s.insert_item(&item)).await
    }

    /// All items, newest purchase first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Item>> {
        self.run(SqliteStorage::get_all_items).await
    }

    /// Items whose category id equals `category_id` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_by_category(&self, category_id: &str) -> Result<Vec<Item>> {
        let category_id = category_id.to_string();
        self.run(move |s| s.get_items_by_category(&category_id)).await
    }

    /// Replace all fields of the item with the same id.
    ///
    /// Returns `false` when no row has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(&self, item: &Item) -> Result<bool> {
        let item = item.clone();
        self.run(move |s| s.update_item(&item)).await
    }

    /// Hard-delete the item with `id`. Returns `false` when it was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.run(move |s| s.delete_item(&id)).await
    }

    // ==================
    // Aggregates
    // ==================

    /// Number of stored items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn total_count(&self) -> Result<usize> {
        self.run(SqliteStorage::count_items).await
    }

    /// Items bought during the clock's current calendar month.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn this_month_new_items_count(&self) -> Result<usize> {
        let today = self.clock.today();
        self.run(move |s| s.count_items_in_month(today)).await
    }

    /// Cumulative value at the end of each of the last six months,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn last_6_months_trend(&self) -> Result<Vec<TrendPoint>> {
        let today = self.clock.today();
        self.run(move |s| s.value_trend(today)).await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| Error::Other("item store lock poisoned".to_string()))
}
