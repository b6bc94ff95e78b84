//! SQLite storage implementation.
//!
//! Synchronous access to the `items` table. [`super::ItemRepository`] wraps
//! this in an async, lifecycle-managed API; use that from application code.

use crate::config::StoreOptions;
use crate::error::{Error, Result};
use crate::model::{Item, TrendPoint};
use crate::storage::schema::{apply_schema, seed_if_empty};
use chrono::{Datelike, Months, NaiveDate};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::{debug, info};

/// Number of monthly samples in the value trend.
pub const TREND_MONTHS: u32 = 6;

const SELECT_ITEM_COLUMNS: &str =
    "SELECT id, name, categoryId, status, price, icon, imagePath, description, purchaseDate FROM items";

/// Rows whose purchase date is a canonical `YYYY-MM-DD` calendar date.
///
/// Aggregates compare dates as strings, so malformed values are left out.
const WELL_FORMED_DATE: &str = "date(purchaseDate) IS purchaseDate";

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the file (and its parent directory) if needed, applies the
    /// schema and migrations, and seeds example rows into an empty table
    /// when `options.seed_defaults` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path, options: &StoreOptions) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let storage = Self::prepare(conn, options)?;
        info!(path = %path.display(), "Opened item store");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory(options: &StoreOptions) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, options)
    }

    fn prepare(conn: Connection, options: &StoreOptions) -> Result<Self> {
        conn.busy_timeout(options.busy_timeout)?;
        apply_schema(&conn)?;
        if options.seed_defaults {
            seed_if_empty(&conn)?;
        }
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ==================
    // Item Operations
    // ==================

    /// Insert a new item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the id is already taken.
    pub fn insert_item(&self, item: &Item) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO items (id, name, categoryId, status, price, icon, imagePath, description, purchaseDate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.name,
                item.category_id,
                item.status,
                item.price,
                item.icon,
                item.image_path,
                item.description,
                item.purchase_date,
            ],
        );

        match result {
            Ok(_) => {
                debug!(id = %item.id, "Inserted item");
                Ok(())
            }
            Err(e) if Error::is_constraint_violation(&e) => Err(Error::ConstraintViolation {
                id: item.id.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Get every item, newest purchase first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row does not decode.
    pub fn get_all_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_ITEM_COLUMNS} ORDER BY purchaseDate DESC, rowid ASC"))?;
        let items = stmt
            .query_map([], map_item_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Get the items in one category, newest purchase first.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row does not decode.
    pub fn get_items_by_category(&self, category_id: &str) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_ITEM_COLUMNS} WHERE categoryId = ?1 ORDER BY purchaseDate DESC, rowid ASC"
        ))?;
        let items = stmt
            .query_map([category_id], map_item_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Replace every field of the item with the same id.
    ///
    /// Returns `false` if no row has that id; nothing is written then.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_item(&self, item: &Item) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE items
             SET name = ?1, categoryId = ?2, status = ?3, price = ?4, icon = ?5, imagePath = ?6, description = ?7, purchaseDate = ?8
             WHERE id = ?9",
            params![
                item.name,
                item.category_id,
                item.status,
                item.price,
                item.icon,
                item.image_path,
                item.description,
                item.purchase_date,
                item.id,
            ],
        )?;

        debug!(id = %item.id, changed, "Updated item");
        Ok(changed > 0)
    }

    /// Delete the item with the given id.
    ///
    /// Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_item(&self, id: &str) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM items WHERE id = ?1", [id])?;
        debug!(id, changed, "Deleted item");
        Ok(changed > 0)
    }

    // ==================
    // Aggregates
    // ==================

    /// Count all items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_items(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Count the items bought in the calendar month containing `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_items_in_month(&self, today: NaiveDate) -> Result<usize> {
        let start = month_start(today);
        let end = next_month_start(start);

        let count: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM items
                 WHERE {WELL_FORMED_DATE} AND purchaseDate >= ?1 AND purchaseDate < ?2"
            ),
            params![format_date(start), format_date(end)],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Cumulative value of all items at the end of each of the last six
    /// months (the month containing `today` included), oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn value_trend(&self, today: NaiveDate) -> Result<Vec<TrendPoint>> {
        let current = month_start(today);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT COALESCE(SUM(price), 0.0) FROM items
             WHERE {WELL_FORMED_DATE} AND purchaseDate < ?1"
        ))?;

        let mut points = Vec::with_capacity(TREND_MONTHS as usize);
        for back in (0..TREND_MONTHS).rev() {
            let start = current
                .checked_sub_months(Months::new(back))
                .unwrap_or(current);
            let value: f64 =
                stmt.query_row([format_date(next_month_start(start))], |row| row.get(0))?;
            points.push(TrendPoint {
                month: start.format("%Y-%m").to_string(),
                value,
            });
        }

        Ok(points)
    }
}

// Helper to map item rows
fn map_item_row(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        category_id: row.get(2)?,
        status: row.get(3)?,
        price: row.get(4)?,
        icon: row.get(5)?,
        image_path: row.get(6)?,
        description: row.get(7)?,
        purchase_date: row.get(8)?,
    })
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month_start(start: NaiveDate) -> NaiveDate {
    start.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

fn format_date(date: NaiveDate) -> String {
    date.format(crate::validate::DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::model::ItemStatus;

    fn empty_store() -> SqliteStorage {
        SqliteStorage::open_memory(&StoreOptions::without_seed()).unwrap()
    }

    fn item(id: &str, category: &str, price: f64, date: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {id}"),
            category_id: category.to_string(),
            status: ItemStatus::InUse,
            price,
            icon: "package".to_string(),
            image_path: None,
            description: None,
            purchase_date: date.to_string(),
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_memory_seeds_by_default() {
        let storage = SqliteStorage::open_memory(&StoreOptions::default()).unwrap();
        assert_eq!(storage.count_items().unwrap(), 3);
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let storage = empty_store();
        let mut original = item("a", "furniture", 500.0, "2024-01-10");
        original.status = ItemStatus::Retired;
        original.image_path = Some("file:///photos/desk.jpg".to_string());
        original.description = Some("Standing desk".to_string());

        storage.insert_item(&original).unwrap();
        let all = storage.get_all_items().unwrap();
        assert_eq!(all, vec![original]);
    }

    #[test]
    fn test_duplicate_insert_is_constraint_violation() {
        let storage = empty_store();
        storage.insert_item(&item("a", "book", 10.0, "2024-01-01")).unwrap();

        let err = storage
            .insert_item(&item("a", "book", 20.0, "2024-02-01"))
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation { ref id } if id == "a"));
        assert_eq!(storage.count_items().unwrap(), 1);
    }

    #[test]
    fn test_get_all_orders_by_purchase_date_desc() {
        let storage = empty_store();
        storage.insert_item(&item("a", "furniture", 500.0, "2024-01-10")).unwrap();
        storage.insert_item(&item("b", "furniture", 300.0, "2024-03-01")).unwrap();
        storage.insert_item(&item("c", "book", 20.0, "2023-12-31")).unwrap();
        storage.insert_item(&item("d", "book", 25.0, "2024-03-01")).unwrap();

        let all = storage.get_all_items().unwrap();
        assert_eq!(ids(&all), vec!["b", "d", "a", "c"]);
        assert!(all.windows(2).all(|w| w[0].purchase_date >= w[1].purchase_date));
    }

    #[test]
    fn test_get_by_category_is_exact_subset() {
        let storage = empty_store();
        storage.insert_item(&item("a", "furniture", 500.0, "2024-01-10")).unwrap();
        storage.insert_item(&item("b", "book", 300.0, "2024-03-01")).unwrap();
        storage.insert_item(&item("c", "furniture", 20.0, "2024-02-01")).unwrap();
        storage.insert_item(&item("d", "Furniture", 20.0, "2024-02-02")).unwrap();

        let furniture = storage.get_items_by_category("furniture").unwrap();
        assert_eq!(ids(&furniture), vec!["c", "a"]);

        let expected: Vec<Item> = storage
            .get_all_items()
            .unwrap()
            .into_iter()
            .filter(|i| i.category_id == "furniture")
            .collect();
        assert_eq!(furniture, expected);

        assert!(storage.get_items_by_category("furn").unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_fields() {
        let storage = empty_store();
        storage.insert_item(&item("a", "furniture", 500.0, "2024-01-10")).unwrap();
        storage.insert_item(&item("b", "furniture", 300.0, "2024-03-01")).unwrap();

        let mut changed = item("a", "furniture", 600.0, "2024-01-10");
        changed.status = ItemStatus::Sold;
        assert!(storage.update_item(&changed).unwrap());

        let all = storage.get_all_items().unwrap();
        assert_eq!(all.iter().filter(|i| i.id == "a").count(), 1);
        let a = all.iter().find(|i| i.id == "a").unwrap();
        assert_eq!(a.price, 600.0);
        assert_eq!(a.status, ItemStatus::Sold);
        let b = all.iter().find(|i| i.id == "b").unwrap();
        assert_eq!(b.price, 300.0);
    }

    #[test]
    fn test_update_missing_id_changes_nothing() {
        let storage = empty_store();
        storage.insert_item(&item("a", "book", 10.0, "2024-01-01")).unwrap();

        assert!(!storage.update_item(&item("zzz", "book", 99.0, "2024-01-01")).unwrap());
        assert_eq!(storage.count_items().unwrap(), 1);
        assert_eq!(storage.get_all_items().unwrap()[0].price, 10.0);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let storage = empty_store();
        storage.insert_item(&item("a", "book", 10.0, "2024-01-01")).unwrap();

        assert!(storage.delete_item("a").unwrap());
        assert!(storage.get_all_items().unwrap().is_empty());
        assert!(!storage.delete_item("a").unwrap());
    }

    #[test]
    fn test_count_items_in_month() {
        let storage = empty_store();
        storage.insert_item(&item("a", "book", 10.0, "2024-03-01")).unwrap();
        storage.insert_item(&item("b", "book", 10.0, "2024-03-31")).unwrap();
        storage.insert_item(&item("c", "book", 10.0, "2024-02-29")).unwrap();
        storage.insert_item(&item("d", "book", 10.0, "2024-04-01")).unwrap();
        storage.insert_item(&item("e", "book", 10.0, "2024-03-xx")).unwrap();

        let count = storage.count_items_in_month(ymd(2024, 3, 15)).unwrap();
        assert_eq!(count, 2);
        assert!(count <= storage.count_items().unwrap());
    }

    #[test]
    fn test_value_trend_is_cumulative() {
        let storage = empty_store();
        storage.insert_item(&item("old", "book", 100.0, "2023-06-15")).unwrap();
        storage.insert_item(&item("a", "book", 500.0, "2024-01-10")).unwrap();
        storage.insert_item(&item("b", "book", 300.0, "2024-03-01")).unwrap();
        storage.insert_item(&item("c", "book", 50.0, "2024-03-31")).unwrap();
        storage.insert_item(&item("future", "book", 999.0, "2024-05-01")).unwrap();
        storage.insert_item(&item("bad", "book", 7.0, "not-a-date")).unwrap();

        let trend = storage.value_trend(ymd(2024, 4, 20)).unwrap();
        let months: Vec<&str> = trend.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(
            months,
            vec!["2023-11", "2023-12", "2024-01", "2024-02", "2024-03", "2024-04"]
        );
        let values: Vec<f64> = trend.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 100.0, 600.0, 600.0, 950.0, 950.0]);
    }

    #[test]
    fn test_value_trend_crosses_year_boundary() {
        let storage = empty_store();
        let trend = storage.value_trend(ymd(2025, 2, 28)).unwrap();
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].month, "2024-09");
        assert_eq!(trend[5].month, "2025-02");
        assert!(trend.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_unknown_status_fails_decode() {
        let storage = empty_store();
        storage
            .conn()
            .execute(
                "INSERT INTO items (id, name, categoryId, status, price, icon, purchaseDate)
                 VALUES ('x', 'Mystery', 'other', 'lost', 1.0, 'package', '2024-01-01')",
                [],
            )
            .unwrap();

        let err = storage.get_all_items().unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::DecodeError);
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("items.db");

        let storage = SqliteStorage::open(&path, &StoreOptions::default()).unwrap();
        assert_eq!(storage.count_items().unwrap(), 3);
        assert!(path.exists());
    }
}
