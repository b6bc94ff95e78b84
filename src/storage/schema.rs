//! Database schema definitions and first-run seeding.

use crate::model::{Item, ItemStatus};
use crate::storage::migrations::run_migrations;
use rusqlite::{params, Connection, Result};
use tracing::{debug, info};

/// The SQL schema for the Belongings database.
///
/// Column names are camelCase so the file stays readable by the mobile
/// build that created the first databases.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    categoryId TEXT NOT NULL,
    status TEXT NOT NULL,
    price REAL NOT NULL,
    icon TEXT NOT NULL,
    imagePath TEXT,
    description TEXT,
    purchaseDate TEXT NOT NULL
);
";

/// Apply the schema, then any additive migrations.
///
/// Idempotent and safe to call on every database open.
///
/// # Errors
///
/// Returns an error if the SQL execution fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    run_migrations(conn)?;
    debug!("Schema applied");
    Ok(())
}

/// Example rows written into an empty store.
#[must_use]
pub fn default_items() -> Vec<Item> {
    let digital = |id: &str, name: &str, price: f64, icon: &str, description: &str, date: &str| Item {
        id: id.to_string(),
        name: name.to_string(),
        category_id: "digital".to_string(),
        status: ItemStatus::InUse,
        price,
        icon: icon.to_string(),
        image_path: None,
        description: Some(description.to_string()),
        purchase_date: date.to_string(),
    };

    vec![
        digital("1", "iPhone 17", 8999.0, "smartphone", "Latest iPhone, 256GB storage", "2024-10-15"),
        digital("2", "MacBook Pro", 14999.0, "laptop", "M3 chip, 16GB memory, 512GB storage", "2024-09-20"),
        digital("3", "AirPods Pro", 1899.0, "headphones", "Active noise cancelling, spatial audio", "2024-08-10"),
    ]
}

/// Insert the example rows if the table has none.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns an error if counting or inserting fails.
pub fn seed_if_empty(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    let items = default_items();
    for item in &items {
        conn.execute(
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
        )?;
    }

    info!(count = items.len(), "Seeded example items");
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM pragma_table_info('items') ORDER BY cid")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_apply_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("Failed to apply schema");

        assert_eq!(
            columns(&conn),
            vec![
                "id",
                "name",
                "categoryId",
                "status",
                "price",
                "icon",
                "imagePath",
                "description",
                "purchaseDate"
            ]
        );
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        apply_schema(&conn).expect("First apply failed");
        apply_schema(&conn).expect("Second apply failed");
    }

    #[test]
    fn test_seed_only_when_empty() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        assert_eq!(seed_if_empty(&conn).unwrap(), 3);
        assert_eq!(seed_if_empty(&conn).unwrap(), 0);

        let ids: Vec<String> = conn
            .prepare("SELECT id FROM items ORDER BY id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_primary_key_rejects_duplicates() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        seed_if_empty(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO items (id, name, categoryId, status, price, icon, purchaseDate)
             VALUES ('1', 'Dup', 'digital', 'in-use', 1.0, 'package', '2024-01-01')",
            [],
        );
        assert!(result.is_err());
    }
}
