//! Additive column migrations.
//!
//! The only supported migration kind adds a column. Each one is attempted on
//! every open; a "duplicate column name" failure means it already ran and is
//! ignored. No version table is kept.

use rusqlite::{Connection, Result};
use tracing::{debug, info};

/// A column added after the first release of the `items` table.
struct AddColumn {
    table: &'static str,
    column: &'static str,
    definition: &'static str,
}

/// All additive migrations, in order.
const MIGRATIONS: &[AddColumn] = &[AddColumn {
    table: "items",
    column: "imagePath",
    definition: "TEXT",
}];

/// Apply every additive migration.
///
/// Returns how many columns were actually added.
///
/// # Errors
///
/// Returns an error if an `ALTER TABLE` fails for any reason other than the
/// column already existing.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    let mut added = 0;

    for migration in MIGRATIONS {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            migration.table, migration.column, migration.definition
        );

        match conn.execute_batch(&sql) {
            Ok(()) => {
                info!(table = migration.table, column = migration.column, "Added column");
                added += 1;
            }
            Err(e) if e.to_string().contains("duplicate column name") => {
                debug!(table = migration.table, column = migration.column, "Column exists, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Table shape from before photos were supported.
    const LEGACY_ITEMS_SQL: &str = "CREATE TABLE items (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        categoryId TEXT NOT NULL,
        status TEXT NOT NULL,
        price REAL NOT NULL,
        icon TEXT NOT NULL,
        description TEXT,
        purchaseDate TEXT NOT NULL
    )";

    fn has_image_path(conn: &Connection) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info('items') WHERE name = 'imagePath'",
            [],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_migration_adds_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(LEGACY_ITEMS_SQL).unwrap();
        conn.execute(
            "INSERT INTO items VALUES ('old', 'Lamp', 'furniture', 'in-use', 120.0, 'lamp', NULL, '2023-05-02')",
            [],
        )
        .unwrap();

        assert_eq!(run_migrations(&conn).unwrap(), 1);
        assert!(has_image_path(&conn));

        // Existing rows survive with a NULL photo
        let image: Option<String> = conn
            .query_row("SELECT imagePath FROM items WHERE id = 'old'", [], |row| row.get(0))
            .unwrap();
        assert!(image.is_none());
    }

    #[test]
    fn test_run_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(LEGACY_ITEMS_SQL).unwrap();

        assert_eq!(run_migrations(&conn).unwrap(), 1);
        assert_eq!(run_migrations(&conn).unwrap(), 0);
        assert!(has_image_path(&conn));
    }

    #[test]
    fn test_missing_table_is_a_real_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(run_migrations(&conn).is_err());
    }
}
