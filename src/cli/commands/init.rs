//! Create the item database.
//!
//! The database lives at `~/.belongings/data/items.db` unless `--db` or
//! `BELONGINGS_DB` points elsewhere. A fresh database is seeded with three
//! example items; `--empty` skips them.

use crate::config::{resolve_db_path, StoreOptions};
use crate::error::{Error, Result};
use crate::storage::ItemRepository;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    items: usize,
    recreated: bool,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if the database exists and `force`
/// is not set, or a storage error if it cannot be created.
pub async fn execute(
    db_path: Option<&PathBuf>,
    busy_timeout_ms: Option<u64>,
    force: bool,
    empty: bool,
    json: bool,
) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(|p| p.as_path())).ok_or_else(|| {
        Error::Config("Could not determine the home directory for the database".to_string())
    })?;

    let existed = db_path.exists();
    if existed && !force {
        return Err(Error::AlreadyInitialized { path: db_path });
    }
    if existed {
        fs::remove_file(&db_path)?;
    }

    let options = if empty {
        StoreOptions::without_seed()
    } else {
        StoreOptions::default()
    }
    .with_busy_timeout_ms(busy_timeout_ms);

    let repo = ItemRepository::file(&db_path, options);
    repo.initialize().await?;
    let items = repo.total_count().await?;
    repo.close()?;

    if crate::is_quiet() {
        return Ok(());
    }

    if json {
        let output = InitOutput {
            database: db_path,
            items,
            recreated: existed,
        };
        let payload = serde_json::to_string(&output)?;
        println!("{payload}");
    } else {
        println!("Initialized item database");
        println!("  Database: {}", db_path.display());
        println!("  Items:    {items}");
        println!();
        println!("Next: add something with 'bl add <name> --category <id> --price <amount>'.");
    }

    Ok(())
}
