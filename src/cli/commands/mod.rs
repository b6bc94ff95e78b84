//! Command implementations.

pub mod categories;
pub mod completions;
pub mod init;
pub mod item;
pub mod stats;
pub mod version;

use crate::config::{resolve_db_path, StoreOptions};
use crate::error::{Error, Result};
use crate::storage::ItemRepository;
use std::path::PathBuf;

/// Open the existing item store for a command.
///
/// Commands never create the database; `bl init` does. The store is opened
/// without seeding so an emptied inventory stays empty.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no database file exists, and
/// [`Error::StorageUnavailable`] if it cannot be opened.
pub async fn open_repository(
    db_path: Option<&PathBuf>,
    busy_timeout_ms: Option<u64>,
) -> Result<ItemRepository> {
    let db_path = resolve_db_path(db_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    let options = StoreOptions::without_seed().with_busy_timeout_ms(busy_timeout_ms);
    let repo = ItemRepository::file(&db_path, options);
    repo.initialize().await?;
    Ok(repo)
}

/// Format a price without trailing `.00` for whole amounts.
pub(crate) fn format_money(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(8999.0), "8999");
        assert_eq!(format_money(12.5), "12.50");
        assert_eq!(format_money(0.0), "0");
    }

    #[tokio::test]
    async fn test_open_repository_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing.db");

        let result = open_repository(Some(&db_path), None).await;
        assert!(matches!(result, Err(Error::NotInitialized)));
        assert!(!db_path.exists());
    }
}
