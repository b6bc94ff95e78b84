//! Configuration management.
//!
//! Resolves where the item database lives and how it is opened.
//!
//! The database is a single file, by default at
//! `~/.belongings/data/items.db`.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default SQLite busy timeout.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// How the item store is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Write the example items into an empty store on first open.
    pub seed_defaults: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            seed_defaults: true,
        }
    }
}

impl StoreOptions {
    /// Options for a store that starts out empty.
    #[must_use]
    pub fn without_seed() -> Self {
        Self {
            seed_defaults: false,
            ..Self::default()
        }
    }

    /// Override the busy timeout, in milliseconds.
    #[must_use]
    pub fn with_busy_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if let Some(ms) = timeout_ms {
            self.busy_timeout = Duration::from_millis(ms);
        }
        self
    }
}

/// Get the global Belongings directory location (`~/.belongings/`).
#[must_use]
pub fn global_belongings_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".belongings"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `BELONGINGS_TEST_DB=1` (or any non-empty
/// value other than `0`/`false`). It redirects the default database to an
/// isolated test file.
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("BELONGINGS_TEST_DB").is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Get the test database path (`~/.belongings/test/items.db`).
#[must_use]
pub fn test_db_path() -> Option<PathBuf> {
    global_belongings_dir().map(|dir| dir.join("test").join("items.db"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `BELONGINGS_TEST_DB` environment variable → uses test database
/// 3. `BELONGINGS_DB` environment variable
/// 4. Global location: `~/.belongings/data/items.db`
///
/// Returns `None` if no home directory can be determined.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if is_test_mode() {
        return test_db_path();
    }

    if let Ok(db_path) = std::env::var("BELONGINGS_DB") {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    global_belongings_dir().map(|dir| dir.join("data").join("items.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/items.db");
        let result = resolve_db_path(Some(&explicit));
        assert_eq!(result, Some(explicit));
    }

    #[test]
    fn test_resolve_db_path_default_file_name() {
        let path = resolve_db_path(None).expect("home directory");
        assert!(path.ends_with("items.db"));
    }

    #[test]
    fn test_test_db_path_is_separate() {
        let global = global_belongings_dir().unwrap();
        let test = test_db_path().unwrap();

        assert!(test.starts_with(global.join("test")));
        assert_ne!(global.join("data").join("items.db"), test);
    }

    #[test]
    fn test_truthy_parsing() {
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("FALSE"));
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
    }

    #[test]
    fn test_store_options() {
        let options = StoreOptions::without_seed().with_busy_timeout_ms(Some(250));
        assert!(!options.seed_defaults);
        assert_eq!(options.busy_timeout, Duration::from_millis(250));
        assert_eq!(
            StoreOptions::default().with_busy_timeout_ms(None).busy_timeout,
            DEFAULT_BUSY_TIMEOUT
        );
    }
}
