//! Version command implementation.

use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Print the crate version.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) { "dev" } else { "release" };

    if json {
        let payload = serde_json::to_string(&VersionOutput {
            name: env!("CARGO_PKG_NAME"),
            version,
            build,
        })?;
        println!("{payload}");
    } else {
        println!("bl {version} ({build})");
    }

    Ok(())
}
