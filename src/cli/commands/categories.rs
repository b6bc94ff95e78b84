//! List the fixed category set.

use crate::error::Result;
use crate::icons::resolve_icon;
use crate::model::CATEGORIES;
use serde::Serialize;

#[derive(Serialize)]
struct CategoryOutput<'a> {
    id: &'a str,
    name: &'a str,
    icon: &'a str,
    symbol: &'a str,
}

/// Execute the categories command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = CATEGORIES
            .iter()
            .map(|c| CategoryOutput {
                id: c.id,
                name: c.name,
                icon: c.icon,
                symbol: resolve_icon(c.icon),
            })
            .collect();
        println!("{}", serde_json::to_string(&rows)?);
        return Ok(());
    }

    println!("{:<10} {:<10} ICON", "ID", "NAME");
    for category in CATEGORIES {
        println!(
            "{:<10} {:<10} {}",
            category.id,
            category.name,
            resolve_icon(category.icon)
        );
    }
    Ok(())
}
