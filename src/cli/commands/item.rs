//! Item command implementations: add, list, edit, delete.

use crate::cli::commands::{format_money, open_repository};
use crate::cli::{AddArgs, EditArgs};
use crate::error::{Error, Result};
use crate::icons::resolve_icon;
use crate::model::{Item, ItemStatus};
use crate::validate::{find_similar_ids, resolve_category};
use crate::view::{ItemDraft, ItemForm, ItemUsage, ItemsView};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::path::PathBuf;

/// Output for list command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    items: Vec<ListedItem<'a>>,
    count: usize,
    total_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

#[derive(Serialize)]
struct ListedItem<'a> {
    #[serde(flatten)]
    item: &'a Item,
    #[serde(flatten)]
    usage: ItemUsage,
}

#[derive(Serialize)]
struct DeleteOutput<'a> {
    id: &'a str,
    deleted: bool,
}

/// Execute the add command.
///
/// # Errors
///
/// Returns a validation error for bad input, or a storage error.
pub async fn execute_add(
    args: &AddArgs,
    db_path: Option<&PathBuf>,
    busy_timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db_path, busy_timeout_ms).await?;
    let form = ItemForm::new(repo);

    let draft = ItemDraft {
        name: args.name.clone(),
        category_id: args.category.clone(),
        status: args.status.clone(),
        price: args.price.clone(),
        image_path: args.image.clone(),
        description: args.description.clone(),
        purchase_date: args.date.clone(),
    };
    let item = form.submit(&draft, None).await?;

    if crate::is_quiet() {
        println!("{}", item.id);
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string(&item)?);
    } else {
        println!("Added {} ({})", item.name.bold(), item.id);
    }
    Ok(())
}

/// Execute the list command.
///
/// # Errors
///
/// Returns [`Error::UnknownCategory`] for a bad filter, or a storage error.
pub async fn execute_list(
    category: Option<&str>,
    db_path: Option<&PathBuf>,
    busy_timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let category = category.map(resolve_category).transpose()?;

    let repo = open_repository(db_path, busy_timeout_ms).await?;
    let mut view = ItemsView::new(repo);
    view.select_category(category.map(|c| c.id.to_string()));
    view.refresh().await?;

    if json {
        let items: Vec<_> = view
            .items()
            .iter()
            .map(|item| ListedItem {
                item,
                usage: view.usage(item),
            })
            .collect();
        let output = ListOutput {
            count: items.len(),
            items,
            total_value: view.total_value(),
            category: view.selected_category(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if view.items().is_empty() {
        println!("No items.");
        return Ok(());
    }

    println!(
        "{:<22} {:<24} {:<10} {:<9} {:>10} {:<10} {:>6} {:>8}",
        "ID", "NAME", "CATEGORY", "STATUS", "PRICE", "BOUGHT", "DAYS", "PER DAY"
    );
    for item in view.items() {
        let usage = view.usage(item);
        let per_day = usage
            .daily_value
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{:<22} {:<24} {:<10} {} {:>10} {:<10} {:>6} {:>8}",
            item.id,
            truncate(&item.name, 24),
            item.category_id,
            status_colored(item.status),
            format_money(item.price),
            item.purchase_date,
            usage.days_in_use,
            per_day
        );
        if let Some(description) = &item.description {
            println!("{:<22} {} {}", "", resolve_icon(&item.icon).dimmed(), description.dimmed());
        }
    }
    println!();
    println!(
        "{} items, total value {}",
        view.items().len(),
        format_money(view.total_value()).bold()
    );

    Ok(())
}

/// Execute the edit command.
///
/// Unset flags keep the item's current values.
///
/// # Errors
///
/// Returns [`Error::ItemNotFound`] (with similar ids) for an unknown id,
/// a validation error for bad input, or a storage error.
pub async fn execute_edit(
    args: &EditArgs,
    db_path: Option<&PathBuf>,
    busy_timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db_path, busy_timeout_ms).await?;
    let items = repo.get_all().await?;
    let existing = find_item(&items, &args.id)?;

    let mut draft = ItemDraft::from_item(existing);
    if let Some(name) = &args.name {
        draft.name.clone_from(name);
    }
    if let Some(category) = &args.category {
        draft.category_id.clone_from(category);
    }
    if let Some(price) = &args.price {
        draft.price.clone_from(price);
    }
    if args.status.is_some() {
        draft.status.clone_from(&args.status);
    }
    if args.date.is_some() {
        draft.purchase_date.clone_from(&args.date);
    }
    if args.description.is_some() {
        draft.description.clone_from(&args.description);
    }
    if args.image.is_some() {
        draft.image_path.clone_from(&args.image);
    }

    let item = ItemForm::new(repo).submit(&draft, Some(existing)).await?;

    if crate::is_quiet() {
        println!("{}", item.id);
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string(&item)?);
    } else {
        println!("Updated {} ({})", item.name.bold(), item.id);
    }
    Ok(())
}

/// Execute the delete command. Deleting an unknown id is not an error.
///
/// # Errors
///
/// Returns a storage error.
pub async fn execute_delete(
    id: &str,
    db_path: Option<&PathBuf>,
    busy_timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db_path, busy_timeout_ms).await?;
    let deleted = ItemsView::new(repo).delete(id).await?;

    if crate::is_quiet() {
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string(&DeleteOutput { id, deleted })?);
    } else if deleted {
        println!("Deleted {id}");
    } else {
        println!("No item with id {id}; nothing deleted");
    }
    Ok(())
}

fn find_item<'a>(items: &'a [Item], id: &str) -> Result<&'a Item> {
    items.iter().find(|i| i.id == id).ok_or_else(|| {
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        Error::ItemNotFound {
            id: id.to_string(),
            similar: find_similar_ids(id, &ids, 3),
        }
    })
}

fn status_colored(status: ItemStatus) -> ColoredString {
    let text = format!("{:<9}", status.as_str());
    match status {
        ItemStatus::InUse => text.green(),
        ItemStatus::Sold => text.yellow(),
        ItemStatus::Retired => text.dimmed(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
