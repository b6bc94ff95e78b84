//! Add/edit flow: validate raw input, build the item, save it.

use crate::error::{Error, Result};
use crate::model::{generate_id, Item, ItemStatus};
use crate::storage::ItemRepository;
use crate::validate::{
    normalize_status, parse_price, parse_purchase_date, resolve_category, validate_name,
    DATE_FORMAT,
};
use tracing::info;

/// Unvalidated form input. Text fields hold exactly what was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category_id: String,
    /// Defaults to in-use
    pub status: Option<String>,
    pub price: String,
    pub image_path: Option<String>,
    pub description: Option<String>,
    /// Defaults to the clock's current date
    pub purchase_date: Option<String>,
}

impl ItemDraft {
    /// Prefill a draft from an existing item, for editing.
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category_id: item.category_id.clone(),
            status: Some(item.status.as_str().to_string()),
            price: item.price.to_string(),
            image_path: item.image_path.clone(),
            description: item.description.clone(),
            purchase_date: Some(item.purchase_date.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemForm {
    repo: ItemRepository,
}

impl ItemForm {
    #[must_use]
    pub fn new(repo: ItemRepository) -> Self {
        Self { repo }
    }

    /// Validate `draft` and turn it into an item.
    ///
    /// When `editing` is given the item keeps its id; otherwise a new id is
    /// generated. The icon is the category's icon. A missing purchase date
    /// defaults to the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid field.
    pub fn build(&self, draft: &ItemDraft, editing: Option<&Item>) -> Result<Item> {
        let name = validate_name(&draft.name)?;
        let category = resolve_category(&draft.category_id)?;
        let price = parse_price(&draft.price)?;
        let status = match draft.status.as_deref() {
            Some(s) if !s.trim().is_empty() => normalize_status(s)?,
            _ => ItemStatus::default(),
        };
        let purchase_date = match draft.purchase_date.as_deref() {
            Some(d) if !d.trim().is_empty() => parse_purchase_date(d)?,
            _ => self.repo.clock().today(),
        };

        Ok(Item {
            id: editing.map_or_else(generate_id, |e| e.id.clone()),
            name,
            category_id: category.id.to_string(),
            status,
            price,
            icon: category.icon.to_string(),
            image_path: non_blank(draft.image_path.as_deref()),
            description: non_blank(draft.description.as_deref()),
            purchase_date: purchase_date.format(DATE_FORMAT).to_string(),
        })
    }

    /// Validate and save: update when `editing`, insert otherwise.
    ///
    /// # Errors
    ///
    /// Returns validation errors before touching storage,
    /// [`Error::ItemNotFound`] if the edited item no longer exists, and
    /// repository errors unchanged.
    pub async fn submit(&self, draft: &ItemDraft, editing: Option<&Item>) -> Result<Item> {
        let item = self.build(draft, editing)?;

        if editing.is_some() {
            if !self.repo.update(&item).await? {
                return Err(Error::ItemNotFound {
                    id: item.id,
                    similar: Vec::new(),
                });
            }
            info!(id = %item.id, "Item updated");
        } else {
            self.repo.insert(&item).await?;
            info!(id = %item.id, "Item added");
        }

        Ok(item)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
