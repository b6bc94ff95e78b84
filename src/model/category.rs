//! Static category table.
//!
//! Categories are compiled in and never stored as rows; items refer to
//! them by id only.

use serde::Serialize;

/// A category that items can be grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Icon name used for new items in this category
    pub icon: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "digital", name: "Digital", icon: "smartphone" },
    Category { id: "furniture", name: "Furniture", icon: "sofa" },
    Category { id: "figure", name: "Figures", icon: "toy-brick" },
    Category { id: "clothing", name: "Clothing", icon: "shirt" },
    Category { id: "book", name: "Books", icon: "book" },
    Category { id: "other", name: "Other", icon: "package" },
];

/// Look up a category by exact id.
#[must_use]
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}
