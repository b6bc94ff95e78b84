//! View-state controllers.
//!
//! Each controller holds the state one page needs and calls the
//! [`crate::storage::ItemRepository`] for data:
//!
//! - [`items`] - item list with category filter and total value
//! - [`profile`] - count, month count and value trend
//! - [`form`] - add/edit validation and save
//! - [`usage`] - derived per-item values (days in use, daily value)

pub mod form;
pub mod items;
pub mod profile;
pub mod usage;

pub use form::{ItemDraft, ItemForm};
pub use items::ItemsView;
pub use profile::{ProfileSummary, ProfileView};
pub use usage::{daily_value, days_in_use, total_value, ItemUsage};
