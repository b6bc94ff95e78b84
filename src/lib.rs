//! Belongings - a local inventory of personal items
//!
//! This crate provides the core functionality for the `bl` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Item, ItemStatus, Category, TrendPoint)
//! - [`storage`] - SQLite persistence and the async item repository
//! - [`view`] - View-state controllers (item list, profile, add/edit form)
//! - [`validate`] - Form input validation
//! - [`clock`] - Injected "now" for date arithmetic
//! - [`icons`] - Icon name resolution
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod icons;
pub mod model;
pub mod storage;
pub mod validate;
pub mod view;

pub use error::{Error, Result};

/// Global quiet flag for `--quiet`.
///
/// When set, mutate commands print only the affected ID (or nothing) and
/// logging is off. Errors are always reported.
pub static QUIET: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if quiet mode is active.
#[inline]
pub fn is_quiet() -> bool {
    QUIET.load(std::sync::atomic::Ordering::Relaxed)
}
pub use model::{Item, ItemStatus, TrendPoint};
pub use storage::ItemRepository;
