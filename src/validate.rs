//! Input validation for the item form.
//!
//! Validation happens before anything reaches the repository. Statuses go
//! through three-tier resolution: exact match → synonym lookup → error with
//! suggestion. Categories and ids get closest-match suggestions.

use crate::error::{Error, Result};
use crate::model::{find_category, Category, ItemStatus, CATEGORIES};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Storage format of `purchase_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Valid value sets ─────────────────────────────────────────

pub static VALID_STATUSES: LazyLock<HashSet<&str>> =
    LazyLock::new(|| ItemStatus::ALL.iter().map(ItemStatus::as_str).collect());

pub static VALID_CATEGORIES: LazyLock<HashSet<&str>> =
    LazyLock::new(|| CATEGORIES.iter().map(|c| c.id).collect());

// ── Synonym maps ─────────────────────────────────────────────

pub static STATUS_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("inuse", "in-use"),
        ("in_use", "in-use"),
        ("in use", "in-use"),
        ("active", "in-use"),
        ("using", "in-use"),
        ("owned", "in-use"),
        ("服役中", "in-use"),
        ("sell", "sold"),
        ("selled", "sold"),
        ("gone", "sold"),
        ("已出售", "sold"),
        ("retire", "retired"),
        ("broken", "retired"),
        ("archived", "retired"),
        ("unused", "retired"),
        ("已退役", "retired"),
    ]
    .into_iter()
    .collect()
});

/// Normalize a status string via exact match or synonym lookup.
///
/// # Errors
///
/// Returns [`Error::InvalidStatus`] with the closest valid status, if any.
pub fn normalize_status(input: &str) -> Result<ItemStatus> {
    let lower = input.trim().to_lowercase();

    // Tier 1: exact match
    // Tier 2: synonym lookup
    let canonical = if VALID_STATUSES.contains(lower.as_str()) {
        Some(lower.as_str())
    } else {
        STATUS_SYNONYMS.get(lower.as_str()).copied()
    };

    if let Some(status) = canonical.and_then(ItemStatus::parse) {
        return Ok(status);
    }

    // Tier 3: find closest suggestion
    let suggestion = find_closest_match(&lower, &VALID_STATUSES, &STATUS_SYNONYMS);
    Err(Error::InvalidStatus {
        input: input.to_string(),
        suggestion,
    })
}

/// Resolve a category id against the static table.
///
/// # Errors
///
/// Returns a validation error for a blank id and [`Error::UnknownCategory`]
/// for an id that is not in the table.
pub fn resolve_category(input: &str) -> Result<&'static Category> {
    let id = input.trim();
    if id.is_empty() {
        return Err(Error::validation("category", "a category is required"));
    }

    find_category(id).ok_or_else(|| Error::UnknownCategory {
        input: id.to_string(),
        suggestion: find_closest_match(&id.to_lowercase(), &VALID_CATEGORIES, &HashMap::new()),
    })
}

/// Validate an item name, returning it trimmed.
///
/// # Errors
///
/// Returns a validation error if the name is blank.
pub fn validate_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "a name is required"));
    }
    Ok(name.to_string())
}

/// Parse a price entered as text.
///
/// # Errors
///
/// Returns a validation error unless the text is a finite number > 0.
pub fn parse_price(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("price", "a price is required"));
    }

    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        Ok(_) => Err(Error::validation("price", format!("'{trimmed}' is not greater than 0"))),
        Err(_) => Err(Error::validation("price", format!("'{trimmed}' is not a number"))),
    }
}

/// Parse a `YYYY-MM-DD` purchase date.
///
/// # Errors
///
/// Returns a validation error if the text is not a calendar date.
pub fn parse_purchase_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        // chrono accepts unpadded fields; stored dates must sort as strings
        .filter(|d| d.format(DATE_FORMAT).to_string() == trimmed)
        .ok_or_else(|| {
            Error::validation("purchase date", format!("'{trimmed}' is not a YYYY-MM-DD date"))
        })
}

/// Find the closest matching value across valid set and synonyms.
///
/// Equally close candidates resolve to the alphabetically first suggestion.
fn find_closest_match(
    input: &str,
    valid: &HashSet<&str>,
    synonyms: &HashMap<&str, &str>,
) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for &v in valid.iter().chain(synonyms.keys()) {
        let dist = levenshtein_distance(input, v);
        if dist > 3 {
            continue;
        }
        // For synonyms, show what it maps to
        let shown = synonyms.get(v).copied().unwrap_or(v);
        if best.is_none_or(|(b, d)| (dist, shown) < (d, b)) {
            best = Some((shown, dist));
        }
    }

    best.map(|(v, _)| v.to_string())
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find existing ids similar to the searched id.
///
/// Returns up to `max` suggestions with edit distance ≤ 3,
/// sorted by distance then alphabetically.
#[must_use]
pub fn find_similar_ids(searched: &str, existing: &[String], max: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|id| (levenshtein_distance(searched, id), id.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, id)| id.to_string())
        .collect()
}
