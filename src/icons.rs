//! Icon name resolution.
//!
//! Items and categories store a lowercase icon name. Front ends render a
//! symbol from a fixed set; anything unknown falls back to `Package`.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const DEFAULT_ICON: &str = "package";
const FALLBACK_SYMBOL: &str = "Package";

static ICON_SYMBOLS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("smartphone", "Smartphone"),
        ("laptop", "Laptop"),
        ("headphones", "Headphones"),
        ("tablet", "Tablet"),
        ("watch", "Watch"),
        ("sofa", "Sofa"),
        ("table", "Table"),
        ("chair", "RockingChair"),
        ("lamp", "Lamp"),
        ("toy-brick", "ToyBrick"),
        ("shirt", "Shirt"),
        ("footprints", "Footprints"),
        ("book", "Book"),
        ("book-open", "BookOpen"),
        ("package", "Package"),
        ("camera", "Camera"),
        ("home", "Home"),
        ("user", "User"),
        ("upload-cloud", "UploadCloud"),
        ("grid", "Grid"),
    ]
    .into_iter()
    .collect()
});

/// Resolve an icon name to its symbol name.
#[must_use]
pub fn resolve_icon(name: &str) -> &'static str {
    ICON_SYMBOLS.get(name).copied().unwrap_or(FALLBACK_SYMBOL)
}

/// Whether `name` has a dedicated symbol.
#[must_use]
pub fn is_known_icon(name: &str) -> bool {
    ICON_SYMBOLS.contains_key(name)
}
