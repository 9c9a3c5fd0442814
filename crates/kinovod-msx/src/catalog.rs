//! Static search catalog
//!
//! `/msx/search` does not touch the extraction core: it filters a
//! fixed built-in catalog. Movie entries answer with a `content:`
//! action pointing back at the menu endpoint; informational entries
//! answer with an `info:` text.

/// What a catalog entry resolves to when selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Movie,
    Info,
}

/// One entry of the built-in catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub title: &'static str,
    pub kind: EntryKind,
    /// Text for `info:` actions; ignored for movies
    pub note: &'static str,
}

/// The deployment's catalog. Single-target service, so one movie.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        title: "Gabriel",
        kind: EntryKind::Movie,
        note: "",
    },
    CatalogEntry {
        title: "Обновить потоки",
        kind: EntryKind::Info,
        note: "Откройте /msx/refresh для принудительного обновления",
    },
];

/// Case-insensitive substring filter over the catalog
///
/// An empty query returns the whole catalog.
pub fn search(input: &str) -> Vec<&'static CatalogEntry> {
    let needle = input.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|entry| needle.is_empty() || entry.title.to_lowercase().contains(&needle))
        .collect()
}
