//! Listing query shaping: substring search plus deterministic ordering.
//!
//! Applied to repository results before they reach the caller. Pagination
//! (skip/limit) is the repository's responsibility and is not re-applied here.

/// A record type whose listings can be searched and sorted.
pub trait Listable {
    /// Text the search term is matched against (the record's name).
    fn search_text(&self) -> &str;

    /// Primary/secondary sort key: `(category, name)`. Entities without a
    /// category return an empty primary key.
    fn sort_key(&self) -> (&str, &str);
}

/// Filter by case-insensitive substring match against [`Listable::search_text`],
/// then sort by category, then name.
///
/// The sort is stable: records with identical `(category, name)` keys retain
/// their relative input order, so the ordering is deterministic for
/// pagination-adjacent consumers.
pub fn shape_listing<T: Listable>(records: Vec<T>, search: Option<&str>) -> Vec<T> {
    let mut shaped: Vec<T> = match search {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            records
                .into_iter()
                .filter(|r| r.search_text().to_lowercase().contains(&needle))
                .collect()
        }
        _ => records,
    };

    // First sort by category, then by name.
    shaped.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    shaped
}
