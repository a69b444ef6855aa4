//! Upper bounds on payload sizes.
//!
//! Directory responses are shaped against these limits at the client boundary
//! and re-checked before a record is written to the lead store, so a stored
//! organization blob never grows without bound.

/// Maximum entries kept in `keywords` and `technologies`.
pub const MAX_LIST_ITEMS: usize = 10;

/// Maximum characters kept in an organization's short description.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Maximum decision-makers kept per resolved organization.
pub const MAX_PEOPLE: usize = 10;

/// Hard cap on candidates kept from a single name search.
pub const MAX_CANDIDATES: usize = 25;

/// Truncate `s` to at most `max` characters, respecting char boundaries.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
