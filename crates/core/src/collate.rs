//! Locale-aware ordering for display names
//!
//! Names are compared on a primary key that ignores case and diacritics
//! ("Åland Islands" sorts with the A's, "Réunion" next to "Romania"), with the
//! exact string as tie-break so the ordering stays total and deterministic.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::country::Country;

/// Primary collation key: canonical decomposition, marks stripped, lowercased.
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Sort records by display name. Stable, so equal names keep fetch order.
pub fn sort_by_name(countries: &mut [Country]) {
    countries.sort_by_cached_key(|country| {
        (
            collation_key(country.display_name()),
            country.display_name().to_string(),
        )
    });
}
