//! Search and facet filtering over a catalog
//!
//! All functions here borrow from the catalog and preserve its order, so the
//! result is always a subsequence of the input.

use std::collections::BTreeSet;

use crate::collate::locale_cmp;
use crate::country::Country;

/// Case-insensitive substring match on the display name.
///
/// An empty term returns every record in catalog order. A record with an
/// empty display name never matches a non-empty term.
pub fn filter<'a>(catalog: &'a [Country], term: &str) -> Vec<&'a Country> {
    filter_records(catalog, term)
}

/// [`filter`] over any sequence of borrowed records, such as an already
/// faceted subset.
pub fn filter_records<'a, I>(records: I, term: &str) -> Vec<&'a Country>
where
    I: IntoIterator<Item = &'a Country>,
{
    if term.is_empty() {
        return records.into_iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|country| matches_term(country, &needle))
        .collect()
}

fn matches_term(country: &Country, lowercased_term: &str) -> bool {
    let name = country.display_name();
    !name.is_empty() && name.to_lowercase().contains(lowercased_term)
}

/// Keep records in `region` (case-insensitive) that speak `language`.
///
/// `None` or an empty string disables that facet. Language matches are
/// against language names ("Spanish"), not codes.
pub fn filter_by_facets<'a>(
    catalog: &'a [Country],
    region: Option<&str>,
    language: Option<&str>,
) -> Vec<&'a Country> {
    let region = region.filter(|r| !r.is_empty());
    let language = language.filter(|l| !l.is_empty());

    catalog
        .iter()
        .filter(|country| {
            region.map_or(true, |wanted| {
                country
                    .region
                    .as_deref()
                    .is_some_and(|r| r.eq_ignore_ascii_case(wanted))
            })
        })
        .filter(|country| {
            language.map_or(true, |wanted| {
                country
                    .language_names()
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(wanted))
            })
        })
        .collect()
}

/// Unique non-empty regions, sorted.
pub fn regions(catalog: &[Country]) -> Vec<String> {
    let unique: BTreeSet<&str> = catalog
        .iter()
        .filter_map(|country| country.region.as_deref())
        .filter(|region| !region.is_empty())
        .collect();

    sorted(unique)
}

/// Unique non-empty language names across the catalog, sorted.
pub fn languages(catalog: &[Country]) -> Vec<String> {
    let unique: BTreeSet<&str> = catalog
        .iter()
        .flat_map(|country| country.language_names())
        .filter(|name| !name.is_empty())
        .collect();

    sorted(unique)
}

fn sorted(values: BTreeSet<&str>) -> Vec<String> {
    let mut values: Vec<String> = values.into_iter().map(str::to_string).collect();
    values.sort_by(|a, b| locale_cmp(a, b));
    values
}
