//! Queries against the restcountries API
//!
//! Pure URL construction and response interpretation. The shell only performs
//! the GET and hands the status and body back to [`interpret_response`].

use crate::country::Country;
use crate::error::FetchError;

pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

/// Fields projected for list queries. Detail lookups fetch the full record.
pub const LIST_FIELDS: &str = "name,cca3,flags,population,region,capital,languages,maps";

/// Fields projected when resolving border codes to names.
pub const BORDER_FIELDS: &str = "name,cca3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    All,
    Region(String),
    Language(String),
    /// Exact (full text) name lookup.
    Name(String),
    /// Alpha-2/alpha-3 codes, used for border lookups.
    Codes(Vec<String>),
}

impl CatalogQuery {
    /// Pick the narrowest server-side query for a pair of facets.
    ///
    /// The API cannot combine region and language, so when both are set the
    /// region query is used and the language is applied client-side.
    pub fn for_facets(region: Option<&str>, language: Option<&str>) -> Self {
        let region = region.filter(|r| !r.is_empty());
        let language = language.filter(|l| !l.is_empty());

        match (region, language) {
            (Some(region), _) => CatalogQuery::Region(region.to_string()),
            (None, Some(language)) => CatalogQuery::Language(language.to_string()),
            (None, None) => CatalogQuery::All,
        }
    }

    /// Path and query string relative to the API base.
    pub fn path(&self) -> String {
        match self {
            CatalogQuery::All => format!("/all?fields={LIST_FIELDS}"),
            CatalogQuery::Region(region) => format!(
                "/region/{}?fields={LIST_FIELDS}",
                urlencoding::encode(region)
            ),
            CatalogQuery::Language(language) => format!(
                "/lang/{}?fields={LIST_FIELDS}",
                urlencoding::encode(language)
            ),
            CatalogQuery::Name(name) => {
                format!("/name/{}?fullText=true", urlencoding::encode(name))
            }
            CatalogQuery::Codes(codes) => {
                let codes: Vec<String> = codes
                    .iter()
                    .map(|code| urlencoding::encode(code).into_owned())
                    .collect();
                format!("/alpha?codes={}&fields={BORDER_FIELDS}", codes.join(","))
            }
        }
    }

    pub fn url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path())
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogQuery::All => "all countries".to_string(),
            CatalogQuery::Region(region) => format!("region {region}"),
            CatalogQuery::Language(language) => format!("language {language}"),
            CatalogQuery::Name(name) => format!("name {name}"),
            CatalogQuery::Codes(codes) => format!("codes {}", codes.join(",")),
        }
    }
}

/// Turn an HTTP status and body into records or a typed error.
///
/// - 2xx bodies must decode as an array of records, else `MalformedData`.
/// - A name lookup answered with 404 or an empty array is `NotFound`.
/// - A region or language query answered with 404 means "no results".
/// - Any other non-2xx status is `HttpStatus`.
pub fn interpret_response(
    query: &CatalogQuery,
    url: &str,
    status: u16,
    body: &str,
) -> Result<Vec<Country>, FetchError> {
    if !(200..300).contains(&status) {
        return match (query, status) {
            (CatalogQuery::Name(name), 404) => Err(FetchError::NotFound(name.clone())),
            (CatalogQuery::Region(_) | CatalogQuery::Language(_), 404) => Ok(Vec::new()),
            _ => Err(FetchError::HttpStatus {
                status,
                url: url.to_string(),
            }),
        };
    }

    let countries: Vec<Country> =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedData {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if let CatalogQuery::Name(name) = query {
        if countries.is_empty() {
            return Err(FetchError::NotFound(name.clone()));
        }
    }

    Ok(countries)
}
