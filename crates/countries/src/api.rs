//! HTTP access to the restcountries API
//!
//! The client only moves bytes: URLs come from [`CatalogQuery`] and every
//! status/body pair is judged by [`interpret_response`] in the core crate.

use std::time::Duration;

use countries_core::catalog::Catalog;
use countries_core::collate::collation_key;
use countries_core::country::Country;
use countries_core::query::{interpret_response, CatalogQuery};
use countries_core::FetchError;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct CountriesClient {
    http: reqwest::Client,
    api_base: String,
}

impl CountriesClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("countries/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        Self::new(&global.api_base, Duration::from_secs(global.timeout_secs))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Single GET, no retry.
    pub async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Country>, FetchError> {
        let url = query.url(&self.api_base);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(f!("Failed to fetch {}: {e}", query.describe())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(f!("Failed to read response from {url}: {e}")))?;

        let result = interpret_response(query, &url, status, &body);
        match &result {
            Ok(countries) => log::info!(
                "Fetched {} records for {} (HTTP {status})",
                countries.len(),
                query.describe()
            ),
            Err(err) => log::warn!("Fetching {} failed: {err}", query.describe()),
        }

        result
    }

    /// Fetch and sort a catalog.
    pub async fn load_catalog(&self, query: &CatalogQuery) -> Result<Catalog, FetchError> {
        self.fetch(query).await.map(Catalog::from_records)
    }

    /// Resolve a country by exact name.
    ///
    /// The API can answer a full-text lookup with several records (alternate
    /// spellings); prefer the one whose common name matches.
    pub async fn find_by_name(&self, name: &str) -> Result<Country, FetchError> {
        let query = CatalogQuery::Name(name.to_string());
        let mut countries = self.fetch(&query).await?;

        let wanted = collation_key(name);
        let index = countries
            .iter()
            .position(|c| collation_key(c.display_name()) == wanted)
            .unwrap_or(0);

        Ok(countries.swap_remove(index))
    }

    /// Records for the countries bordering `country`.
    ///
    /// A failed lookup is logged and treated as "no borders" so the detail
    /// view still renders.
    pub async fn border_countries(&self, country: &Country) -> Vec<Country> {
        let codes = country.border_codes();
        if codes.is_empty() {
            return Vec::new();
        }

        match self.fetch(&CatalogQuery::Codes(codes.to_vec())).await {
            Ok(borders) => borders,
            Err(err) => {
                log::warn!(
                    "Could not fetch border countries of {}: {err}",
                    country.display_name()
                );
                Vec::new()
            }
        }
    }
}
