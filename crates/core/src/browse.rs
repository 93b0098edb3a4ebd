//! One browsable list view
//!
//! [`BrowseSession`] ties a catalog, optional facets, the current search term
//! and the incremental loader together. Every list-like view (one-shot
//! listing, interactive browsing, MCP tools) goes through it, parameterized by
//! its [`LoaderConfig`] and facets.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::country::Country;
use crate::error::FetchError;
use crate::filter::{filter, filter_by_facets, filter_records};
use crate::loader::{GrowthTicket, IncrementalLoader, LoaderConfig, LoaderState};
use crate::query::CatalogQuery;
use crate::window::window;

/// Client-side facets applied on top of the fetched catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub region: Option<String>,
    pub language: Option<String>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.region.as_deref().map_or(true, str::is_empty)
            && self.language.as_deref().map_or(true, str::is_empty)
    }
}

/// Split a facet selection into the server-side query and the facets that
/// still have to be applied client-side.
///
/// The API filters by one facet per request. Region wins; a language chosen
/// together with a region is applied locally.
pub fn plan_facets(region: Option<&str>, language: Option<&str>) -> (CatalogQuery, Facets) {
    let query = CatalogQuery::for_facets(region, language);
    let residual = match &query {
        CatalogQuery::Region(_) => Facets {
            region: None,
            language: language.filter(|l| !l.is_empty()).map(str::to_string),
        },
        _ => Facets::default(),
    };

    (query, residual)
}

/// What a renderer needs to draw the current state of the view.
#[derive(Debug, Serialize, Clone)]
pub struct Page<'a> {
    pub term: &'a str,
    pub shown: Vec<&'a Country>,
    pub total_matches: usize,
    pub visible_count: usize,
    pub has_more: bool,
    pub state: LoaderState,
}

#[derive(Debug, Clone)]
pub struct BrowseSession {
    catalog: Catalog,
    facets: Facets,
    term: String,
    loader: IncrementalLoader,
    error: Option<FetchError>,
}

impl BrowseSession {
    pub fn new(config: LoaderConfig, facets: Facets) -> Self {
        Self {
            catalog: Catalog::default(),
            facets,
            term: String::new(),
            loader: IncrementalLoader::new(config),
            error: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn loader(&self) -> &IncrementalLoader {
        &self.loader
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Install a freshly fetched catalog and start paginating from the top.
    pub fn load(&mut self, catalog: Catalog) {
        if self.loader.is_disposed() {
            return;
        }

        self.catalog = catalog;
        self.error = None;
        self.loader.reset();
    }

    /// Record a failed fetch. The catalog is left empty.
    pub fn fail(&mut self, error: FetchError) {
        if self.loader.is_disposed() {
            return;
        }

        self.catalog = Catalog::default();
        self.error = Some(error);
        self.loader.reset();
    }

    /// Change the search term. Returns `true` when it actually changed, in
    /// which case pagination restarts from the initial chunk.
    pub fn set_term(&mut self, term: &str) -> bool {
        if self.loader.is_disposed() || self.term == term {
            return false;
        }

        self.term = term.to_string();
        self.loader.reset();
        true
    }

    /// Catalog after facets and search term, in catalog order.
    pub fn filtered(&self) -> Vec<&Country> {
        if self.facets.is_empty() {
            return filter(self.catalog.as_slice(), &self.term);
        }

        let faceted = filter_by_facets(
            self.catalog.as_slice(),
            self.facets.region.as_deref(),
            self.facets.language.as_deref(),
        );
        filter_records(faceted, &self.term)
    }

    pub fn total_matches(&self) -> usize {
        self.filtered().len()
    }

    pub fn page(&self) -> Page<'_> {
        let mut matches = self.filtered();
        let total_matches = matches.len();
        let visible_count = self.loader.visible_count();

        let w = window(&matches, visible_count);
        let (shown_len, has_more) = (w.shown.len(), w.has_more);
        matches.truncate(shown_len);

        Page {
            term: &self.term,
            shown: matches,
            total_matches,
            visible_count,
            has_more,
            state: self.loader.state(),
        }
    }

    pub fn on_proximity(&mut self) -> Option<GrowthTicket> {
        let total = self.total_matches();
        self.loader.on_proximity(total)
    }

    pub fn complete_growth(&mut self, ticket: GrowthTicket) -> bool {
        let total = self.total_matches();
        self.loader.complete_growth(ticket, total)
    }

    /// Tear the view down. Pending growth steps and late fetches are dropped.
    pub fn dispose(&mut self) {
        self.loader.dispose();
    }
}
