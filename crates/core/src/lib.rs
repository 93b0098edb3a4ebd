//! Core library for countries
//!
//! This crate implements the **Functional Core** of the countries application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The countries project uses a two-crate architecture:
//!
//! - **`countries_core`** (this crate): Pure transformation functions and state
//!   machines with zero I/O
//! - **`countries`**: HTTP, timers, terminal and MCP I/O (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: filtering, windowing and response interpretation are
//!   deterministic and side-effect free
//! - **Explicit state machines**: the incremental loader and the fetch gate
//!   expose transitions only; timers and network calls live in the shell
//! - **Testable**: everything here is tested with fixture data, no mocking
//!
//! # Module Organization
//!
//! - [`country`]: The API record schema
//! - [`collate`]: Locale-aware name ordering
//! - [`catalog`]: The sorted in-memory catalog and last-request-wins fetch gate
//! - [`filter`]: Search-term and facet filtering
//! - [`window`]: The rendered prefix of a filtered list
//! - [`loader`]: The incremental loading state machine
//! - [`browse`]: A complete list view combining the pieces above
//! - [`query`]: API URLs and response interpretation
//! - [`detail`]: The detail view with border navigation
//! - [`navigator`]: Cyclic next/previous stepping
//! - [`error`]: Fetch error taxonomy
//!
//! # Example Usage
//!
//! ```rust
//! use countries_core::browse::{BrowseSession, Facets};
//! use countries_core::catalog::Catalog;
//! use countries_core::country::Country;
//! use countries_core::loader::LoaderConfig;
//!
//! let mut session = BrowseSession::new(LoaderConfig::default(), Facets::default());
//! session.load(Catalog::from_records(vec![
//!     Country::named("Peru"),
//!     Country::named("Chile"),
//!     Country::named("China"),
//! ]));
//! session.set_term("ch");
//!
//! let page = session.page();
//! assert_eq!(page.shown.len(), 2);
//! assert!(!page.has_more);
//! ```

pub mod browse;
pub mod catalog;
pub mod collate;
pub mod country;
pub mod detail;
pub mod error;
pub mod filter;
pub mod loader;
pub mod navigator;
pub mod query;
pub mod window;

pub use error::FetchError;
