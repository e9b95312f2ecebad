//! Thin async client for the Oxylabs Realtime scraping API.
//!
//! Builds a target URL from caller-supplied search parameters, forwards a
//! declarative set of XPath extraction rules, and returns the first
//! structured result the service produced. All HTML fetching, rendering,
//! and XPath evaluation happen on the remote side.

pub mod error;
pub mod extraction;
pub mod fetcher;
pub mod models;

pub use error::{FetchError, Result};
pub use extraction::ExtractionSpec;
pub use fetcher::{Credentials, ListingFetcher, OxylabsFetcher, SearchParams};
pub use models::{FetchOutcome, Listing, ResultContent, SearchResult};
