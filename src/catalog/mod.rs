//! Apple software catalog access.
//!
//! This module handles:
//! - Fetching documents over HTTP
//! - Parsing the catalog property list
//! - Reading supported models out of distribution documents

pub mod distribution;
pub mod fetch;
pub mod models;
pub mod types;

// Re-export main types
pub use distribution::{fetch_supported_models, parse_supported_models};
pub use fetch::{Fetch, HttpFetcher};
pub use models::extract_supported_models;
pub use types::{Catalog, Product};

use crate::utils::error::CatalogError;
use log::debug;

/// Download and parse the catalog at `catalog_url`
pub fn fetch_catalog(fetcher: &dyn Fetch, catalog_url: &str) -> Result<Catalog, CatalogError> {
    let body = fetcher.fetch(catalog_url)?;
    debug!("Parsing catalog ({} bytes)", body.len());
    Catalog::from_plist(&body)
}
