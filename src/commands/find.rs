//! Find command implementation.
//!
//! The find command:
//! 1. Resolves the Mac model (given or detected)
//! 2. Fetches the software catalog
//! 3. Filters BootCampESD packages by the models their distribution supports
//! 4. Reports one, several or no matching packages

use super::models::{FindArgs, FindOutcome, Session};
use crate::catalog::{fetch_catalog, fetch_supported_models, Catalog};
use crate::hardware::detect_model;
use crate::output::Console;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Execute the find command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The outcome; `FindOutcome::NotFound` maps to exit status 1
///
/// # Errors
/// * Hardware detection failures
/// * Catalog or distribution fetch and parse errors
/// * User interruption
pub fn execute_find(args: &FindArgs, session: &Session) -> Result<FindOutcome> {
    let console = session.console;

    let model = match &args.model {
        Some(model) => {
            console.success(&format!("Using provided Mac model {}", model));
            model.clone()
        }
        None => {
            let model =
                detect_model(session.runner).context("Failed to detect your Mac model")?;
            console.success(&format!("Detected your Mac model as {}", model));
            model
        }
    };

    let settings = match &args.catalog_url {
        Some(url) => Cow::Owned(session.settings.clone().with_catalog_url(url)),
        None => Cow::Borrowed(session.settings),
    };
    let catalog_url = settings.catalog_url.as_str();
    if settings.has_custom_catalog() {
        console.info(&format!("Using custom catalog URL {}", catalog_url));
    }

    console.info("Obtaining the Apple software catalog");
    let catalog = fetch_catalog(session.fetcher, catalog_url)
        .with_context(|| format!("Failed to load the software catalog from {}", catalog_url))?;
    session.interrupt.check()?;

    let urls = find_package_urls(&catalog, &model, session)?;
    let outcome = FindOutcome::from_matches(urls);
    report_outcome(&outcome, console);

    Ok(outcome)
}

/// Package URLs in `catalog` whose distribution supports `model`.
///
/// Only packages ending with the configured suffix are considered. Each
/// product's distribution is fetched at most once.
pub fn find_package_urls(catalog: &Catalog, model: &str, session: &Session) -> Result<Vec<String>> {
    let settings = session.settings;
    let mut supported: HashMap<&str, Vec<String>> = HashMap::new();
    let mut matches = Vec::new();

    for (product, package_url) in catalog.packages_with_suffix(&settings.package_suffix) {
        session.interrupt.check()?;

        let Some(distribution_url) = product.distribution_url(&settings.distribution_language)
        else {
            warn!(
                "Product {} has no {} distribution; skipping {}",
                product.id, settings.distribution_language, package_url
            );
            continue;
        };

        let models = match supported.entry(product.id.as_str()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Checking supported models of product {}", product.id);
                let models = fetch_supported_models(session.fetcher, distribution_url)
                    .with_context(|| {
                        format!("Failed to read supported models of product {}", product.id)
                    })?;
                entry.insert(models)
            }
        };

        if models.iter().any(|m| m == model) {
            info!("Product {} supports {}: {}", product.id, model, package_url);
            matches.push(package_url.to_string());
        }
    }

    Ok(matches)
}

/// Let the user know what they should download
fn report_outcome(outcome: &FindOutcome, console: &dyn Console) {
    match outcome {
        FindOutcome::Found(url) => console.success(&format!(
            "A BootCamp package for your Mac model was found at {}",
            url
        )),
        FindOutcome::Ambiguous(urls) => {
            console.warning(
                "More than one BootCamp package matched your Mac model at the following URLs:",
            );
            for url in urls {
                console.warning(&format!("* {}", url));
            }
        }
        FindOutcome::NotFound => {
            console.failure("No BootCamp packages could be found for your Mac model")
        }
    }
}
