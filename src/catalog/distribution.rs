//! Distribution documents (`*.English.dist`).
//!
//! The installer script declaring supported models is the second `script`
//! element directly below `installer-gui-script`; the first one holds
//! generic volume checks.

use super::fetch::Fetch;
use super::models::extract_supported_models;
use crate::utils::error::DistributionError;
use crate::utils::xml_text::element_texts;
use log::debug;

/// Position of the model-declaring script among the root's `script` children
const MODELS_SCRIPT_INDEX: usize = 1;

/// Fetch a distribution document and return the models it supports
pub fn fetch_supported_models(
    fetcher: &dyn Fetch,
    distribution_url: &str,
) -> Result<Vec<String>, DistributionError> {
    let document = fetcher.fetch(distribution_url)?;
    debug!("Parsing distribution {}", distribution_url);
    parse_supported_models(&document)
}

/// Supported models declared by a distribution document
pub fn parse_supported_models(document: &[u8]) -> Result<Vec<String>, DistributionError> {
    let script = installer_script(document)?;
    Ok(extract_supported_models(&script)?)
}

/// Text of the script that declares the supported models
pub fn installer_script(document: &[u8]) -> Result<String, DistributionError> {
    let mut scripts = element_texts(document, &["script"])?;
    let found = scripts.len();

    if found <= MODELS_SCRIPT_INDEX {
        return Err(DistributionError::MissingScript { found });
    }

    Ok(scripts.swap_remove(MODELS_SCRIPT_INDEX))
}
