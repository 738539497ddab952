//! The `BootCamp/BootCamp.xml` version descriptor on the mounted volume.
//!
//! ```text
//! <BootCamp>
//!   <MsiInfo>
//!     <ProductVersion>6.1.6259</ProductVersion>
//! ```

use crate::utils::config::VERSION_DESCRIPTOR;
use crate::utils::error::DescriptorError;
use crate::utils::xml_text::first_element_text;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read the BootCamp product version from a mounted Windows Support volume
pub fn read_product_version(volume: &Path) -> Result<String, DescriptorError> {
    let path = volume.join(VERSION_DESCRIPTOR);
    let file = File::open(&path).map_err(|source| DescriptorError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_product_version(BufReader::new(file))
}

/// Extract `MsiInfo/ProductVersion` from descriptor XML
pub fn parse_product_version<R: Read>(xml: R) -> Result<String, DescriptorError> {
    let version = first_element_text(xml, &["MsiInfo", "ProductVersion"])?
        .filter(|v| !v.is_empty())
        .ok_or(DescriptorError::MissingVersion)?;

    // The version becomes part of the archive file name
    if version.contains(|c: char| c == '/' || c == '\\') || version.starts_with('.') {
        return Err(DescriptorError::InvalidVersion(version));
    }

    Ok(version)
}
