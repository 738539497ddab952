//! In-memory model of Apple's software catalog.
//!
//! The catalog is a property list shaped like:
//!
//! ```text
//! Products:
//!   041-12345:
//!     Packages: [{ URL: ".../BootCampESD.pkg", Size: ... }, ...]
//!     Distributions: { English: ".../041-12345.English.dist", ... }
//! ```
//!
//! Products keep the order they have in the document.

use crate::utils::error::CatalogError;
use log::debug;
use plist::{Dictionary, Value};
use std::collections::BTreeMap;
use std::io::Cursor;

/// A single catalog product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product identifier (the key under `Products`)
    pub id: String,

    /// Download URLs of the product's packages
    pub packages: Vec<String>,

    /// Distribution document URL per localization (`English`, `French`, ...)
    pub distributions: BTreeMap<String, String>,
}

impl Product {
    /// Distribution URL for `language`, if the product publishes one
    pub fn distribution_url(&self, language: &str) -> Option<&str> {
        self.distributions.get(language).map(String::as_str)
    }

    fn from_value(id: &str, value: &Value) -> Result<Self, CatalogError> {
        let dict = value.as_dictionary().ok_or_else(|| {
            CatalogError::InvalidFormat(format!("product {} is not a dictionary", id))
        })?;

        let packages = match dict.get("Packages") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| {
                    let url = entry
                        .as_dictionary()
                        .and_then(|p| p.get("URL"))
                        .and_then(Value::as_string);
                    if url.is_none() {
                        debug!("Skipping package without URL in product {}", id);
                    }
                    url.map(str::to_string)
                })
                .collect(),
            Some(_) => {
                return Err(CatalogError::InvalidFormat(format!(
                    "Packages of product {} is not an array",
                    id
                )))
            }
            None => Vec::new(),
        };

        let distributions = dict
            .get("Distributions")
            .and_then(Value::as_dictionary)
            .map(string_entries)
            .unwrap_or_default();

        Ok(Self {
            id: id.to_string(),
            packages,
            distributions,
        })
    }
}

fn string_entries(dict: &Dictionary) -> BTreeMap<String, String> {
    dict.iter()
        .filter_map(|(k, v)| v.as_string().map(|s| (k.clone(), s.to_string())))
        .collect()
}

/// The parsed software catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Parse a catalog from binary or XML property list bytes
    pub fn from_plist(bytes: &[u8]) -> Result<Self, CatalogError> {
        let value = Value::from_reader(Cursor::new(bytes))?;

        let root = value.as_dictionary().ok_or_else(|| {
            CatalogError::InvalidFormat("catalog root is not a dictionary".to_string())
        })?;

        let products = root
            .get("Products")
            .and_then(Value::as_dictionary)
            .ok_or_else(|| {
                CatalogError::InvalidFormat("catalog has no Products dictionary".to_string())
            })?;

        let products = products
            .iter()
            .map(|(id, product)| Product::from_value(id, product))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Catalog lists {} products", products.len());

        Ok(Self { products })
    }

    /// Every `(product, package URL)` pair whose URL ends with `suffix`
    pub fn packages_with_suffix<'a>(
        &'a self,
        suffix: &'a str,
    ) -> impl Iterator<Item = (&'a Product, &'a str)> + 'a {
        self.products.iter().flat_map(move |product| {
            product
                .packages
                .iter()
                .filter(move |url| url.ends_with(suffix))
                .map(move |url| (product, url.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>CatalogVersion</key>
    <integer>2</integer>
    <key>Products</key>
    <dict>
        <key>zz-999</key>
        <dict>
            <key>Packages</key>
            <array>
                <dict>
                    <key>URL</key>
                    <string>http://example.com/zz/BootCampESD.pkg</string>
                    <key>Size</key>
                    <integer>100</integer>
                </dict>
                <dict>
                    <key>Size</key>
                    <integer>5</integer>
                </dict>
            </array>
            <key>Distributions</key>
            <dict>
                <key>English</key>
                <string>http://example.com/zz.English.dist</string>
            </dict>
        </dict>
        <key>aa-001</key>
        <dict>
            <key>Packages</key>
            <array>
                <dict>
                    <key>URL</key>
                    <string>http://example.com/aa/Other.pkg</string>
                </dict>
            </array>
        </dict>
        <key>mm-500</key>
        <dict/>
    </dict>
</dict>
</plist>"#;

    #[test]
    fn test_from_plist_preserves_document_order() {
        let catalog = Catalog::from_plist(CATALOG.as_bytes()).unwrap();
        let ids: Vec<&str> = catalog.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["zz-999", "aa-001", "mm-500"]);
    }

    #[test]
    fn test_packages_without_url_are_skipped() {
        let catalog = Catalog::from_plist(CATALOG.as_bytes()).unwrap();
        assert_eq!(
            catalog.products[0].packages,
            vec!["http://example.com/zz/BootCampESD.pkg".to_string()]
        );
        assert!(catalog.products[2].packages.is_empty());
    }

    #[test]
    fn test_distribution_url_lookup() {
        let catalog = Catalog::from_plist(CATALOG.as_bytes()).unwrap();
        assert_eq!(
            catalog.products[0].distribution_url("English"),
            Some("http://example.com/zz.English.dist")
        );
        assert_eq!(catalog.products[1].distribution_url("English"), None);
    }

    #[test]
    fn test_packages_with_suffix() {
        let catalog = Catalog::from_plist(CATALOG.as_bytes()).unwrap();
        let found: Vec<_> = catalog
            .packages_with_suffix("BootCampESD.pkg")
            .map(|(product, url)| (product.id.clone(), url.to_string()))
            .collect();

        assert_eq!(
            found,
            vec![(
                "zz-999".to_string(),
                "http://example.com/zz/BootCampESD.pkg".to_string()
            )]
        );
    }

    #[test]
    fn test_missing_products_is_invalid() {
        let doc = r#"<plist version="1.0"><dict><key>CatalogVersion</key><integer>2</integer></dict></plist>"#;
        let err = Catalog::from_plist(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat(_)));
    }

    #[test]
    fn test_not_a_plist() {
        let err = Catalog::from_plist(b"garbage, not a property list").unwrap_err();
        assert!(matches!(err, CatalogError::Plist(_)));
    }
}
