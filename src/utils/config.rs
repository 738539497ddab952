//! Configuration and constants for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// The main Apple catalog URL containing all products and download links
pub const APPLE_CATALOG_URL: &str = "http://swscan.apple.com/content/catalogs/others/\
index-10.11-10.10-10.9-mountainlion-lion-snowleopard-leopard.merged-1.sucatalog";

/// Suffix identifying BootCamp packages among catalog downloads
pub const BOOTCAMP_PACKAGE_SUFFIX: &str = "BootCampESD.pkg";

/// Localization key of the distribution document we inspect
pub const DISTRIBUTION_LANGUAGE: &str = "English";

/// Where the Windows Support image mounts
pub const BOOTCAMP_VOLUME: &str = "/Volumes/Boot Camp";

// The payload nests its files under three leading directories
// (./Library/Application Support/BootCamp on current packages).
pub const PAYLOAD_STRIP_COMPONENTS: u32 = 3;

pub const TEMP_DIR_PREFIX: &str = "campies";

// Layout of the extracted package, relative to the working directory
pub const EXPANDED_PACKAGE_DIR: &str = "BootCampESD";
pub const PAYLOAD_FILE: &str = "Payload";
pub const WINDOWS_SUPPORT_IMAGE: &str = "BootCamp/WindowsSupport.dmg";

// Relative to the mounted volume
pub const VERSION_DESCRIPTOR: &str = "BootCamp/BootCamp.xml";

/// Runtime settings shared by every command.
///
/// Built once in `main` from defaults and CLI flags, then passed by
/// reference into each operation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_url: String,
    pub distribution_language: String,
    pub package_suffix: String,
    pub volume_path: PathBuf,
    pub strip_components: u32,
    pub temp_prefix: String,
    /// Parent for the working directory; the system temp dir when `None`
    pub temp_root: Option<PathBuf>,
    /// HTTP timeout; requests wait indefinitely when `None`
    pub http_timeout: Option<Duration>,
    pub colorize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: APPLE_CATALOG_URL.to_string(),
            distribution_language: DISTRIBUTION_LANGUAGE.to_string(),
            package_suffix: BOOTCAMP_PACKAGE_SUFFIX.to_string(),
            volume_path: PathBuf::from(BOOTCAMP_VOLUME),
            strip_components: PAYLOAD_STRIP_COMPONENTS,
            temp_prefix: TEMP_DIR_PREFIX.to_string(),
            temp_root: None,
            http_timeout: None,
            colorize: true,
        }
    }
}

impl Settings {
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    pub fn with_volume_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.volume_path = path.into();
        self
    }

    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// True when the catalog URL differs from Apple's default
    pub fn has_custom_catalog(&self) -> bool {
        self.catalog_url != APPLE_CATALOG_URL
    }
}
