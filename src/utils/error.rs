//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while downloading a document
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    Status { url: String, status: u16 },
}

/// Errors that can occur while loading the software catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] FetchError),

    #[error("Catalog is not a valid property list: {0}")]
    Plist(#[from] plist::Error),

    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while reading a distribution document
#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("Failed to fetch distribution: {0}")]
    Fetch(#[from] FetchError),

    #[error("Distribution is not valid XML: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("Distribution has {found} script element(s), expected at least 2")]
    MissingScript { found: usize },

    #[error("Malformed model list: {0}")]
    ModelList(#[from] ModelListError),
}

/// Errors from the `var models = [...]` tokenizer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelListError {
    #[error("expected {expected} at offset {offset}, found {found:?}")]
    UnexpectedToken {
        offset: usize,
        expected: &'static str,
        found: char,
    },

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("input ended while expecting {0}")]
    UnexpectedEnd(&'static str),
}

/// An external tool could not be run or exited unsuccessfully
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unable to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed (exit status {}): {stderr}", display_code(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Errors that can occur while detecting the Mac model
#[derive(Error, Debug)]
pub enum HardwareError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Unable to parse hardware inventory: {0}")]
    Plist(#[from] plist::Error),

    #[error("Hardware inventory does not report a machine model")]
    MissingModel,
}

/// Errors that can occur while reading the BootCamp version descriptor
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Version descriptor is not valid XML: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("Version descriptor has no MsiInfo/ProductVersion")]
    MissingVersion,

    #[error("Version {0:?} cannot be used in a file name")]
    InvalidVersion(String),
}

/// Errors that can occur while writing the driver archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid archive path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

/// The user pressed Ctrl-C while an operation was running
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Operation cancelled by user")]
pub struct Interrupted;
