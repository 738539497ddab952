//! Utility modules for configuration, error handling, and shared helpers.

pub mod config;
pub mod error;
pub mod interrupt;
pub mod xml_text;

// Re-export commonly used types for convenience
pub use config::Settings;
pub use error::{
    ArchiveError, CatalogError, CommandError, DescriptorError, DistributionError, FetchError,
    HardwareError, Interrupted, ModelListError,
};
pub use interrupt::Interrupt;
