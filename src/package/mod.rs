//! Unpacking of downloaded BootCampESD packages.
//!
//! Resources acquired here release themselves: the workspace removes its
//! directory and the mounted volume detaches when dropped.

pub mod descriptor;
pub mod mount;
pub mod steps;
pub mod workspace;

// Re-export main types
pub use descriptor::{parse_product_version, read_product_version};
pub use mount::MountedVolume;
pub use steps::{expand_package, extract_payload};
pub use workspace::ExtractionWorkspace;
