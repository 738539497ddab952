//! Output for the user: terminal status lines and the driver archive.
//!
//! This module handles:
//! - Colorized console messages
//! - ZIP archives of the Windows Support volume

pub mod archive;
pub mod console;

// Re-export main functions
pub use archive::{archive_file_name, archive_path, create_zip_archive, ArchiveSummary};
pub use console::{Console, Status, TerminalConsole};
