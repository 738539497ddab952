//! Temporary working directory for one build.

use crate::utils::config::{
    Settings, EXPANDED_PACKAGE_DIR, PAYLOAD_FILE, WINDOWS_SUPPORT_IMAGE,
};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding the expanded package and its payload.
///
/// The directory is removed when the workspace is dropped, whichever way
/// the build ends. [`ExtractionWorkspace::close`] removes it eagerly and
/// reports failures.
#[derive(Debug)]
pub struct ExtractionWorkspace {
    dir: TempDir,
}

impl ExtractionWorkspace {
    /// Create a fresh directory under the configured temp root
    pub fn create(settings: &Settings) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&settings.temp_prefix);

        let dir = match &settings.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Destination of `pkgutil --expand`
    pub fn expanded_package_dir(&self) -> PathBuf {
        self.path().join(EXPANDED_PACKAGE_DIR)
    }

    /// Compressed payload inside the expanded package
    pub fn payload_path(&self) -> PathBuf {
        self.expanded_package_dir().join(PAYLOAD_FILE)
    }

    /// Windows Support image after payload extraction
    pub fn disk_image_path(&self) -> PathBuf {
        self.path().join(WINDOWS_SUPPORT_IMAGE)
    }

    /// Remove the directory now
    pub fn close(self) -> io::Result<()> {
        let path = self.path().to_path_buf();
        self.dir.close().map_err(|e| {
            warn!("Failed to remove workspace {}: {}", path.display(), e);
            e
        })
    }
}
