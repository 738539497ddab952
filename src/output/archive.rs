//! ZIP archive output for the extracted driver tree.

use crate::utils::error::ArchiveError;
use crate::utils::interrupt::Interrupt;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries at or above this size need ZIP64 headers
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// What went into an archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub files: usize,
    pub directories: usize,
    pub symlinks: usize,
    pub bytes: u64,
}

/// File name of the archive for a BootCamp version
pub fn archive_file_name(version: &str) -> String {
    format!("BootCamp {}.zip", version)
}

/// Where the archive for `version` goes when built from `package`.
///
/// The archive sits next to the package unless `output_dir` is given. A
/// package named without any directory resolves to the current directory.
pub fn archive_path(package: &Path, version: &str, output_dir: Option<&Path>) -> PathBuf {
    let dir = output_dir
        .or_else(|| package.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    dir.join(archive_file_name(version))
}

/// Archive the contents of `source_dir` into a ZIP file at `destination`.
///
/// Entry names are relative to `source_dir`. The archive is written to a
/// temporary file beside `destination` and renamed into place once
/// complete, so a failure never leaves a truncated archive behind.
///
/// `interrupt` is checked before every entry; once raised, the staging file
/// is discarded and [`ArchiveError::Interrupted`] is returned.
pub fn create_zip_archive(
    source_dir: &Path,
    destination: &Path,
    interrupt: &Interrupt,
) -> Result<ArchiveSummary, ArchiveError> {
    if !source_dir.is_dir() {
        return Err(ArchiveError::InvalidPath(format!(
            "Source is not a directory: {}",
            source_dir.display()
        )));
    }

    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    info!(
        "Archiving {} into {}",
        source_dir.display(),
        destination.display()
    );

    let staging = NamedTempFile::new_in(parent)?;
    let mut zip = ZipWriter::new(BufWriter::new(staging.reopen()?));
    let summary = add_tree(&mut zip, source_dir, interrupt)?;

    let mut writer = zip.finish()?;
    writer.flush()?;
    drop(writer);

    staging
        .persist(destination)
        .map_err(|e| ArchiveError::Io(e.error))?;

    debug!(
        "Archived {} files, {} directories, {} symlinks ({} bytes)",
        summary.files, summary.directories, summary.symlinks, summary.bytes
    );

    Ok(summary)
}

/// Recursively add directory contents to a ZIP archive
fn add_tree<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    source_dir: &Path,
    interrupt: &Interrupt,
) -> Result<ArchiveSummary, ArchiveError> {
    let mut summary = ArchiveSummary::default();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        interrupt.check()?;

        let entry = entry?;
        let path = entry.path();
        let name = entry_name(path, source_dir)?;
        let metadata = entry.metadata()?;
        let file_type = entry.file_type();
        let options = entry_options(&metadata);

        if file_type.is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
            summary.directories += 1;
        } else if file_type.is_symlink() {
            let target = std::fs::read_link(path)?;
            zip.add_symlink(name, target.to_string_lossy().into_owned(), options)?;
            summary.symlinks += 1;
        } else if file_type.is_file() {
            zip.start_file(name, options.large_file(metadata.len() >= ZIP64_THRESHOLD))?;
            let mut file = File::open(path)?;
            summary.bytes += io::copy(&mut file, zip)?;
            summary.files += 1;
        } else {
            debug!("Skipping special file {}", path.display());
        }
    }

    Ok(summary)
}

/// Forward-slash separated name of `path` relative to `base`
fn entry_name(path: &Path, base: &Path) -> Result<String, ArchiveError> {
    let relative = path.strip_prefix(base).map_err(|_| {
        ArchiveError::InvalidPath(format!(
            "{} is outside {}",
            path.display(),
            base.display()
        ))
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

#[cfg(unix)]
fn entry_options(metadata: &std::fs::Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;

    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn entry_options(_metadata: &std::fs::Metadata) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}
