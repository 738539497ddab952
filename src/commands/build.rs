//! Build command implementation.
//!
//! The build command:
//! 1. Checks that no Boot Camp volume is mounted and the package exists
//! 2. Expands the package into a temporary workspace
//! 3. Extracts the payload
//! 4. Attaches the Windows Support image
//! 5. Reads the BootCamp version
//! 6. Archives the volume next to the package
//! 7. Detaches the image and removes the workspace
//!
//! The workspace and the mounted volume are guards, so step 7 also happens
//! when anything in between fails.

use super::models::{BuildArgs, BuildOutcome, Precondition, Session};
use crate::output::{archive_path, create_zip_archive, Console};
use crate::package::{
    expand_package, extract_payload, read_product_version, ExtractionWorkspace, MountedVolume,
};
use crate::utils::config::Settings;
use crate::utils::error::ArchiveError;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the build command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// `BuildOutcome::Archived` with the archive path, or
/// `BuildOutcome::Refused` when a precondition does not hold
///
/// # Errors
/// * External tool failures (`pkgutil`, `tar`, `hdiutil`)
/// * Unreadable version descriptor
/// * Archive write errors
/// * User interruption
pub fn execute_build(args: &BuildArgs, session: &Session) -> Result<BuildOutcome> {
    let start_time = Instant::now();
    let settings = session.settings;
    let console = session.console;
    let runner = session.runner;

    if let Some(precondition) = check_preconditions(args, settings) {
        return Ok(refuse(precondition, console));
    }

    let workspace =
        ExtractionWorkspace::create(settings).context("Failed to create temporary directory")?;
    console.success(&format!(
        "Using temporary directory {}",
        workspace.path().display()
    ));
    session.interrupt.check()?;

    console.info("Extracting the BootCampESD package");
    expand_package(runner, &args.package, &workspace)
        .context("Failed to expand the BootCampESD package")?;
    session.interrupt.check()?;

    console.info("Extracting the Payload from the BootCampESD package");
    extract_payload(runner, &workspace, settings.strip_components)
        .context("Failed to extract the package payload")?;
    session.interrupt.check()?;

    console.info("Attaching the Windows Support DMG image");
    let volume = MountedVolume::attach(runner, &workspace.disk_image_path(), &settings.volume_path)
        .context("Failed to attach the Windows Support image")?;

    let version = read_product_version(volume.mount_point())
        .context("Failed to determine the BootCamp version")?;
    console.success(&format!(
        "Determined your BootCamp version to be {}",
        version
    ));

    let archive = archive_path(&args.package, &version, args.output_dir.as_deref());
    if archive.exists() {
        return Ok(refuse(Precondition::ArchiveExists(archive), console));
    }
    session.interrupt.check()?;

    console.info("Creating a ZIP archive of the BootCamp Windows installer");
    let summary = match create_zip_archive(volume.mount_point(), &archive, &session.interrupt) {
        Err(ArchiveError::Interrupted(interrupted)) => return Err(interrupted.into()),
        result => result
            .with_context(|| format!("Failed to create archive {}", archive.display()))?,
    };
    info!(
        "Archived {} files ({} bytes) from {}",
        summary.files,
        summary.bytes,
        settings.volume_path.display()
    );

    console.info("Detaching the Windows Support DMG image");
    volume
        .detach()
        .context("Failed to detach the Windows Support image")?;

    console.info("Cleaning up temporary directory");
    workspace
        .close()
        .context("Failed to remove temporary directory")?;

    console.success("All processing was completed successfully!");
    console.success(&format!(
        "Your BootCamp archive is available at \"{}\"",
        archive.display()
    ));

    info!(
        "Build completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(BuildOutcome::Archived(archive))
}

/// Checks that must pass before anything touches the filesystem
///
/// **Public** - can be called before execute_build for early validation
pub fn check_preconditions(args: &BuildArgs, settings: &Settings) -> Option<Precondition> {
    if settings.volume_path.exists() {
        return Some(Precondition::VolumeMounted(settings.volume_path.clone()));
    }

    if !args.package.is_file() {
        return Some(Precondition::PackageMissing(args.package.clone()));
    }

    None
}

fn refuse(precondition: Precondition, console: &dyn Console) -> BuildOutcome {
    console.failure(&precondition.to_string());
    if let Some(remedy) = precondition.remedy() {
        console.failure(remedy);
    }
    BuildOutcome::Refused(precondition)
}
