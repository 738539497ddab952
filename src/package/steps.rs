//! External tool steps that unpack a BootCampESD package.
//!
//! `pkgutil` expands the flat package, then `tar` unpacks its gzip'd
//! payload into the workspace, dropping the leading directories so the
//! Windows Support image lands at `BootCamp/WindowsSupport.dmg`.

use super::workspace::ExtractionWorkspace;
use crate::runner::{CommandRunner, Invocation};
use crate::utils::error::CommandError;
use std::path::Path;

/// `pkgutil --expand <package> <workspace>/BootCampESD`
pub fn expand_invocation(package: &Path, workspace: &ExtractionWorkspace) -> Invocation {
    Invocation::new("pkgutil")
        .arg("--expand")
        .arg(package)
        .arg(workspace.expanded_package_dir())
}

/// `tar xfz <payload> --strip <n> -C <workspace>`
pub fn extract_invocation(workspace: &ExtractionWorkspace, strip_components: u32) -> Invocation {
    Invocation::new("tar")
        .arg("xfz")
        .arg(workspace.payload_path())
        .arg("--strip")
        .arg(strip_components.to_string())
        .arg("-C")
        .arg(workspace.path())
}

/// Expand the flat installer package into the workspace
pub fn expand_package(
    runner: &dyn CommandRunner,
    package: &Path,
    workspace: &ExtractionWorkspace,
) -> Result<(), CommandError> {
    runner.run(&expand_invocation(package, workspace))?;
    Ok(())
}

/// Extract the payload archive of an expanded package
pub fn extract_payload(
    runner: &dyn CommandRunner,
    workspace: &ExtractionWorkspace,
    strip_components: u32,
) -> Result<(), CommandError> {
    runner.run(&extract_invocation(workspace, strip_components))?;
    Ok(())
}
