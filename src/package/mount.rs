//! Disk image attach/detach with `hdiutil`.

use crate::runner::{CommandRunner, Invocation};
use crate::utils::error::CommandError;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// `hdiutil attach -quiet -mountpoint <mount point> <image>`
pub fn attach_invocation(image: &Path, mount_point: &Path) -> Invocation {
    Invocation::new("hdiutil")
        .args(["attach", "-quiet", "-mountpoint"])
        .arg(mount_point)
        .arg(image)
}

/// `hdiutil detach -quiet <mount point>`
pub fn detach_invocation(mount_point: &Path) -> Invocation {
    Invocation::new("hdiutil")
        .args(["detach", "-quiet"])
        .arg(mount_point)
}

/// An attached disk image.
///
/// Detached on drop if [`MountedVolume::detach`] was never called, so an
/// aborted build does not leave the volume mounted.
pub struct MountedVolume<'a> {
    runner: &'a dyn CommandRunner,
    mount_point: PathBuf,
    attached: bool,
}

impl<'a> MountedVolume<'a> {
    /// Attach `image` at `mount_point`
    pub fn attach(
        runner: &'a dyn CommandRunner,
        image: &Path,
        mount_point: &Path,
    ) -> Result<Self, CommandError> {
        runner.run(&attach_invocation(image, mount_point))?;
        debug!("Attached {} at {}", image.display(), mount_point.display());

        Ok(Self {
            runner,
            mount_point: mount_point.to_path_buf(),
            attached: true,
        })
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    /// Detach now, reporting failure
    pub fn detach(mut self) -> Result<(), CommandError> {
        self.attached = false;
        self.runner.run(&detach_invocation(&self.mount_point))?;
        debug!("Detached {}", self.mount_point.display());
        Ok(())
    }
}

impl Drop for MountedVolume<'_> {
    fn drop(&mut self) {
        if !self.attached {
            return;
        }

        warn!("Detaching {} after an aborted build", self.mount_point.display());
        if let Err(e) = self.runner.run(&detach_invocation(&self.mount_point)) {
            warn!("Failed to detach {}: {}", self.mount_point.display(), e);
        }
    }
}
