use crate::catalog::Fetch;
use crate::output::Console;
use crate::runner::CommandRunner;
use crate::utils::config::Settings;
use crate::utils::interrupt::Interrupt;
use std::fmt;
use std::path::PathBuf;

/// Arguments for the find command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct FindArgs {
    /// Mac model to search for; detected from the hardware when `None`
    pub model: Option<String>,

    /// Catalog URL overriding the configured one
    pub catalog_url: Option<String>,
}

/// Arguments for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    /// Downloaded BootCampESD.pkg
    pub package: PathBuf,

    /// Directory for the archive; the package's directory when `None`
    pub output_dir: Option<PathBuf>,
}

/// Collaborators shared by every command
pub struct Session<'a> {
    pub settings: &'a Settings,
    pub runner: &'a dyn CommandRunner,
    pub fetcher: &'a dyn Fetch,
    pub console: &'a dyn Console,
    pub interrupt: Interrupt,
}

/// Result of searching the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// Exactly one package supports the model
    Found(String),
    /// Several packages support the model, in catalog order
    Ambiguous(Vec<String>),
    NotFound,
}

impl FindOutcome {
    pub fn from_matches(mut urls: Vec<String>) -> Self {
        match urls.len() {
            0 => Self::NotFound,
            1 => Self::Found(urls.remove(0)),
            _ => Self::Ambiguous(urls),
        }
    }

    pub fn urls(&self) -> Vec<&str> {
        match self {
            Self::Found(url) => vec![url.as_str()],
            Self::Ambiguous(urls) => urls.iter().map(String::as_str).collect(),
            Self::NotFound => Vec::new(),
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound => 1,
            _ => 0,
        }
    }
}

/// Condition that stops a build before it produces anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// A Boot Camp volume is already mounted at this path
    VolumeMounted(PathBuf),
    /// The package path is not a regular file
    PackageMissing(PathBuf),
    /// Refusing to overwrite an earlier archive
    ArchiveExists(PathBuf),
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VolumeMounted(path) => write!(
                f,
                "The Boot Camp volume ({}) already appears to be mounted",
                path.display()
            ),
            Self::PackageMissing(path) => write!(f, "Unable to find file {}", path.display()),
            Self::ArchiveExists(path) => {
                write!(f, "An archive already exists at \"{}\"", path.display())
            }
        }
    }
}

impl Precondition {
    /// What the user should do about it, if anything
    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            Self::VolumeMounted(_) => Some("Please eject this volume and try again"),
            Self::PackageMissing(_) => None,
            Self::ArchiveExists(_) => Some("Please move or delete it and try again"),
        }
    }
}

/// Result of a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Path of the finished archive
    Archived(PathBuf),
    Refused(Precondition),
}

impl BuildOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Archived(_) => 0,
            Self::Refused(_) => 1,
        }
    }
}
