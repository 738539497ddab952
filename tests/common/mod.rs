//! Fakes shared by the integration tests.

#![allow(dead_code)]

use campies::catalog::Fetch;
use campies::commands::Session;
use campies::output::{Console, Status};
use campies::runner::{CommandRunner, Invocation};
use campies::utils::config::Settings;
use campies::utils::error::{CommandError, FetchError};
use campies::utils::interrupt::Interrupt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOG: &str = "http://catalog.test/index.sucatalog";

// ============================================================================
// Fetcher
// ============================================================================

/// Serves documents from memory and records every request
#[derive(Default)]
pub struct FakeFetcher {
    documents: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(url.to_string(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

// ============================================================================
// Command runner
// ============================================================================

type Handler = Box<dyn Fn(&Invocation) -> Result<Vec<u8>, CommandError>>;

/// Records invocations and answers them with a handler
pub struct FakeRunner {
    handler: Handler,
    pub calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new(handler: impl Fn(&Invocation) -> Result<Vec<u8>, CommandError> + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A runner that must never be called
    pub fn unused() -> Self {
        Self::new(|inv| panic!("unexpected invocation: {}", inv))
    }

    /// Answers `system_profiler` with a hardware report for `model`
    pub fn with_model(model: &str) -> Self {
        let report = hardware_report(model);
        Self::new(move |inv| {
            assert_eq!(inv.program, "system_profiler");
            Ok(report.clone().into_bytes())
        })
    }

    /// `program subcommand` of every call, e.g. `hdiutil attach`
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|inv| match inv.subcommand() {
                Some(sub) if inv.program == "hdiutil" => format!("{} {}", inv.program, sub),
                _ => inv.program.clone(),
            })
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, CommandError> {
        self.calls.borrow_mut().push(invocation.clone());
        (self.handler)(invocation)
    }
}

/// How the simulated macOS tools should behave
#[derive(Debug, Clone, Default)]
pub struct MacTools {
    /// Version written into BootCamp.xml; no descriptor when `None`
    pub version: Option<String>,
    /// Program whose invocation fails
    pub failing: Option<&'static str>,
}

impl MacTools {
    pub fn with_version(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            failing: None,
        }
    }

    pub fn failing(mut self, program: &'static str) -> Self {
        self.failing = Some(program);
        self
    }

    /// A runner that imitates pkgutil, tar and hdiutil on the filesystem
    pub fn runner(self) -> FakeRunner {
        FakeRunner::new(move |inv| {
            if self.failing == Some(inv.program.as_str()) {
                return Err(CommandError::Failed {
                    program: inv.program.clone(),
                    code: Some(1),
                    stderr: format!("{}: simulated failure", inv.program),
                });
            }

            let args = inv.args_lossy();
            let io = |result: std::io::Result<()>| {
                result.map_err(|source| CommandError::Spawn {
                    program: inv.program.clone(),
                    source,
                })
            };

            match (inv.program.as_str(), args[0].as_str()) {
                ("pkgutil", "--expand") => {
                    let expanded = Path::new(&args[2]);
                    io(fs::create_dir_all(expanded))?;
                    io(fs::write(expanded.join("Payload"), b"payload"))?;
                }
                ("tar", "xfz") => {
                    assert_eq!(args[3], "3", "payload strip count");
                    let dest = Path::new(&args[5]);
                    io(fs::create_dir_all(dest.join("BootCamp")))?;
                    io(fs::write(dest.join("BootCamp/WindowsSupport.dmg"), b"dmg"))?;
                }
                ("hdiutil", "attach") => {
                    let mount_point = Path::new(&args[3]);
                    io(populate_volume(mount_point, self.version.as_deref()))?;
                }
                ("hdiutil", "detach") => {
                    io(fs::remove_dir_all(&args[2]))?;
                }
                _ => panic!("unexpected invocation: {}", inv),
            }

            Ok(Vec::new())
        })
    }
}

/// Lay out a Windows Support volume
fn populate_volume(mount_point: &Path, version: Option<&str>) -> std::io::Result<()> {
    fs::create_dir_all(mount_point.join("BootCamp/Drivers/Apple"))?;
    fs::create_dir_all(mount_point.join("$WinPEDriver$"))?;
    fs::write(mount_point.join("AutoUnattend.xml"), b"<unattend/>")?;
    fs::write(mount_point.join("BootCamp/setup.exe"), b"MZ")?;
    fs::write(
        mount_point.join("BootCamp/Drivers/Apple/BootCamp.msi"),
        b"msi",
    )?;

    if let Some(version) = version {
        fs::write(
            mount_point.join("BootCamp/BootCamp.xml"),
            format!(
                "<?xml version=\"1.0\"?>\n<BootCamp><MsiInfo><ProductVersion>{}</ProductVersion></MsiInfo></BootCamp>",
                version
            ),
        )?;
    }

    Ok(())
}

// ============================================================================
// Console
// ============================================================================

/// Keeps every status line for assertions
#[derive(Default)]
pub struct RecordingConsole {
    pub lines: RefCell<Vec<(Status, String)>>,
    trip: Option<(String, Interrupt)>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `interrupt` as soon as a line containing `needle` is printed
    pub fn interrupting_on(needle: &str, interrupt: Interrupt) -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
            trip: Some((needle.to_string(), interrupt)),
        }
    }

    pub fn with_status(&self, status: Status) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, line)| line.contains(needle))
    }
}

impl Console for RecordingConsole {
    fn emit(&self, status: Status, message: &str) {
        if let Some((needle, interrupt)) = &self.trip {
            if message.contains(needle.as_str()) {
                interrupt.trigger();
            }
        }
        self.lines.borrow_mut().push((status, message.to_string()));
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn session<'a>(
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
    fetcher: &'a dyn Fetch,
    console: &'a dyn Console,
) -> Session<'a> {
    Session {
        settings,
        runner,
        fetcher,
        console,
        interrupt: Interrupt::new(),
    }
}

/// A catalog product: id, package URLs and optional English distribution
pub struct ProductFixture<'a> {
    pub id: &'a str,
    pub packages: &'a [&'a str],
    pub english: Option<&'a str>,
}

pub fn catalog_plist(products: &[ProductFixture]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\">\n<dict>\n\
         <key>CatalogVersion</key><integer>2</integer>\n<key>Products</key>\n<dict>\n",
    );

    for product in products {
        xml.push_str(&format!("<key>{}</key>\n<dict>\n<key>Packages</key>\n<array>\n", product.id));
        for url in product.packages {
            xml.push_str(&format!(
                "<dict><key>URL</key><string>{}</string><key>Size</key><integer>1</integer></dict>\n",
                url
            ));
        }
        xml.push_str("</array>\n<key>Distributions</key>\n<dict>\n");
        if let Some(english) = product.english {
            xml.push_str(&format!("<key>English</key><string>{}</string>\n", english));
        }
        xml.push_str("<key>French</key><string>http://catalog.test/fr.dist</string>\n</dict>\n</dict>\n");
    }

    xml.push_str("</dict>\n</dict>\n</plist>\n");
    xml
}

pub fn distribution_xml(models: &[&str]) -> String {
    let list: String = models.iter().map(|m| format!("'{}',", m)).collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<installer-gui-script minSpecVersion="1">
    <title>SU_TITLE</title>
    <script>
var SU_TITLE = 'Boot Camp Support Software';
    </script>
    <script><![CDATA[
function InstallationCheck(prefix) {{
    var models = [{}];
    var currentModel = system.sysctl('hw.model');
    return models.indexOf(currentModel) != -1;
}}
    ]]></script>
</installer-gui-script>"#,
        list
    )
}

pub fn hardware_report(model: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<array>
    <dict>
        <key>_items</key>
        <array>
            <dict>
                <key>_name</key>
                <string>hardware_overview</string>
                <key>machine_model</key>
                <string>{}</string>
            </dict>
        </array>
    </dict>
</array>
</plist>"#,
        model
    )
}

/// Number of entries directly inside `dir`
pub fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

pub fn write_package(dir: &Path) -> PathBuf {
    let package = dir.join("BootCampESD.pkg");
    fs::write(&package, b"xar!").unwrap();
    package
}
