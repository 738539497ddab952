//! Campies CLI
//!
//! Locates the BootCamp driver package for your Mac and builds a
//! driver archive from a downloaded package.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use env_logger::Env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use campies::catalog::HttpFetcher;
use campies::commands::{execute_build, execute_find, exit_status, BuildArgs, FindArgs, Session};
use campies::output::{Console, TerminalConsole};
use campies::runner::SystemRunner;
use campies::utils::config::Settings;
use campies::utils::interrupt::Interrupt;

/// Exit status for command line errors
const USAGE_EXIT_CODE: u8 = 2;

/// Campies - BootCamp driver packages for your Mac
#[derive(Parser, Debug)]
#[command(name = "campies")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// HTTP timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Find a suitable BootCamp package for your Mac
    Find {
        /// Explicitly specify the Mac model to search for
        #[arg(short, long, env = "CAMPIES_MODEL")]
        model: Option<String>,

        /// Override the default catalog URL
        #[arg(
            short = 'u',
            long = "catalog_url",
            alias = "catalog-url",
            env = "CAMPIES_CATALOG_URL"
        )]
        catalog_url: Option<String>,
    },

    /// Build a ZIP driver archive using a downloaded BootCamp package
    Build {
        /// The full path of the downloaded BootCampESD.pkg package
        bootcamp_package: PathBuf,

        /// Write the archive here instead of next to the package
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let argv: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(err) if !shows_full_help(err.kind()) => err.exit(),
        Err(err) => {
            eprintln!("{}", full_help(&argv));
            // Nothing sensible is left to do if stderr is gone
            let _ = err.print();
            return Ok(ExitCode::from(USAGE_EXIT_CODE));
        }
    };

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut settings = Settings::default().with_colorize(!cli.no_color);
    if let Some(secs) = cli.timeout {
        settings = settings.with_http_timeout(Duration::from_secs(secs));
    }

    let console = TerminalConsole::new(settings.colorize);
    print_banner(&console);

    let interrupt = Interrupt::install().context("Failed to install Ctrl-C handler")?;
    let runner = SystemRunner::new();
    let fetcher = HttpFetcher::new(&settings).context("Failed to create HTTP client")?;

    let session = Session {
        settings: &settings,
        runner: &runner,
        fetcher: &fetcher,
        console: &console,
        interrupt: interrupt.clone(),
    };

    // Execute command
    let result = match cli.command {
        Commands::Find { model, catalog_url } => {
            let args = FindArgs { model, catalog_url };
            execute_find(&args, &session).map(|outcome| outcome.exit_code())
        }

        Commands::Build {
            bootcamp_package,
            output_dir,
        } => {
            let args = BuildArgs {
                package: bootcamp_package,
                output_dir,
            };
            execute_build(&args, &session).map(|outcome| outcome.exit_code())
        }
    };

    exit_status(result, &interrupt, &console).map(ExitCode::from)
}

/// Whether a parse error should be followed by the full help text.
///
/// Help and version requests already print what the user asked for.
fn shows_full_help(kind: ErrorKind) -> bool {
    !matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Long help of the subcommand named in `argv`, or of the whole CLI
fn full_help(argv: &[OsString]) -> String {
    let mut command = Cli::command();
    command.build();

    let subcommand = argv
        .iter()
        .skip(1)
        .filter_map(|arg| arg.to_str())
        .find(|arg| command.find_subcommand(arg).is_some())
        .map(str::to_string);

    match subcommand.and_then(|name| command.find_subcommand_mut(&name)) {
        Some(sub) => sub.render_long_help().to_string(),
        None => command.render_long_help().to_string(),
    }
}

fn banner_lines() -> [&'static str; 2] {
    [
        concat!("Campies v", env!("CARGO_PKG_VERSION")),
        concat!("(", env!("CARGO_PKG_REPOSITORY"), ")"),
    ]
}

/// Print script header
fn print_banner(console: &dyn Console) {
    for line in banner_lines() {
        console.heading(line);
    }
    console.blank();
}
