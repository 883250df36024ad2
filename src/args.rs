use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Command-line arguments for otter-deb
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Clear an existing staging directory without asking
    pub yes: bool,

    /// Never clear an existing staging directory
    pub keep: bool,

    /// Stage only; skip the archiver
    pub no_archive: bool,

    /// Package directory holding control, changelog, copyright and rules
    pub path: Option<PathBuf>,

    /// Alternative config file
    pub config: Option<PathBuf>,

    /// Release binary to package
    pub binary: Option<PathBuf>,

    /// Output .deb file
    pub output: Option<PathBuf>,

    /// Archiver command
    pub archiver: Option<String>,
}

/// Clear decision derived from `--yes` / `--keep`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    Ask,
    Always,
    Never,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            yes: matches.get_flag("yes"),
            keep: matches.get_flag("keep"),
            no_archive: matches.get_flag("no-archive"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            config: matches.get_one::<String>("config").map(PathBuf::from),
            binary: matches.get_one::<String>("binary").map(PathBuf::from),
            output: matches.get_one::<String>("output").map(PathBuf::from),
            archiver: matches.get_one::<String>("archiver").cloned(),
        }
    }

    pub fn clear_mode(&self) -> ClearMode {
        if self.yes {
            ClearMode::Always
        } else if self.keep {
            ClearMode::Never
        } else {
            ClearMode::Ask
        }
    }
}

fn command() -> Command {
    Command::new("otter-deb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stage the otter compiler into a Debian package and build the .deb")
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .help("Package directory holding control, changelog, copyright and rules")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file to use instead of deb.toml in the package directory")
        )
        .arg(
            Arg::new("binary")
                .short('b')
                .long("binary")
                .value_name("FILE")
                .help("Release binary to package (default: ../target/release/otter)")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output .deb file (default: otterlang.deb in the package directory)")
        )
        .arg(
            Arg::new("archiver")
                .long("archiver")
                .value_name("COMMAND")
                .env("OTTER_DEB_ARCHIVER")
                .help("Archiver invoked as `COMMAND -b <root> <output>` (default: dpkg-deb)")
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .action(ArgAction::SetTrue)
                .conflicts_with("keep")
                .help("Clear an existing staging directory without asking")
        )
        .arg(
            Arg::new("keep")
                .long("keep")
                .action(ArgAction::SetTrue)
                .help("Keep an existing staging directory without asking")
        )
        .arg(
            Arg::new("no-archive")
                .long("no-archive")
                .action(ArgAction::SetTrue)
                .help("Stage files only; do not run the archiver")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output")
        )
}
