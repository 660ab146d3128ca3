//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// Vendorize - pin every source a snap build needs into one git repository
#[derive(Parser, Debug)]
#[command(
    name = "vendorize",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Vendor the parts of a snapcraft project into git branches",
    long_about = "Vendorize copies a snapcraft project, pins every part and every Python \
                  dependency it declares onto its own branch of the target repository, \
                  and rewrites snapcraft.yaml so the build only reads pinned sources.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  vendorize --target git+ssh://git.example.com/demo.git\n    \
                  vendorize --target git+ssh://git.example.com/demo.git --allowed-host github.com\n    \
                  vendorize --project-dir ./demo --target file:///srv/git/demo.git --dry-run"
)]
pub struct Cli {
    /// Project directory holding snapcraft.yaml (defaults to current directory)
    #[arg(long, short = 'p', env = "VENDORIZE_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Git repository the vendored branches are pushed to
    #[arg(long, short = 't', env = "VENDORIZE_TARGET")]
    pub target: String,

    /// Host whose sources are used as-is (repeatable)
    #[arg(
        long = "allowed-host",
        short = 'a',
        env = "VENDORIZE_ALLOWED_HOSTS",
        value_delimiter = ','
    )]
    pub allowed_hosts: Vec<String>,

    /// Descriptor path relative to the project directory
    #[arg(long, short = 'f', env = "VENDORIZE_FILE")]
    pub file: Option<PathBuf>,

    /// Validate the project without writing or pushing anything
    #[arg(long, env = "VENDORIZE_DRY_RUN")]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(long, short = 'd', env = "VENDORIZE_DEBUG")]
    pub debug: bool,
}
