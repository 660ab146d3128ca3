//! Vendorize - vendor the parts of a snap into pinned git branches

use clap::Parser;

use vendorize::cli::Cli;
use vendorize::error::{Result, fs};
use vendorize::git::Git;
use vendorize::orchestrator::{Orchestrator, RunSummary, Settings, is_self_invocation};
use vendorize::plugin::PluginRegistry;
use vendorize::ui::display::print_summary;
use vendorize::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};

fn settings_from(cli: Cli) -> Result<Settings> {
    let project_dir = dunce::canonicalize(&cli.project_dir).map_err(|e| {
        fs::read_failed(cli.project_dir.display().to_string(), e.to_string())
    })?;
    let snap_name = std::env::var("SNAP_NAME").ok();

    let mut settings = Settings::new(project_dir, cli.target)
        .with_allowed_hosts(cli.allowed_hosts)
        .with_dry_run(cli.dry_run)
        .with_driver_self_invocation(is_self_invocation(snap_name.as_deref()));
    if let Some(file) = cli.file {
        settings = settings.with_descriptor_file(file);
    }
    Ok(settings)
}

fn run(cli: Cli) -> Result<RunSummary> {
    let settings = settings_from(cli)?;
    let git = Git::new(settings.target.clone());
    let plugins = PluginRegistry::with_builtins();

    let mut progress: Box<dyn ProgressReporter> = if settings.dry_run {
        Box::new(SilentProgressReporter)
    } else {
        Box::new(InteractiveProgressReporter::new())
    };

    Orchestrator::new(settings, &git, &plugins)?.run(progress.as_mut())
}

fn main() {
    let cli = Cli::parse();
    vendorize::logging::init(cli.debug);

    match run(cli) {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
