//! Vendoring orchestrator
//!
//! One run walks the descriptor's parts in order and, per part:
//!
//! 1. Classifies its source as local, foreign (must be obtained) or trusted
//! 2. Obtains foreign sources by cloning or through the build driver
//! 3. Runs the part's dependency plugin, if it has one
//! 4. Pins the part itself on `<project>_<part>`
//!
//! Afterwards the rewritten descriptor is committed to `master` in the staging
//! area and every branch recorded during the run is pushed. Any error aborts the
//! run before the publish phase, so a failed run never pushes anything.

pub mod context;
pub mod settings;
pub mod summary;

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

pub use context::RunContext;
pub use settings::{Settings, is_self_invocation};
pub use summary::RunSummary;

use crate::branch::BranchPath;
use crate::common::fs::{CopyOptions, copy_dir_recursive, is_empty_dir, list_copy_entries};
use crate::descriptor::{BuildDescriptor, Component, locate_descriptor, resolve_relative};
use crate::error::{Result, config, fs, plugin, source};
use crate::git::SourceControl;
use crate::git::url::{clone_url_for_target, looks_like_git_remote};
use crate::plugin::{Pinner, PluginContext, PluginRegistry, Resolution};
use crate::policy::{HostPolicy, host_of};
use crate::ui::ProgressReporter;

/// Key recording the pinned branch of an obtained part
const SOURCE_BRANCH_KEY: &str = "source-branch";
/// Commit message for an obtained part after its plugin rewrote it
const UPDATE_MESSAGE: &str = "Update requirements";
/// Branch holding the rewritten project
const MASTER_BRANCH: &str = "master";

/// How a part's source is vendored
#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceKind {
    /// Inside the project: `source_dir` is read, `copy_dir` in the staging area is written
    Local { source_dir: PathBuf, copy_dir: PathBuf },
    /// On a foreign host: obtained into the part's work area
    Foreign { copy_dir: PathBuf },
    /// On an allowed host: nothing to vendor
    Trusted,
    /// Neither a project path nor a location with a host
    Unrecognized,
}

pub struct Orchestrator<'a> {
    settings: Settings,
    policy: HostPolicy,
    plugins: &'a PluginRegistry,
    context: RunContext<'a>,
}

impl<'a> Orchestrator<'a> {
    /// Validate the target against the allowed hosts; nothing is touched on disk
    pub fn new(
        settings: Settings,
        vcs: &'a dyn SourceControl,
        plugins: &'a PluginRegistry,
    ) -> Result<Self> {
        let clone_url = clone_url_for_target(&settings.target);
        let policy = HostPolicy::new(settings.allowed_hosts.iter().cloned());
        if policy.is_foreign(&settings.target) {
            return Err(config::foreign_target(clone_url));
        }
        let context = RunContext::new(vcs, clone_url, settings.dry_run);
        Ok(Self {
            settings,
            policy,
            plugins,
            context,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Vendor every part, rewrite the descriptor and publish all branches
    pub fn run(mut self, progress: &mut dyn ProgressReporter) -> Result<RunSummary> {
        let result = self.run_phases(progress);
        match result {
            Ok(summary) => {
                progress.finish();
                Ok(summary)
            }
            Err(e) => {
                progress.abandon();
                Err(e)
            }
        }
    }

    fn run_phases(&mut self, progress: &mut dyn ProgressReporter) -> Result<RunSummary> {
        let root = self.settings.project_dir.clone();
        let descriptor_path = match &self.settings.descriptor_file {
            Some(file) => resolve_relative(file)?,
            None => locate_descriptor(&root)?,
        };

        let staging = self.settings.staging_dir();
        if !self.settings.dry_run {
            self.snapshot_project(&staging, progress)?;
        }

        info!("Processing {}", descriptor_path.display());
        let mut descriptor = BuildDescriptor::load(&root.join(&descriptor_path))?;
        if let Some(hosts) = descriptor.allowed_hosts() {
            self.policy = HostPolicy::new(hosts);
        }
        descriptor.set_allowed_hosts(self.policy.allowed_hosts());

        let names = descriptor.component_names();
        progress.start_parts(names.len() as u64);
        for name in &names {
            progress.update_part(name);
            self.process_part(name, &mut descriptor)?;
            progress.inc_part();
        }

        info!("Preparing project");
        let project = descriptor.name().to_string();
        if !self.settings.dry_run {
            descriptor.save(&staging.join(&descriptor_path))?;
        }
        let message = format!("Vendor {project}");
        self.context
            .pin(&BranchPath::new([MASTER_BRANCH]), &staging, false, Some(&message))?;

        if !self.settings.dry_run {
            self.context.publish_all()?;
        }

        Ok(RunSummary {
            project,
            descriptor: descriptor_path,
            clone_url: self.context.clone_url().to_string(),
            branches: self.context.registry().branch_names(),
            published: !self.settings.dry_run,
        })
    }

    /// Copy the project into an empty staging area; a populated one is reused
    fn snapshot_project(&self, staging: &Path, progress: &mut dyn ProgressReporter) -> Result<()> {
        if !is_empty_dir(staging) {
            debug!(dir = %staging.display(), "staging area already populated");
            return Ok(());
        }
        std::fs::create_dir_all(staging)
            .map_err(|e| fs::write_failed(staging.display().to_string(), e.to_string()))?;

        let root = &self.settings.project_dir;
        let options = CopyOptions::excluding(Settings::snapshot_exclusions());
        let total = list_copy_entries(root, &options)?.len();
        progress.start_copy(total as u64);
        copy_dir_recursive(root, staging, &options, |path| {
            progress.copied(&path.display().to_string());
        })
    }

    fn classify(&self, part: &str, component: &Component) -> SourceKind {
        let declared = component.source();
        if declared.starts_with('.') {
            SourceKind::Local {
                source_dir: self.settings.project_dir.join(declared),
                copy_dir: self.settings.staging_dir().join(declared),
            }
        } else if self.policy.is_foreign(declared) {
            SourceKind::Foreign {
                copy_dir: self.settings.part_dir(part).join("src"),
            }
        } else if host_of(declared).is_some() {
            SourceKind::Trusted
        } else {
            SourceKind::Unrecognized
        }
    }

    fn process_part(&mut self, part: &str, descriptor: &mut BuildDescriptor) -> Result<()> {
        let mut component = descriptor
            .component(part)
            .ok_or_else(|| config::invalid(format!("part '{part}' is not a mapping")))?;
        let branch_path = BranchPath::new([descriptor.name(), part]);
        branch_path.validated_branch_name()?;

        let declared = component.source().to_string();
        debug!(part, source = %declared, "Source");

        let (source_dir, copy_dir, pin_dir, obtained) = match self.classify(part, &component) {
            SourceKind::Local {
                source_dir,
                copy_dir,
            } => {
                // Local parts live in the staging repository: the branch holds the
                // whole staged project even for a `./sub` source
                let staging = self.settings.staging_dir();
                (source_dir, copy_dir, staging, false)
            }
            SourceKind::Foreign { copy_dir } => {
                if !self.settings.dry_run && is_empty_dir(&copy_dir) {
                    self.obtain(part, &declared, &copy_dir).inspect_err(|_| {
                        discard_partial(&copy_dir);
                    })?;
                }
                let address = self.context.pin(&branch_path, &copy_dir, false, None)?;
                component.set_source(address.repository.clone());
                component.set_option(SOURCE_BRANCH_KEY, address.branch.clone());
                (copy_dir.clone(), copy_dir.clone(), copy_dir, true)
            }
            SourceKind::Trusted => return self.accept_trusted(part, &declared, &component),
            SourceKind::Unrecognized => return Err(source::unsupported(declared)),
        };

        let plugin_id = component
            .plugin()
            .map(str::to_string)
            .ok_or_else(|| source::missing_plugin(part))?;

        let plugins = self.plugins;
        let handled = match plugins.resolve(&plugin_id) {
            Resolution::Handler(factory) => {
                if !self.settings.dry_run {
                    let mut handler = factory(PluginContext {
                        project_name: descriptor.name().to_string(),
                        component_name: part.to_string(),
                        source_dir,
                        copy_dir,
                        part_dir: self.settings.part_dir(part),
                    });
                    debug!(part, plugin = handler.id(), "running plugin");
                    handler.process(&mut component, &mut self.context)?;
                }
                true
            }
            Resolution::PassThrough => false,
            Resolution::Unknown => return Err(plugin::unknown(plugin_id)),
        };

        if !obtained {
            self.context.pin(&branch_path, &pin_dir, false, None)?;
        } else if handled {
            self.context
                .pin(&branch_path, &pin_dir, false, Some(UPDATE_MESSAGE))?;
        }

        descriptor.set_component(part, component);
        Ok(())
    }

    /// A part on an allowed host is only legal when it needs no vendoring
    fn accept_trusted(&self, part: &str, declared: &str, component: &Component) -> Result<()> {
        let Some(id) = component.plugin() else {
            return Err(source::missing_plugin(part));
        };
        match self.plugins.resolve(id) {
            Resolution::PassThrough => {
                debug!(part, source = %declared, "trusted source left as declared");
                Ok(())
            }
            Resolution::Handler(_) => Err(source::unsupported(declared)),
            Resolution::Unknown => Err(plugin::unknown(id)),
        }
    }

    /// Fetch a foreign source into `destination`
    fn obtain(&self, part: &str, declared: &str, destination: &Path) -> Result<()> {
        if looks_like_git_remote(declared) {
            std::fs::create_dir_all(destination).map_err(|e| {
                fs::write_failed(destination.display().to_string(), e.to_string())
            })?;
            info!(part, "cloning {declared}");
            return self.context.vcs().clone_repository(declared, destination);
        }

        if self.settings.driver_self_invocation {
            return Err(source::unsupported(declared));
        }
        self.pull_with_build_driver(part)
    }

    /// `snapcraft pull <part>` in the project root
    fn pull_with_build_driver(&self, part: &str) -> Result<()> {
        let Some((program, args)) = self.settings.build_driver.split_first() else {
            return Err(config::invalid("no build driver configured"));
        };
        let label = format!("{} {part}", self.settings.build_driver.join(" "));
        info!(part, "running {label}");

        let status = Command::new(program)
            .args(args)
            .arg(part)
            .current_dir(&self.settings.project_dir)
            .status()
            .map_err(|e| source::command_failed(&label, e.to_string()))?;
        if !status.success() {
            return Err(source::command_failed(label, status.to_string()));
        }
        Ok(())
    }
}

/// Remove what a failed fetch left behind so a rerun fetches again
fn discard_partial(copy_dir: &Path) {
    if !copy_dir.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(copy_dir) {
        warn!(dir = %copy_dir.display(), "failed to clean up: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::BranchUpdate;
    use serde_yaml::Mapping;

    struct NoopVcs;

    impl SourceControl for NoopVcs {
        fn clone_repository(&self, _remote: &str, _destination: &Path) -> Result<()> {
            Ok(())
        }

        fn prepare_branch(
            &self,
            _directory: &Path,
            _branch: &str,
            _init: bool,
            _message: Option<&str>,
        ) -> Result<BranchUpdate> {
            Ok(BranchUpdate::Unchanged)
        }

        fn upload_branch(&self, _directory: &Path, _branch: &str) -> Result<()> {
            Ok(())
        }
    }

    fn component(source: &str) -> Component {
        let mut data = Mapping::new();
        data.insert("source".into(), source.into());
        Component::new(data)
    }

    #[test]
    fn test_classify_sources() {
        let plugins = PluginRegistry::with_builtins();
        let settings = Settings::new("/work/demo", "file:///srv/demo.git")
            .with_allowed_hosts(["github.com"]);
        let orchestrator = Orchestrator::new(settings, &NoopVcs, &plugins).unwrap();

        assert_eq!(
            orchestrator.classify("app", &component("./app")),
            SourceKind::Local {
                source_dir: PathBuf::from("/work/demo/./app"),
                copy_dir: PathBuf::from("/work/demo/snap/vendoring/src/./app"),
            }
        );
        assert_eq!(
            orchestrator.classify("lib", &component("https://git.example.com/lib.git")),
            SourceKind::Foreign {
                copy_dir: PathBuf::from("/work/demo/parts/lib/src"),
            }
        );
        assert_eq!(
            orchestrator.classify("up", &component("https://github.com/example/up.git")),
            SourceKind::Trusted
        );
        assert_eq!(
            orchestrator.classify("abs", &component("/opt/app")),
            SourceKind::Unrecognized
        );
    }

    #[test]
    fn test_foreign_target_rejected() {
        let plugins = PluginRegistry::with_builtins();
        let settings = Settings::new("/work/demo", "git+ssh://untrusted.example.com/repo.git");
        let result = Orchestrator::new(settings, &NoopVcs, &plugins);
        assert!(matches!(
            result.err(),
            Some(crate::error::VendorizeError::ForeignTarget { .. })
        ));
    }
}
