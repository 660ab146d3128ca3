//! Python package vendoring
//!
//! Every declared dependency is downloaded as a source distribution into a
//! cache under the part's work area, unpacked, and pinned on its own branch
//! `<project>_python_packages_<dir>`. The part's `requirements.txt` is then
//! regenerated to list the pinned branches, so a later build installs exactly
//! the vendored sources.

pub mod archive;
pub mod fetch;
pub mod metadata;
pub mod requirements;

use std::path::PathBuf;

use tracing::{debug, info};

pub use fetch::{FetchReport, PackageFetcher, PipFetcher};

use super::{DependencyPlugin, PluginContext, Pinner};
use crate::branch::BranchPath;
use crate::descriptor::Component;
use crate::error::{Result, fs};

/// Identifier the plugin is registered under
pub const PLUGIN_ID: &str = "python";
/// Name of the generated manifest inside the part's copy
pub const MANIFEST_FILE: &str = "requirements.txt";
/// Cache directory below the part's work area
pub const CACHE_DIR: &str = "python-packages";
/// Middle segment of every dependency branch
pub const BRANCH_SEGMENT: &str = "python_packages";

pub struct PythonPlugin {
    ctx: PluginContext,
    fetcher: Box<dyn PackageFetcher>,
    python: String,
}

impl PythonPlugin {
    pub fn new(ctx: PluginContext) -> Self {
        Self::with_fetcher(ctx, Box::new(PipFetcher::default()))
    }

    pub fn with_fetcher(ctx: PluginContext, fetcher: Box<dyn PackageFetcher>) -> Self {
        Self {
            ctx,
            fetcher,
            python: "python3".to_string(),
        }
    }

    /// Interpreter used to evaluate `setup.py`
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.ctx.part_dir.join(CACHE_DIR)
    }

    fn write_manifest(&self, lines: &[String]) -> Result<()> {
        std::fs::create_dir_all(&self.ctx.copy_dir).map_err(|e| {
            fs::write_failed(self.ctx.copy_dir.display().to_string(), e.to_string())
        })?;
        let path = self.ctx.copy_dir.join(MANIFEST_FILE);
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        std::fs::write(&path, content)
            .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
    }
}

impl std::fmt::Debug for PythonPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonPlugin")
            .field("ctx", &self.ctx)
            .field("python", &self.python)
            .finish_non_exhaustive()
    }
}

impl DependencyPlugin for PythonPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn process(&mut self, component: &mut Component, pinner: &mut dyn Pinner) -> Result<()> {
        let cache = self.cache_dir();
        std::fs::create_dir_all(&cache)
            .map_err(|e| fs::write_failed(cache.display().to_string(), e.to_string()))?;

        let packages = requirements::assemble(component, &self.ctx.source_dir, &self.python)?;
        let report = fetch::fetch_all(self.fetcher.as_ref(), &packages, &cache);
        if !report.failed.is_empty() {
            info!(
                part = %self.ctx.component_name,
                "{} of {} dependencies could not be fetched",
                report.failed.len(),
                packages.len()
            );
        }

        archive::unpack_archives(&cache)?;

        let directories = archive::package_directories(&cache)?;
        debug!(
            "Branching: {}",
            directories
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut manifest = Vec::with_capacity(directories.len());
        for (name, directory) in &directories {
            let path =
                BranchPath::new([self.ctx.project_name.as_str(), BRANCH_SEGMENT, name.as_str()]);
            let message = format!("Vendor {name}");
            let address = pinner.pin(&path, directory, true, Some(&message))?;
            manifest.push(address.as_requirement());
        }

        self.write_manifest(&manifest)?;
        component.set_option(requirements::REQUIREMENTS_KEY, MANIFEST_FILE);
        component.remove_option(requirements::PACKAGES_KEY);
        Ok(())
    }
}
