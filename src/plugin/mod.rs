//! Dependency plugins
//!
//! A plugin vendors the third-party dependencies *inside* a part. It receives
//! the part's declared options, a readable source tree and a writable copy,
//! fetches what the part depends on, pins every dependency through the
//! [`Pinner`] it is handed, and rewrites the part so the build reads the
//! pinned addresses instead of the original declarations.
//!
//! Plugins never touch git or the branch registry themselves: the
//! orchestrator implements [`Pinner`] and owns all branch state.
//!
//! ## Adding a plugin
//!
//! 1. Implement [`DependencyPlugin`] in a submodule
//! 2. Register a factory in [`PluginRegistry::with_builtins`]

pub mod python;
pub mod registry;

use std::path::{Path, PathBuf};

pub use registry::{PluginFactory, PluginRegistry, Resolution};

use crate::branch::{BranchPath, PinAddress};
use crate::descriptor::Component;
use crate::error::Result;

/// Everything a plugin is constructed with
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// Declared project name, first segment of every dependency branch
    pub project_name: String,
    /// Name of the part being processed
    pub component_name: String,
    /// The part's source tree as declared (read-only)
    pub source_dir: PathBuf,
    /// Writable copy of the source tree; manifests are written here
    pub copy_dir: PathBuf,
    /// Per-part work area for caches (`<project>/parts/<part>`)
    pub part_dir: PathBuf,
}

/// Pinning operation the orchestrator lends to plugins
pub trait Pinner {
    /// Commit `directory` onto the branch named by `path` and return its address
    fn pin(
        &mut self,
        path: &BranchPath,
        directory: &Path,
        init: bool,
        message: Option<&str>,
    ) -> Result<PinAddress>;
}

/// A language-specific dependency vendoring handler
pub trait DependencyPlugin {
    /// Identifier the plugin is registered under
    fn id(&self) -> &str;

    /// Vendor the part's dependencies and rewrite its options
    fn process(&mut self, component: &mut Component, pinner: &mut dyn Pinner) -> Result<()>;
}
