//! Version-control adapter
//!
//! This module handles:
//! - Cloning remote parts (full clone, no retry)
//! - Snapshotting a directory onto a deterministically named branch
//! - Publishing branches to the target repository
//!
//! Every operation either fully succeeds or returns a fatal error; there is
//! no partial-success state at this layer.

pub mod auth;
pub mod branch;
pub mod clone;
pub mod error;
pub mod push;
pub mod url;

use std::path::Path;

use tracing::info;

pub use branch::BranchUpdate;

use crate::error::Result;

/// Operations the orchestrator needs from a version-control backend
pub trait SourceControl {
    /// Full clone of `remote` into `destination`
    fn clone_repository(&self, remote: &str, destination: &Path) -> Result<()>;

    /// Snapshot `directory` onto `branch`, committing only when it changed
    fn prepare_branch(
        &self,
        directory: &Path,
        branch: &str,
        init: bool,
        message: Option<&str>,
    ) -> Result<BranchUpdate>;

    /// Push `branch` from `directory` to the target remote; never called in dry-run mode
    fn upload_branch(&self, directory: &Path, branch: &str) -> Result<()>;
}

/// git2-backed adapter pushing to a single target remote
#[derive(Debug, Clone)]
pub struct Git {
    target: String,
}

impl Git {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl SourceControl for Git {
    fn clone_repository(&self, remote: &str, destination: &Path) -> Result<()> {
        clone::clone(remote, destination).map(|_| ())
    }

    fn prepare_branch(
        &self,
        directory: &Path,
        branch: &str,
        init: bool,
        message: Option<&str>,
    ) -> Result<BranchUpdate> {
        branch::prepare_branch(directory, branch, init, message)
    }

    fn upload_branch(&self, directory: &Path, branch: &str) -> Result<()> {
        info!(branch, "pushing to {}", self.target);
        push::upload_branch(directory, branch, &self.target)
    }
}
