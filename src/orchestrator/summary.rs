//! Outcome of a run

use std::path::PathBuf;

/// What a run touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Declared project name
    pub project: String,
    /// Descriptor path relative to the project root
    pub descriptor: PathBuf,
    /// Address prefix of every pinned branch
    pub clone_url: String,
    /// Branches pinned (or planned, in dry-run mode), sorted
    pub branches: Vec<String>,
    /// False in dry-run mode
    pub published: bool,
}
