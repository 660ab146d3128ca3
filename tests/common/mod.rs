//! Common test utilities for vendorize integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use git2::{BranchType, Repository};
use tempfile::TempDir;

use vendorize::Result;
use vendorize::error::source;
use vendorize::plugin::python::PackageFetcher;

/// A snapcraft project plus a bare repository to push to
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Project root
    pub project: PathBuf,
    /// Bare push target
    pub remote: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace with an empty project and an empty bare remote
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let project = temp.path().join("project");
        let remote = temp.path().join("remote.git");
        std::fs::create_dir_all(&project).expect("Failed to create project directory");
        Repository::init_bare(&remote).expect("Failed to create bare remote");
        Self {
            temp,
            project,
            remote,
        }
    }

    /// `file://` URL of the bare remote
    pub fn target(&self) -> String {
        format!("file://{}", self.remote.display())
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.project.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.project.join(path)).expect("Failed to read file")
    }

    /// Check if a path exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.project.join(path).exists()
    }

    /// Branch names present in the bare remote, sorted
    pub fn remote_branches(&self) -> Vec<String> {
        let repo = Repository::open_bare(&self.remote).expect("Failed to open remote");
        let mut names: Vec<String> = repo
            .branches(Some(BranchType::Local))
            .expect("Failed to list branches")
            .filter_map(|b| b.ok())
            .filter_map(|(b, _)| b.name().ok().flatten().map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// Content of `path` on `branch` in the bare remote
    pub fn remote_file(&self, branch: &str, path: &str) -> Option<String> {
        let repo = Repository::open_bare(&self.remote).ok()?;
        let commit = repo
            .find_branch(branch, BranchType::Local)
            .ok()?
            .get()
            .peel_to_commit()
            .ok()?;
        let entry = commit.tree().ok()?.get_path(Path::new(path)).ok()?;
        let blob = repo.find_blob(entry.id()).ok()?;
        String::from_utf8(blob.content().to_vec()).ok()
    }

    /// Number of commits reachable from `branch` in the bare remote
    pub fn remote_commit_count(&self, branch: &str) -> usize {
        let repo = Repository::open_bare(&self.remote).expect("Failed to open remote");
        let tip = repo
            .find_branch(branch, BranchType::Local)
            .expect("Missing branch")
            .get()
            .peel_to_commit()
            .expect("Branch without commit");
        let mut walk = repo.revwalk().expect("Failed to walk");
        walk.push(tip.id()).expect("Failed to push tip");
        walk.count()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `<name>.tar.gz` holding a `<name>/` tree with a `setup.py`
pub fn write_sdist(cache: &Path, name: &str) {
    let file = std::fs::File::create(cache.join(format!("{name}.tar.gz")))
        .expect("Failed to create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    let data = format!("from setuptools import setup\nsetup(name='{name}')\n");
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, format!("{name}/setup.py"), data.as_bytes())
        .expect("Failed to append");
    builder
        .into_inner()
        .expect("Failed to finish tar")
        .finish()
        .expect("Failed to finish gzip");
}

/// Fetcher producing an sdist named after the requirement; listed names fail
#[derive(Debug, Default, Clone)]
pub struct FakeFetcher {
    pub failing: Vec<String>,
}

impl FakeFetcher {
    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl PackageFetcher for FakeFetcher {
    fn fetch(&self, requirement: &str, cache: &Path) -> Result<()> {
        if self.failing.iter().any(|f| f == requirement) {
            return Err(source::command_failed(
                format!("pip download {requirement}"),
                "No matching distribution found",
            ));
        }
        write_sdist(cache, requirement);
        Ok(())
    }
}

/// A repository with one commit holding `files`
pub fn init_origin(dir: &Path, files: &[(&str, &str)]) {
    std::fs::create_dir_all(dir).expect("Failed to create origin");
    for (path, content) in files {
        let file = dir.join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(file, content).expect("Failed to write origin file");
    }
    vendorize::git::branch::prepare_branch(dir, "main", true, Some("Initial"))
        .expect("Failed to commit origin");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.project.is_dir());
        assert!(workspace.remote_branches().is_empty());
        assert!(workspace.target().starts_with("file://"));
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("snap/snapcraft.yaml", "name: demo\n");
        assert!(workspace.file_exists("snap/snapcraft.yaml"));
        assert_eq!(workspace.read_file("snap/snapcraft.yaml"), "name: demo\n");
    }
}
