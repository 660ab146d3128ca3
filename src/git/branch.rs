//! Branch preparation: snapshot a directory as a commit on a named branch
//!
//! The working tree is never checked out. Whatever the directory holds right
//! now becomes the content of `branch`; a commit is only written when that
//! content differs from the branch tip, so preparing the same directory twice
//! leaves a single commit.

use std::path::Path;

use git2::{BranchType, Commit, IndexAddOption, Oid, Repository, Signature};
use tracing::debug;

use crate::error::{Result, git};

const FALLBACK_NAME: &str = "vendorize";
const FALLBACK_EMAIL: &str = "vendorize@localhost";

/// Outcome of preparing a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchUpdate {
    /// A new commit was written on the branch
    Committed(Oid),
    /// The branch tip already matches the directory
    Unchanged,
}

/// Open the repository rooted exactly at `directory`, or initialize one.
///
/// `init` forces a fresh initialization; re-initializing an existing
/// repository keeps its history.
fn open_or_init(directory: &Path, init: bool) -> std::result::Result<Repository, git2::Error> {
    if init {
        return Repository::init(directory);
    }
    Repository::open(directory).or_else(|_| Repository::init(directory))
}

fn signature(repo: &Repository) -> std::result::Result<Signature<'static>, git2::Error> {
    repo.signature()
        .map(|s| s.to_owned())
        .or_else(|_| Signature::now(FALLBACK_NAME, FALLBACK_EMAIL))
}

/// Commit the tip of `branch`, if the branch exists
fn branch_tip<'r>(repo: &'r Repository, branch: &str) -> Option<Commit<'r>> {
    repo.find_branch(branch, BranchType::Local)
        .ok()
        .and_then(|b| b.get().peel_to_commit().ok())
}

/// Stage the complete directory content, including deletions
fn stage_all(repo: &Repository) -> std::result::Result<Oid, git2::Error> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.update_all(["*"].iter(), None)?;
    index.write()?;
    index.write_tree()
}

fn prepare(
    directory: &Path,
    branch: &str,
    init: bool,
    message: &str,
) -> std::result::Result<BranchUpdate, git2::Error> {
    let repo = open_or_init(directory, init)?;

    // An existing branch continues its own history; a new one forks from HEAD
    let parent = branch_tip(&repo, branch).or_else(|| {
        repo.head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok())
    });

    let refname = format!("refs/heads/{branch}");
    repo.set_head(&refname)?;

    let tree_id = stage_all(&repo)?;

    if let Some(parent) = &parent {
        if parent.tree_id() == tree_id {
            if repo.find_branch(branch, BranchType::Local).is_err() {
                repo.branch(branch, parent, false)?;
            }
            return Ok(BranchUpdate::Unchanged);
        }
    }

    let tree = repo.find_tree(tree_id)?;
    let sig = signature(&repo)?;
    let parents: Vec<&Commit<'_>> = parent.iter().collect();
    let oid = repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
    Ok(BranchUpdate::Committed(oid))
}

/// Snapshot `directory` onto `branch`.
///
/// With `init`, the directory gets a fresh repository and `branch` becomes its
/// first commit. Otherwise the branch is created or advanced inside the
/// existing repository. An unchanged tree is not an error: no commit is made.
pub fn prepare_branch(
    directory: &Path,
    branch: &str,
    init: bool,
    message: Option<&str>,
) -> Result<BranchUpdate> {
    let default_message = format!("Vendor {branch}");
    let message = message.unwrap_or(&default_message);

    let update = prepare(directory, branch, init, message)
        .map_err(|e| git::branch_failed(branch, directory.display().to_string(), e.message()))?;

    match update {
        BranchUpdate::Committed(oid) => {
            debug!(branch, %oid, dir = %directory.display(), "committed");
        }
        BranchUpdate::Unchanged => {
            debug!(branch, dir = %directory.display(), "nothing to commit");
        }
    }
    Ok(update)
}
