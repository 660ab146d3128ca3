//! Repository cloning
//!
//! A clone is a hard precondition for vendoring a remote part: failures are
//! reported as fatal and never retried.

use std::path::Path;

use git2::{FetchOptions, Repository, build::RepoBuilder};
use tracing::debug;

use super::auth::authenticated_callbacks;
use super::error::interpret_git_error;
use super::url::normalize_for_libgit2;
use crate::error::{Result, git};

/// Full (non-shallow) clone of `url` into `target`
pub fn clone(url: &str, target: &Path) -> Result<Repository> {
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(authenticated_callbacks());

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    let url_to_clone = normalize_for_libgit2(url);
    debug!(url = %url_to_clone, target = %target.display(), "cloning");
    builder
        .clone(&url_to_clone, target)
        .map_err(|e| git::clone_failed(url, interpret_git_error(&e)))
}
