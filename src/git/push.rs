//! Publishing branches to the target remote

use std::cell::RefCell;
use std::path::Path;

use git2::{PushOptions, Repository};
use tracing::debug;

use super::auth::authenticated_callbacks;
use super::error::interpret_git_error;
use super::url::normalize_for_libgit2;
use crate::error::{Result, git};

/// Push `branch` from the repository at `directory` to `remote_url`
pub fn upload_branch(directory: &Path, branch: &str, remote_url: &str) -> Result<()> {
    let repo = Repository::open(directory)
        .map_err(|e| git::push_failed(branch, format!("{}: {}", directory.display(), e.message())))?;

    let url = normalize_for_libgit2(remote_url);
    let mut remote = repo
        .remote_anonymous(&url)
        .map_err(|e| git::push_failed(branch, interpret_git_error(&e)))?;

    // The server reports per-reference rejections through this callback
    // rather than through the push result
    let rejection: RefCell<Option<String>> = RefCell::new(None);
    let mut callbacks = authenticated_callbacks();
    callbacks.push_update_reference(|refname, status| {
        if let Some(status) = status {
            *rejection.borrow_mut() = Some(format!("{refname}: {status}"));
        }
        Ok(())
    });

    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    debug!(branch, url = %url, "pushing");
    remote
        .push(&[refspec.as_str()], Some(&mut options))
        .map_err(|e| git::push_failed(branch, interpret_git_error(&e)))?;

    drop(options);
    match rejection.into_inner() {
        Some(reason) => Err(git::push_failed(branch, reason)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::branch::prepare_branch;
    use tempfile::TempDir;

    #[test]
    fn test_upload_branch_to_bare_remote() {
        let temp = TempDir::new().unwrap();
        let remote_dir = temp.path().join("remote.git");
        Repository::init_bare(&remote_dir).unwrap();

        let work = temp.path().join("work");
        std::fs::create_dir_all(&work).unwrap();
        std::fs::write(work.join("file.txt"), "content").unwrap();
        prepare_branch(&work, "demo_app", false, None).unwrap();

        let url = format!("file://{}", remote_dir.display());
        upload_branch(&work, "demo_app", &url).unwrap();

        let remote = Repository::open_bare(&remote_dir).unwrap();
        assert!(remote
            .find_branch("demo_app", git2::BranchType::Local)
            .is_ok());
    }

    #[test]
    fn test_upload_without_repository_fails() {
        let temp = TempDir::new().unwrap();
        let err = upload_branch(temp.path(), "demo_app", "file:///nonexistent").unwrap_err();
        assert!(matches!(
            err,
            crate::error::VendorizeError::GitPushFailed { .. }
        ));
    }
}
