//! URL normalization for git operations
//!
//! This module handles:
//! - Stripping pip-style `git+` transport prefixes (`git+https://`, `git+ssh://`)
//! - Deriving the public clone URL used in pin addresses
//! - Normalizing SSH URLs from SCP-style to ssh:// format
//! - Normalizing file:// URLs for libgit2 compatibility

use std::borrow::Cow;

/// Heuristic for "this source is a git remote": anything mentioning git
pub fn looks_like_git_remote(location: &str) -> bool {
    location.contains("git")
}

/// Strip a `git+` transport prefix so libgit2 understands the URL
pub fn strip_transport_prefix(url: &str) -> &str {
    url.strip_prefix("git+").unwrap_or(url)
}

/// Public clone URL for a push target: `git+ssh://` targets are read over https
pub fn clone_url_for_target(target: &str) -> String {
    target.replace("git+ssh://", "https://")
}

/// Normalize SSH URLs from SCP-style (git@host:path) to ssh:// format.
///
/// libgit2 may have issues with SCP-style SSH URLs, so we convert them to
/// the explicit ssh:// format for better compatibility.
pub fn normalize_ssh_url(url: &str) -> Cow<'_, str> {
    if !url.starts_with("git@") {
        return Cow::Borrowed(url);
    }

    if let Some(colon_pos) = url.find(':') {
        let host_part = &url[..colon_pos];
        let path_part = &url[colon_pos + 1..];
        let normalized_path = if path_part.starts_with('/') {
            path_part.to_string()
        } else {
            format!("/{path_part}")
        };
        return Cow::Owned(format!("ssh://{host_part}{normalized_path}"));
    }

    Cow::Borrowed(url)
}

/// Normalize file:// URLs so libgit2 can resolve them on Unix.
pub fn normalize_file_url(url: &str) -> Cow<'_, str> {
    if !url.starts_with("file://") {
        return Cow::Borrowed(url);
    }
    #[cfg(not(windows))]
    {
        let after = &url[7..];
        if after.contains('\\') {
            let path = after.replace('\\', "/");
            return Cow::Owned(format!("file:///{path}"));
        }
        if !after.is_empty() && !after.starts_with('/') {
            return Cow::Owned(format!("file:///{after}"));
        }
    }
    Cow::Borrowed(url)
}

/// Full normalization applied before handing a URL to libgit2
pub fn normalize_for_libgit2(url: &str) -> String {
    let url = strip_transport_prefix(url);
    let url = normalize_ssh_url(url);
    normalize_file_url(&url).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_transport_prefix() {
        assert_eq!(
            strip_transport_prefix("git+ssh://example.com/repo.git"),
            "ssh://example.com/repo.git"
        );
        assert_eq!(
            strip_transport_prefix("https://example.com/repo.git"),
            "https://example.com/repo.git"
        );
    }

    #[test]
    fn test_clone_url_for_ssh_target() {
        assert_eq!(
            clone_url_for_target("git+ssh://git.launchpad.net/~me/+git/demo"),
            "https://git.launchpad.net/~me/+git/demo"
        );
        assert_eq!(
            clone_url_for_target("https://example.com/demo.git"),
            "https://example.com/demo.git"
        );
    }

    #[test]
    fn test_normalize_ssh_url_scp_style() {
        assert_eq!(
            normalize_ssh_url("git@github.com:user/repo.git"),
            "ssh://git@github.com/user/repo.git"
        );
        assert_eq!(
            normalize_ssh_url("ssh://git@github.com/user/repo.git"),
            "ssh://git@github.com/user/repo.git"
        );
    }

    #[test]
    #[cfg(not(windows))]
    fn test_normalize_file_url_relative() {
        assert_eq!(normalize_file_url("file://tmp/repo"), "file:///tmp/repo");
        assert_eq!(normalize_file_url("file:///tmp/repo"), "file:///tmp/repo");
    }

    #[test]
    fn test_normalize_for_libgit2_strips_prefix_first() {
        assert_eq!(
            normalize_for_libgit2("git+https://github.com/user/repo.git"),
            "https://github.com/user/repo.git"
        );
    }

    #[test]
    fn test_looks_like_git_remote() {
        assert!(looks_like_git_remote("https://github.com/user/repo"));
        assert!(looks_like_git_remote("git+https://example.com/x.git"));
        assert!(!looks_like_git_remote("https://example.com/release.tar.gz"));
    }
}
