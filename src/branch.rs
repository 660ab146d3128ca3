//! Branch naming, pin addresses and the per-run branch registry
//!
//! A branch identifier is a pure function of its path segments: the same
//! `[project, part]` path always yields the same branch, which is what makes a
//! rerun update the previous snapshot instead of creating a new one.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, git};

/// Separator used to join path segments into a branch name
pub const BRANCH_SEPARATOR: &str = "_";

/// Hierarchical branch path, e.g. `["demo", "python_packages", "requests"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchPath {
    segments: Vec<String>,
}

impl BranchPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The branch name: segments joined with `_`
    pub fn branch_name(&self) -> String {
        self.segments.join(BRANCH_SEPARATOR)
    }

    /// Branch name, validated as a git reference name
    pub fn validated_branch_name(&self) -> Result<String> {
        let name = self.branch_name();
        if self.segments.iter().any(|s| s.is_empty() || s.contains('@'))
            || !git2::Reference::is_valid_name(&format!("refs/heads/{name}"))
        {
            return Err(git::invalid_branch(name));
        }
        Ok(name)
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.branch_name())
    }
}

/// Addressable reference to a pinned branch: `<clone-url>@<branch>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinAddress {
    pub repository: String,
    pub branch: String,
}

impl PinAddress {
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: branch.into(),
        }
    }

    /// Split an address on its last `@`; userinfo in the URL (`ssh://git@host`) is kept
    ///
    /// Branch names may contain `/`. A repository part with no path
    /// (`ssh://git` out of `ssh://git@host/repo`) means the address had no branch.
    pub fn parse(address: &str) -> Option<Self> {
        let (repository, branch) = address.rsplit_once('@')?;
        let location = repository
            .split_once("://")
            .map_or(repository, |(_, rest)| rest);
        if branch.is_empty() || !location.contains('/') {
            return None;
        }
        Some(Self::new(repository, branch))
    }

    /// Requirement line understood by pip: `git+<clone-url>@<branch>`
    pub fn as_requirement(&self) -> String {
        format!("git+{self}")
    }
}

impl fmt::Display for PinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repository, self.branch)
    }
}

/// Branches touched during one run, keyed by branch name
///
/// Populated by every pin, iterated at publish time. A `BTreeMap` keeps the
/// publish order stable between runs.
#[derive(Debug, Default, Clone)]
pub struct BranchRegistry {
    branches: BTreeMap<String, PathBuf>,
}

impl BranchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `branch` as backed by `directory`; a later pin of the same branch wins
    pub fn record(&mut self, branch: impl Into<String>, directory: &Path) {
        self.branches.insert(branch.into(), directory.to_path_buf());
    }

    pub fn get(&self, branch: &str) -> Option<&Path> {
        self.branches.get(branch).map(PathBuf::as_path)
    }

    pub fn contains(&self, branch: &str) -> bool {
        self.branches.contains_key(branch)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.branches
            .iter()
            .map(|(name, dir)| (name.as_str(), dir.as_path()))
    }

    pub fn branch_names(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_name_joins_segments() {
        let path = BranchPath::new(["demo", "python_packages", "requests"]);
        assert_eq!(path.branch_name(), "demo_python_packages_requests");
        assert_eq!(path.to_string(), "demo_python_packages_requests");
    }

    #[test]
    fn test_branch_name_is_deterministic() {
        let a = BranchPath::new(["demo", "app"]);
        let b = BranchPath::new(vec!["demo".to_string(), "app".to_string()]);
        assert_eq!(a.branch_name(), b.branch_name());
        assert_eq!(a, b);
    }

    #[test]
    fn test_validated_branch_name_rejects_invalid_refs() {
        assert!(BranchPath::new(["demo", "my part"]).validated_branch_name().is_err());
        assert!(BranchPath::new(["demo", ""]).validated_branch_name().is_err());
        assert!(BranchPath::new(["demo", "a..b"]).validated_branch_name().is_err());
        assert_eq!(
            BranchPath::new(["master"]).validated_branch_name().unwrap(),
            "master"
        );
    }

    #[test]
    fn test_pin_address_round_trip() {
        let branch = BranchPath::new(["demo", "app"]).branch_name();
        let address = PinAddress::new("https://git.example.com/demo.git", branch.clone());
        let rendered = address.to_string();
        assert_eq!(rendered, "https://git.example.com/demo.git@demo_app");

        let parsed = PinAddress::parse(&rendered).unwrap();
        assert_eq!(parsed.branch, branch);
        assert_eq!(parsed.repository, "https://git.example.com/demo.git");
    }

    #[test]
    fn test_pin_address_parse_keeps_userinfo() {
        let parsed = PinAddress::parse("ssh://git@example.com/demo.git@demo_app").unwrap();
        assert_eq!(parsed.repository, "ssh://git@example.com/demo.git");
        assert_eq!(parsed.branch, "demo_app");
    }

    #[test]
    fn test_pin_address_parse_rejects_missing_branch() {
        assert!(PinAddress::parse("https://example.com/demo.git").is_none());
        assert!(PinAddress::parse("https://example.com/demo.git@").is_none());
        assert!(PinAddress::parse("ssh://git@example.com/demo.git").is_none());
        assert!(PinAddress::parse("git@example.com:org/demo.git").is_none());
    }

    #[test]
    fn test_pin_address_round_trip_with_slash_in_part() {
        let branch = BranchPath::new(["demo", "desktop/gtk3"])
            .validated_branch_name()
            .unwrap();
        let address = PinAddress::new("https://git.example.com/demo.git", branch.clone());

        let parsed = PinAddress::parse(&address.to_string()).unwrap();
        assert_eq!(parsed, address);
        assert_eq!(parsed.branch, "demo_desktop/gtk3");

        let scp = PinAddress::new("git@example.com:org/demo.git", branch);
        assert_eq!(PinAddress::parse(&scp.to_string()), Some(scp));
    }

    #[test]
    fn test_at_sign_in_segment_is_rejected() {
        assert!(BranchPath::new(["demo", "lib@2"]).validated_branch_name().is_err());
    }

    #[test]
    fn test_requirement_line_has_git_prefix() {
        let address = PinAddress::new("https://example.com/demo.git", "demo_python_packages_six");
        assert_eq!(
            address.as_requirement(),
            "git+https://example.com/demo.git@demo_python_packages_six"
        );
    }

    #[test]
    fn test_registry_last_record_wins() {
        let mut registry = BranchRegistry::new();
        registry.record("demo_app", Path::new("/a"));
        registry.record("demo_app", Path::new("/b"));
        registry.record("master", Path::new("/a"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("demo_app"), Some(Path::new("/b")));
        assert_eq!(registry.branch_names(), vec!["demo_app", "master"]);
    }
}
