//! Run settings

use std::path::{Path, PathBuf};

/// Staging area below the project root
pub const STAGING_DIR: [&str; 3] = ["snap", "vendoring", "src"];
/// Per-part work areas below the project root
pub const PARTS_DIR: &str = "parts";
/// Value of `SNAP_NAME` when this tool runs as a snap
pub const SELF_SNAP_NAME: &str = "vendorize";

/// Everything a run is configured with
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project root holding the build descriptor
    pub project_dir: PathBuf,
    /// Push target, e.g. `git+ssh://git.example.com/demo.git`
    pub target: String,
    /// Hosts whose sources need no vendoring; replaced by the descriptor's `vendoring` list
    pub allowed_hosts: Vec<String>,
    /// Descriptor path relative to the project root; located automatically when unset
    pub descriptor_file: Option<PathBuf>,
    pub dry_run: bool,
    /// True when running as the build driver's own snap; the driver must not be invoked
    pub driver_self_invocation: bool,
    /// Command that pulls a part's source; the part name is appended
    pub build_driver: Vec<String>,
}

impl Settings {
    pub fn new(project_dir: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            target: target.into(),
            allowed_hosts: Vec::new(),
            descriptor_file: None,
            dry_run: false,
            driver_self_invocation: false,
            build_driver: vec!["snapcraft".to_string(), "pull".to_string()],
        }
    }

    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_descriptor_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.descriptor_file = Some(file.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_driver_self_invocation(mut self, self_invocation: bool) -> Self {
        self.driver_self_invocation = self_invocation;
        self
    }

    pub fn with_build_driver<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_driver = command.into_iter().map(Into::into).collect();
        self
    }

    /// `<project>/snap/vendoring/src`
    pub fn staging_dir(&self) -> PathBuf {
        STAGING_DIR
            .iter()
            .fold(self.project_dir.clone(), |dir, segment| dir.join(segment))
    }

    /// `<project>/parts/<part>`
    pub fn part_dir(&self, part: &str) -> PathBuf {
        self.project_dir.join(PARTS_DIR).join(part)
    }

    /// Paths relative to the project root left out of the staging copy
    pub fn snapshot_exclusions() -> Vec<PathBuf> {
        vec![
            PathBuf::from(".git"),
            PathBuf::from(PARTS_DIR),
            Path::new(STAGING_DIR[0]).join(STAGING_DIR[1]),
        ]
    }
}

/// Whether `snap_name` (the value of `SNAP_NAME`) means this tool is the running snap
pub fn is_self_invocation(snap_name: Option<&str>) -> bool {
    snap_name == Some(SELF_SNAP_NAME)
}
