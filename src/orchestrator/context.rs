//! Run-scoped branch state

use std::path::Path;

use tracing::debug;

use crate::branch::{BranchPath, BranchRegistry, PinAddress};
use crate::error::Result;
use crate::git::SourceControl;
use crate::plugin::Pinner;

/// Branch state owned by one run: the registry and the adapter that commits
pub struct RunContext<'a> {
    vcs: &'a dyn SourceControl,
    clone_url: String,
    dry_run: bool,
    registry: BranchRegistry,
}

impl<'a> RunContext<'a> {
    pub fn new(vcs: &'a dyn SourceControl, clone_url: impl Into<String>, dry_run: bool) -> Self {
        Self {
            vcs,
            clone_url: clone_url.into(),
            dry_run,
            registry: BranchRegistry::new(),
        }
    }

    pub fn vcs(&self) -> &'a dyn SourceControl {
        self.vcs
    }

    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    pub fn registry(&self) -> &BranchRegistry {
        &self.registry
    }

    /// Push every recorded branch to the target
    pub fn publish_all(&self) -> Result<()> {
        for (branch, directory) in self.registry.iter() {
            self.vcs.upload_branch(directory, branch)?;
        }
        Ok(())
    }
}

impl Pinner for RunContext<'_> {
    fn pin(
        &mut self,
        path: &BranchPath,
        directory: &Path,
        init: bool,
        message: Option<&str>,
    ) -> Result<PinAddress> {
        let branch = path.validated_branch_name()?;
        debug!(branch = %branch, dir = %directory.display(), "Preparing");
        if !self.dry_run {
            self.vcs.prepare_branch(directory, &branch, init, message)?;
        }
        self.registry.record(branch.clone(), directory);
        Ok(PinAddress::new(self.clone_url.clone(), branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::BranchUpdate;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingVcs {
        prepared: RefCell<Vec<(PathBuf, String)>>,
        uploaded: RefCell<Vec<String>>,
    }

    impl SourceControl for RecordingVcs {
        fn clone_repository(&self, _remote: &str, _destination: &Path) -> Result<()> {
            Ok(())
        }

        fn prepare_branch(
            &self,
            directory: &Path,
            branch: &str,
            _init: bool,
            _message: Option<&str>,
        ) -> Result<BranchUpdate> {
            self.prepared
                .borrow_mut()
                .push((directory.to_path_buf(), branch.to_string()));
            Ok(BranchUpdate::Unchanged)
        }

        fn upload_branch(&self, _directory: &Path, branch: &str) -> Result<()> {
            self.uploaded.borrow_mut().push(branch.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_pin_returns_address_and_records() {
        let vcs = RecordingVcs::default();
        let mut ctx = RunContext::new(&vcs, "https://git.example.com/demo.git", false);

        let address = ctx
            .pin(&BranchPath::new(["demo", "app"]), Path::new("/stage"), false, None)
            .unwrap();

        assert_eq!(address.to_string(), "https://git.example.com/demo.git@demo_app");
        let parsed = PinAddress::parse(&address.to_string()).unwrap();
        assert_eq!(parsed.branch, "demo_app");
        assert_eq!(ctx.registry().get("demo_app"), Some(Path::new("/stage")));
        assert_eq!(vcs.prepared.borrow().len(), 1);
    }

    #[test]
    fn test_dry_run_records_without_committing() {
        let vcs = RecordingVcs::default();
        let mut ctx = RunContext::new(&vcs, "https://git.example.com/demo.git", true);

        ctx.pin(&BranchPath::new(["master"]), Path::new("/stage"), false, None)
            .unwrap();

        assert!(vcs.prepared.borrow().is_empty());
        assert!(ctx.registry().contains("master"));
    }

    #[test]
    fn test_invalid_branch_is_rejected_before_commit() {
        let vcs = RecordingVcs::default();
        let mut ctx = RunContext::new(&vcs, "https://git.example.com/demo.git", false);

        let result = ctx.pin(&BranchPath::new(["demo", "my part"]), Path::new("/stage"), false, None);

        assert!(result.is_err());
        assert!(vcs.prepared.borrow().is_empty());
        assert!(ctx.registry().is_empty());
    }

    #[test]
    fn test_publish_all_uploads_every_branch() {
        let vcs = RecordingVcs::default();
        let mut ctx = RunContext::new(&vcs, "https://git.example.com/demo.git", false);
        ctx.pin(&BranchPath::new(["master"]), Path::new("/stage"), false, None)
            .unwrap();
        ctx.pin(&BranchPath::new(["demo", "app"]), Path::new("/stage"), false, None)
            .unwrap();

        ctx.publish_all().unwrap();

        assert_eq!(*vcs.uploaded.borrow(), vec!["demo_app", "master"]);
    }
}
