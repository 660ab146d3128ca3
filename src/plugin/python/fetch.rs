//! Source-archive fetching, one requirement at a time

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{Result, source};

/// Fetches a single requirement into a cache directory
pub trait PackageFetcher {
    fn fetch(&self, requirement: &str, cache: &Path) -> Result<()>;
}

/// `pip download` of source distributions only
#[derive(Debug, Clone)]
pub struct PipFetcher {
    python: String,
}

impl PipFetcher {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl Default for PipFetcher {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl PackageFetcher for PipFetcher {
    fn fetch(&self, requirement: &str, cache: &Path) -> Result<()> {
        let mut command = Command::new(&self.python);
        command
            .args(["-m", "pip", "download", "--no-binary=:all:", "-q"])
            .arg("--exists-action=i")
            .arg(format!("--dest={}", cache.display()))
            .arg(format!("--src={}", cache.display()))
            .args(requirement.split(' ').filter(|arg| !arg.is_empty()))
            .stdin(Stdio::null());

        let label = format!("pip download {requirement}");
        let output = command
            .output()
            .map_err(|e| source::command_failed(&label, e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(source::command_failed(label, stderr.trim().to_string()));
        }
        Ok(())
    }
}

/// Requirements that fetched and those that did not
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub fetched: Vec<String>,
    pub failed: Vec<String>,
}

/// Fetch every requirement in isolation.
///
/// A failure is logged and skipped: build-time requirements that cannot be
/// resolved here are irrelevant to vendoring and must not stop the others.
pub fn fetch_all(fetcher: &dyn PackageFetcher, requirements: &[String], cache: &Path) -> FetchReport {
    debug!("Fetching: {}", requirements.join(", "));
    let mut report = FetchReport::default();
    for requirement in requirements {
        match fetcher.fetch(requirement, cache) {
            Ok(()) => report.fetched.push(requirement.clone()),
            Err(e) => {
                warn!(requirement = %requirement, "skipping dependency: {e}");
                report.failed.push(requirement.clone());
            }
        }
    }
    report
}
