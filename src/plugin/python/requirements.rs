//! Assembly of a part's declared Python dependencies

use std::path::Path;

use tracing::debug;

use super::metadata::declared_dependencies;
use crate::descriptor::Component;
use crate::error::{Result, fs, plugin};

/// Inline dependency list option
pub const PACKAGES_KEY: &str = "python-packages";
/// Requirements-file option
pub const REQUIREMENTS_KEY: &str = "requirements";

const COMMENT_MARKER: char = '#';

/// Requirement lines of a requirements file: comments and blank lines dropped
pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        // A '#' anywhere else may be part of a URL fragment
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect()
}

/// Dependencies in declaration order: inline list, requirements file, project metadata
pub fn assemble(component: &Component, source_dir: &Path, python: &str) -> Result<Vec<String>> {
    let mut packages = component.option_list(PACKAGES_KEY);

    if let Some(file) = component.option_str(REQUIREMENTS_KEY) {
        let path = source_dir.join(file);
        if !path.is_file() {
            return Err(plugin::failed(
                "python",
                format!("External requirements are not supported: {}", path.display()),
            ));
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| fs::read_failed(path.display().to_string(), e.to_string()))?;
        let lines = parse_requirements(&content);
        debug!(file = %path.display(), "{} requirement(s)", lines.len());
        packages.extend(lines);
    }

    packages.extend(declared_dependencies(source_dir, python));
    Ok(packages)
}
