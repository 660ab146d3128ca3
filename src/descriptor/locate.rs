//! Descriptor discovery

use std::path::{Path, PathBuf};

use crate::error::{Result, config};

/// Known descriptor locations, searched in order
pub const DESCRIPTOR_LOCATIONS: [&str; 3] =
    ["snapcraft.yaml", ".snapcraft.yaml", "snap/snapcraft.yaml"];

/// Find the descriptor below `project_root`; returns the project-relative path
pub fn locate_descriptor(project_root: &Path) -> Result<PathBuf> {
    DESCRIPTOR_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| project_root.join(candidate).is_file())
        .ok_or_else(|| config::not_found(project_root.display().to_string()))
}

/// Validate a user-supplied project-relative path
pub fn resolve_relative(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() || path.has_root() {
        return Err(config::not_relative(path.display().to_string()));
    }
    Ok(path.to_path_buf())
}
