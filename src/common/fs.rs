//! Project tree copies used to populate the staging area

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

#[derive(Debug, Default, Clone)]
pub struct CopyOptions {
    /// Paths relative to the copy root that are skipped with everything below them
    pub exclude: Vec<PathBuf>,
}

impl CopyOptions {
    pub fn excluding<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            exclude: paths.into_iter().map(Into::into).collect(),
        }
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|excluded| relative == excluded)
    }
}

/// True when `dir` does not exist or has no entries
pub fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).map_or(true, |mut entries| entries.next().is_none())
}

/// Files and directories below `src` that a copy with `options` would visit
///
/// Symlinks are followed, so a linked directory contributes its contents. A
/// link cycle is reported as a read error.
pub fn list_copy_entries(src: &Path, options: &CopyOptions) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(src)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry
                .path()
                .strip_prefix(src)
                .map_or(true, |relative| !options.is_excluded(relative))
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).display().to_string();
            fs_error::read_failed(path, e.to_string())
        })?;
        if let Ok(relative) = entry.path().strip_prefix(src) {
            entries.push(relative.to_path_buf());
        }
    }
    Ok(entries)
}

/// Copy the tree at `src` into `dst`, calling `on_entry` for every copied path
pub fn copy_dir_recursive<F>(src: &Path, dst: &Path, options: &CopyOptions, mut on_entry: F) -> Result<()>
where
    F: FnMut(&Path),
{
    fs::create_dir_all(dst)
        .map_err(|e| fs_error::write_failed(dst.display().to_string(), e.to_string()))?;

    for relative in list_copy_entries(src, options)? {
        let from = src.join(&relative);
        let to = dst.join(&relative);
        // `is_dir` resolves links
        if from.is_dir() {
            fs::create_dir_all(&to)
                .map_err(|e| fs_error::write_failed(to.display().to_string(), e.to_string()))?;
        } else {
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    fs_error::write_failed(parent.display().to_string(), e.to_string())
                })?;
            }
            fs::copy(&from, &to)
                .map_err(|e| fs_error::write_failed(to.display().to_string(), e.to_string()))?;
        }
        on_entry(&relative);
    }

    Ok(())
}
