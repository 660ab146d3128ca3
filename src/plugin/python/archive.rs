//! Expansion of fetched source archives
//!
//! Every archive is unpacked into the cache it was fetched to; its top-level
//! directory names the dependency. Directories already present (editable
//! checkouts, earlier runs) are left alone.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, warn};

use crate::error::{Result, fs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    TarGz,
    Tar,
    Zip,
}

fn archive_kind(path: &Path) -> Option<ArchiveKind> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        Some(ArchiveKind::TarGz)
    } else if name.ends_with(".tar") {
        Some(ArchiveKind::Tar)
    } else if name.ends_with(".zip") {
        Some(ArchiveKind::Zip)
    } else {
        None
    }
}

fn unpack(path: &Path, kind: ArchiveKind, dest: &Path) -> std::result::Result<(), String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    match kind {
        // tar::Archive::unpack refuses entries that escape `dest`
        ArchiveKind::TarGz => Archive::new(GzDecoder::new(reader))
            .unpack(dest)
            .map_err(|e| e.to_string()),
        ArchiveKind::Tar => Archive::new(reader).unpack(dest).map_err(|e| e.to_string()),
        ArchiveKind::Zip => zip::ZipArchive::new(reader)
            .and_then(|mut archive| archive.extract(dest))
            .map_err(|e| e.to_string()),
    }
}

/// Unpack all archives found directly in `cache`
pub fn unpack_archives(cache: &Path) -> Result<()> {
    let entries = std::fs::read_dir(cache)
        .map_err(|e| fs::read_failed(cache.display().to_string(), e.to_string()))?;

    let mut archives: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    archives.sort();

    debug!(
        "Extracting: {}",
        archives
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    for archive in archives {
        let Some(kind) = archive_kind(&archive) else {
            warn!(file = %archive.display(), "not a source archive, skipping");
            continue;
        };
        unpack(&archive, kind, cache)
            .map_err(|reason| fs::archive_failed(archive.display().to_string(), reason))?;
    }
    Ok(())
}

/// Directories in `cache`, sorted by name
pub fn package_directories(cache: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(cache)
        .map_err(|e| fs::read_failed(cache.display().to_string(), e.to_string()))?;

    let mut packages: Vec<(String, PathBuf)> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some((name, path))
        })
        .collect();
    packages.sort();
    Ok(packages)
}
