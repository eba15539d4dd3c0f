use crate::error::{Error, ResolutionFailure, Result};
use crate::hash::{self, DigestAlgorithm};
use crate::in_toto::{DigestSet, Subject};

use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Produce subjects for build artifacts on disk.
///
/// A file yields one subject named by its file name. A directory is walked
/// recursively and yields one subject per regular file, named by its `/`
/// separated path relative to the directory and sorted by that name. Digests
/// are SHA-256 over the file contents. Symbolic links are followed in both
/// cases.
pub fn resolve_file_subjects(path: &Path) -> Result<Vec<Subject>> {
    let reference = path.display().to_string();
    if !path.exists() {
        return Err(Error::resolution(reference, ResolutionFailure::NotFound));
    }

    if path.is_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::resolution(
                    reference.as_str(),
                    ResolutionFailure::InvalidReference("path has no file name".to_string()),
                )
            })?;
        return Ok(vec![file_subject(name, path)?]);
    }

    let mut subjects = Vec::new();
    for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::resolution(
                reference.as_str(),
                ResolutionFailure::Unreachable(e.to_string()),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        subjects.push(file_subject(name, entry.path())?);
    }

    if subjects.is_empty() {
        return Err(Error::resolution(
            reference,
            ResolutionFailure::InvalidReference("directory contains no files".to_string()),
        ));
    }
    subjects.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(subjects)
}

fn file_subject(name: String, path: &Path) -> Result<Subject> {
    let hex = hash::calculate_file_hash_with_algorithm(path, DigestAlgorithm::Sha256)
        .map_err(|e| {
            Error::resolution(name.as_str(), ResolutionFailure::Unreachable(e.to_string()))
        })?;
    debug!("{name}: sha256:{hex}");

    let digest = DigestSet::from_hex(DigestAlgorithm::Sha256, &hex)
        .map_err(|e| Error::resolution(name.as_str(), e.into()))?;
    Ok(Subject::new(name, digest))
}
