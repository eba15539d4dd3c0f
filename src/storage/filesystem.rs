use crate::error::{Error, Result};
use crate::slsa::statement::Statement;
use crate::storage::traits::StatementStore;

use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf, is_separator};

/// Writes a statement to a single file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FilesystemStorage {
    destination: PathBuf,
}

impl FilesystemStorage {
    pub fn new<P: AsRef<Path>>(destination: P) -> Self {
        Self {
            destination: destination.as_ref().to_path_buf(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl StatementStore for FilesystemStorage {
    fn store_statement(&self, statement: &Statement) -> Result<String> {
        persist_statement(statement, &self.destination)?;
        Ok(self.destination.display().to_string())
    }
}

/// Serialize `statement` and atomically replace `destination` with it.
///
/// The document is written to a temporary file next to the destination,
/// synced, and renamed into place, so readers see either the previous file
/// or the complete new one. The temporary file is removed on any failure.
///
/// The immediate parent directory is created when its own parent exists.
pub fn persist_statement(statement: &Statement, destination: &Path) -> Result<()> {
    let bytes = statement.to_json_bytes()?;
    write_atomic(destination, &bytes, |file, bytes| file.write_all(bytes))?;
    info!("Saved provenance to {}", destination.display());
    Ok(())
}

pub(crate) fn write_atomic<F>(destination: &Path, bytes: &[u8], write: F) -> Result<()>
where
    F: FnOnce(&mut File, &[u8]) -> io::Result<()>,
{
    let parent = prepare_parent(destination)?;
    let fail = |source: io::Error| Error::persist(destination, source);

    let mut temp = tempfile::Builder::new()
        .prefix(".provenance-")
        .suffix(".tmp")
        .tempfile_in(&parent)
        .map_err(fail)?;
    debug!("Writing {} bytes to {}", bytes.len(), temp.path().display());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(fail)?;
    }

    write(temp.as_file_mut(), bytes).map_err(fail)?;
    temp.as_file().sync_all().map_err(fail)?;
    temp.persist(destination).map_err(|e| fail(e.error))?;

    // make the rename itself durable
    #[cfg(unix)]
    {
        File::open(&parent)
            .and_then(|dir| dir.sync_all())
            .map_err(fail)?;
    }

    Ok(())
}

fn prepare_parent(destination: &Path) -> Result<PathBuf> {
    let invalid = |msg: &str| {
        Error::persist(
            destination,
            io::Error::new(io::ErrorKind::InvalidInput, msg.to_string()),
        )
    };

    let text = destination.to_string_lossy();
    if text.is_empty() || text.ends_with(is_separator) || destination.file_name().is_none() {
        return Err(invalid("destination is not a file path"));
    }
    if destination.is_dir() {
        return Err(invalid("destination is a directory"));
    }

    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if parent.is_dir() {
        return Ok(parent);
    }
    if parent.exists() {
        return Err(invalid("parent path is not a directory"));
    }

    let grandparent_exists = match parent.parent() {
        Some(gp) if !gp.as_os_str().is_empty() => gp.is_dir(),
        _ => true,
    };
    if !grandparent_exists {
        return Err(Error::persist(
            destination,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory {} does not exist", parent.display()),
            ),
        ));
    }

    debug!("Creating output directory {}", parent.display());
    fs::create_dir(&parent).map_err(|e| Error::persist(destination, e))?;
    Ok(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::sample_statement;
    use tempfile::tempdir;

    fn leftover_temp_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".provenance-"))
            .count()
    }

    #[test]
    fn test_persist_writes_serialized_statement() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("provenance.json");
        let statement = sample_statement();

        persist_statement(&statement, &destination).unwrap();

        let written = fs::read(&destination).unwrap();
        assert_eq!(written, statement.to_json_bytes().unwrap());
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn test_persist_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("provenance.json");
        fs::write(&destination, b"{\"old\": true, \"padding\": \"........................\"}")
            .unwrap();

        persist_statement(&sample_statement(), &destination).unwrap();

        let parsed = Statement::from_json_slice(&fs::read(&destination).unwrap()).unwrap();
        assert_eq!(parsed, sample_statement());
    }

    #[test]
    fn test_interrupted_write_keeps_prior_document() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("provenance.json");
        let prior = b"{\"prior\": \"complete document\"}\n".to_vec();
        fs::write(&destination, &prior).unwrap();

        let bytes = sample_statement().to_json_bytes().unwrap();
        let result = write_atomic(&destination, &bytes, |file, bytes| {
            file.write_all(&bytes[..64])?;
            Err(io::Error::other("disk full"))
        });

        assert!(matches!(result, Err(Error::Persist { .. })));
        assert_eq!(fs::read(&destination).unwrap(), prior);
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn test_interrupted_write_leaves_no_destination() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("provenance.json");

        let result = write_atomic(&destination, b"{\"partial\": 1}", |file, bytes| {
            file.write_all(&bytes[..3])?;
            Err(io::Error::other("interrupted"))
        });

        assert!(result.is_err());
        assert!(!destination.exists());
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn test_creates_missing_immediate_parent() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("attestations").join("provenance.json");

        persist_statement(&sample_statement(), &destination).unwrap();
        assert!(destination.is_file());
    }

    #[test]
    fn test_missing_parent_chain_is_persist_error() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("a").join("b").join("provenance.json");

        let err = persist_statement(&sample_statement(), &destination).unwrap_err();
        match err {
            Error::Persist { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("a").exists());
    }

    #[test]
    fn test_directory_destination_is_rejected() {
        let dir = tempdir().unwrap();
        let err = persist_statement(&sample_statement(), dir.path()).unwrap_err();
        match err {
            Error::Persist { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidInput)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_separator_is_rejected() {
        let dir = tempdir().unwrap();
        let destination = format!("{}/out/", dir.path().display());
        assert!(matches!(
            persist_statement(&sample_statement(), Path::new(&destination)),
            Err(Error::Persist { .. })
        ));
    }

    #[test]
    fn test_store_statement_reports_location() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("provenance.json");
        let storage = FilesystemStorage::new(&destination);

        let location = storage.store_statement(&sample_statement()).unwrap();
        assert_eq!(location, destination.display().to_string());
        assert_eq!(storage.destination(), destination.as_path());
    }

    #[cfg(unix)]
    #[test]
    fn test_persisted_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let destination = dir.path().join("provenance.json");
        persist_statement(&sample_statement(), &destination).unwrap();

        let mode = fs::metadata(&destination).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
