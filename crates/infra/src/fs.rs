//! All-or-nothing file helpers.

use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{InfraError, InfraResult};

/// Replace `path` with `bytes`.
///
/// The bytes go to a temporary file in the same directory, which is synced
/// and then renamed over the target. Parent directories are created.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> InfraResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| InfraError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InfraError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| InfraError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| InfraError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| InfraError::io(path, e.error))?;
    Ok(())
}

/// Read the whole file, or `None` when it does not exist.
pub fn read_if_exists(path: &Path) -> InfraResult<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(InfraError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(read_if_exists(&path).unwrap().unwrap(), b"second");
        // No temporary files are left behind.
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_if_exists(&dir.path().join("absent")).unwrap().is_none());
    }
}
