// File store for downloaded artifacts and config text.
// Writes go through a temp file and a rename so partial files never appear.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Write bytes atomically, creating parent directories as needed.
///
/// Each call stages into its own uniquely named temp file in the target
/// directory, so concurrent writes to the same path never share a temp file.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read a text file, or `None` if it does not exist.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    Ok(Some(contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("report.md");

        write_bytes(&path, b"# Report\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), Some("# Report\n".to_string()));
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1, "no staging file left behind");
    }

    #[test]
    fn test_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.csv");

        write_bytes(&path, b"old").unwrap();
        write_bytes(&path, b"new").unwrap();

        assert_eq!(read_text(&path).unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_text(&temp_dir.path().join("missing.toml")).unwrap().is_none());
    }

    #[test]
    fn test_concurrent_writes_same_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("comparison.md");
        let target = &path;

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = [b"first".as_slice(), b"second".as_slice()]
                .into_iter()
                .map(|bytes| scope.spawn(move || write_bytes(target, bytes)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.iter().all(|r| r.is_ok()));
        let saved = read_text(&path).unwrap().unwrap();
        assert!(saved == "first" || saved == "second");
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
