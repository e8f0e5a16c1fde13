//! Filesystem collaborator used by the orchestrator to write a file plan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal filesystem surface the orchestrator needs.
pub trait Filesystem {
    /// Creates a directory and all of its parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Writes a file, creating missing parent directories.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// The local disk. Relative paths resolve against the current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(absolute(path)?)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        let abs_path = absolute(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(abs_path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(absolute(temp_dir.path()).unwrap(), temp_dir.path());
    }

    #[test]
    fn test_absolute_resolves_against_current_dir() {
        let resolved = absolute(Path::new("src/payload.config.ts")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::env::current_dir().unwrap().join("src/payload.config.ts"));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("src/collections/Posts.ts");

        LocalFilesystem.write_file(&path, "export {}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "export {}\n");
    }

    #[test]
    fn test_write_file_reports_blocked_parent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("src"), "not a directory").unwrap();

        let result = LocalFilesystem.write_file(&temp_dir.path().join("src/index.ts"), "");
        assert!(result.is_err());
    }
}
