//! Persistence of the API token.
//!
//! The token lives in a single file readable only by its owner. Writes go
//! through a temporary file and an atomic rename so an interrupted login never
//! leaves a truncated token behind.

use crate::error::{CredentialError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Storage for the single long-lived API token
pub trait CredentialStore {
    /// Whether a token has been stored
    fn exists(&self) -> bool;

    /// Read the stored token
    ///
    /// Fails with [`CredentialError::NotFound`] when nothing is stored.
    fn read(&self) -> Result<String>;

    /// Durably store `token`, replacing any previous value
    fn write(&self, token: &str) -> Result<()>;
}

/// Token stored in a plain file with owner-only permissions
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Token file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for TokenFile {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CredentialError::NotFound {
                    path: self.path.clone(),
                }
                .into());
            }
            Err(e) => return Err(self.io_error(e).into()),
        };

        let token = contents.lines().next().unwrap_or_default().trim();
        if token.is_empty() {
            return Err(CredentialError::Empty {
                path: self.path.clone(),
            }
            .into());
        }

        Ok(token.to_string())
    }

    fn write(&self, token: &str) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");

        {
            let mut file = owner_only_file(&temp_path).map_err(|e| self.io_error(e))?;
            file.write_all(token.as_bytes())
                .map_err(|e| self.io_error(e))?;
            file.sync_all().map_err(|e| self.io_error(e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        log::debug!("Stored API token at {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn owner_only_file(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation; a stale temp file keeps its old bits
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn owner_only_file(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenFile::new(dir.path().join("token"));

        assert!(!store.exists());
        assert!(matches!(
            store.read(),
            Err(ReleaseError::Credential(CredentialError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_write_then_read_first_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenFile::new(dir.path().join("token"));

        store.write("abc123").expect("write token");
        assert!(store.exists());
        assert_eq!(store.read().expect("read token"), "abc123");

        fs::write(store.path(), "def456\ntrailing junk\n").expect("overwrite");
        assert_eq!(store.read().expect("read token"), "def456");
    }

    #[test]
    fn test_blank_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenFile::new(dir.path().join("token"));
        fs::write(store.path(), "\n").expect("write blank");

        assert!(matches!(
            store.read(),
            Err(ReleaseError::Credential(CredentialError::Empty { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenFile::new(dir.path().join("token"));
        store.write("secret").expect("write token");

        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
