//! Platform directory resolution.
//!
//! Config and log locations follow OS conventions (XDG on Linux, Known
//! Folders on Windows, Library on macOS) via the `dirs` crate.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// An I/O error occurred (e.g., directory creation failed).
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directory paths for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "galaxy";

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = galaxy_config::default_config_dir().ok_or(PlatformError::NoConfigDir)?;
        let log_dir = dirs::data_local_dir()
            .map(|dir| dir.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Directories rooted under a custom base path, as used by `--config`.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dirs_resolve() {
        // Headless CI containers may lack a home directory.
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.is_absolute(), "config_dir is not absolute");
            assert!(dirs.log_dir.is_absolute(), "log_dir is not absolute");
            assert!(dirs.config_dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().expect("create_dirs failed for temp root");

        assert!(dirs.config_dir.exists(), "config_dir was not created");
        assert!(dirs.log_dir.exists(), "log_dir was not created");
        assert_eq!(dirs.log_dir, tmp.path().join("logs"));
    }
}
