//! Local filesystem adapter and data directory layout.
//!
//! Implements the `FileSystem` trait from cardsmith-core over `tokio::fs`.

use std::path::{Path, PathBuf};

use cardsmith_core::service::fs::FileSystem;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "CARDSMITH_DATA_DIR";

pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }

    /// `{data_dir}/config.toml`
    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFileSystem {
    async fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        tokio::fs::read_to_string(path).await
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), std::io::Error> {
        tokio::fs::create_dir_all(path).await
    }
}

/// Resolve the data directory.
///
/// Priority:
/// 1. `CARDSMITH_DATA_DIR`
/// 2. `~/.cardsmith`
/// 3. `./.cardsmith` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".cardsmith");
    }

    PathBuf::from(".cardsmith")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_and_read_file() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let file_path = dir.path().join("site.html");

        fs.write_file(&file_path, "<html></html>").await.unwrap();
        assert_eq!(fs.read_file(&file_path).await.unwrap(), "<html></html>");
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let file_path = dir.path().join("exports").join("v2").join("site.html");

        fs.write_file(&file_path, "nested").await.unwrap();
        assert_eq!(fs.read_file(&file_path).await.unwrap(), "nested");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let file_path = dir.path().join("site.html");

        fs.write_file(&file_path, "first").await.unwrap();
        fs.write_file(&file_path, "second").await.unwrap();
        assert_eq!(fs.read_file(&file_path).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_create_dir_all() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let nested = dir.path().join("a").join("b");

        fs.create_dir_all(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            LocalFileSystem::config_path(Path::new("/home/user/.cardsmith")),
            PathBuf::from("/home/user/.cardsmith/config.toml")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: the only test touching this variable; restored immediately.
        unsafe { std::env::set_var(DATA_DIR_ENV, "/tmp/test-cardsmith") };
        let dir = resolve_data_dir();
        unsafe { std::env::remove_var(DATA_DIR_ENV) };
        assert_eq!(dir, PathBuf::from("/tmp/test-cardsmith"));
    }
}
