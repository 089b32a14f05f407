//! FileSystem trait for abstracting file I/O.
//!
//! Defined in cardsmith-core so the studio can export artifacts without
//! depending on any specific filesystem implementation. The `LocalFileSystem`
//! adapter lives in cardsmith-infra.

use std::path::Path;

/// Abstraction over filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Write string content to a file, creating parent directories as needed.
    fn write_file(
        &self,
        path: &Path,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;

    /// Read a file's content as a string.
    fn read_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<String, std::io::Error>> + Send;

    /// Create a directory and all parent directories.
    fn create_dir_all(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;
}

/// In-memory filesystem for tests.
#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryFileSystem {
        pub files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemoryFileSystem {
        pub fn contents(&self, path: &Path) -> Option<String> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl FileSystem for MemoryFileSystem {
        async fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        async fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
        }

        async fn create_dir_all(&self, _path: &Path) -> Result<(), std::io::Error> {
            Ok(())
        }
    }
}
