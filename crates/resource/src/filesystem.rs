//! Filesystem-based resource provider for native platforms.
//!
//! Paths resolve relative to a base directory and may not escape it:
//! absolute paths and `..` components are rejected before touching the
//! filesystem.

use papier_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads resources (logo files, demo assets) from a local directory.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for the escape check.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // Canonicalization may fail if the directory doesn't exist yet.
        let canonical = base.canonicalize().ok();
        Self { base_path: base, canonical_base: canonical }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a resource path, or `None` if it would escape the base
    /// directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            return None;
        }

        // Canonicalization failed (file missing): still refuse any ".."
        // component rather than guessing.
        for component in Path::new(path).components() {
            if matches!(component, std::path::Component::ParentDir) {
                return None;
            }
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (path traversal blocked)", path)))?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed { path: path.to_string(), message: e.to_string() }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"fake image bytes").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        let data = provider.load("logo.png").unwrap();
        assert_eq!(&*data, b"fake image bytes");
        assert!(provider.exists("logo.png"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(matches!(
            provider.load("nope.png"),
            Err(ResourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        assert!(provider.load("../../../etc/passwd").is_err());
        assert!(provider.load("/etc/passwd").is_err());
        assert!(!provider.exists("foo/../../bar"));
    }

    #[test]
    fn test_allows_nested_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("uploads")).unwrap();
        fs::write(dir.path().join("uploads/a.png"), b"x").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists("uploads/a.png"));
    }
}
