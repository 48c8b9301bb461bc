//! ResourceProvider trait for abstracting resource loading.
//!
//! The rasterizer resolves logo URLs through this trait, so the engine is
//! never tied to one transport: tests pre-populate an in-memory store, native
//! builds read the filesystem, and sessions pointing at ingest-hosted logos
//! use an HTTP provider.

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of raw resource bytes, addressed by path or URL.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its path/URI.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Check if a resource exists without loading it.
    fn exists(&self, path: &str) -> bool;

    /// Returns a human-readable name for this provider (for logging).
    fn name(&self) -> &'static str;
}

/// An in-memory resource provider.
///
/// Resources must be pre-populated before use. Works in any environment,
/// which makes it the provider of choice for tests.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: std::sync::RwLock<std::collections::HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path_string = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path_string.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path_string, Arc::new(data));
        Ok(())
    }

    /// Remove a resource from the store.
    ///
    /// Returns `None` if the lock is poisoned or the resource doesn't exist.
    pub fn remove(&self, path: &str) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(path)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_load() {
        let provider = InMemoryResourceProvider::new();
        provider.add("logo.png", b"not a real png".to_vec()).unwrap();

        let data = provider.load("logo.png").unwrap();
        assert_eq!(&*data, b"not a real png");
        assert!(provider.exists("logo.png"));
    }

    #[test]
    fn test_missing_resource_is_not_found() {
        let provider = InMemoryResourceProvider::new();
        assert!(matches!(
            provider.load("nope.png"),
            Err(ResourceError::NotFound(_))
        ));
        assert!(!provider.exists("nope.png"));
    }

    #[test]
    fn test_remove() {
        let provider = InMemoryResourceProvider::new();
        provider.add("a.png", vec![1, 2, 3]).unwrap();
        let removed = provider.remove("a.png").unwrap();
        assert_eq!(&*removed, &[1, 2, 3]);
        assert!(provider.is_empty());
    }
}
