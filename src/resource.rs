//! Resource loading abstraction.
//!
//! Font byte assets are fetched through a [`ResourceProvider`] so the engine
//! is never tied to filesystem access: tests pre-populate an
//! [`InMemoryResourceProvider`], native callers point a
//! [`FilesystemResourceProvider`] at their asset directory.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

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

/// A source of byte assets addressed by path/URI.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its path. Returns shared bytes or an error when
    /// the resource is missing or unreadable.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Check whether a resource exists without loading it.
    fn exists(&self, path: &str) -> bool;

    /// Human-readable provider name for logging.
    fn name(&self) -> &'static str;
}

/// Pre-populated in-memory storage. Works in any environment; the default
/// provider for tests and for callers that bundle their own font bytes.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) {
        if let Ok(mut resources) = self.resources.write() {
            resources.insert(path.into(), Arc::new(data));
        }
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
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

/// Loads resources from a base directory on the local filesystem.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base: PathBuf,
}

impl FilesystemResourceProvider {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.base.join(candidate)
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full = self.resolve(path);
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Arc::new(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound(full.display().to_string()))
            }
            Err(e) => Err(ResourceError::LoadFailed {
                path: full.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
