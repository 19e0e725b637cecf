//! Bundled-resource access.
//!
//! The loader's fallback path reads library binaries out of the application's
//! bundled resources. The bundle is an injected capability so the
//! orchestration logic can be tested against an in-memory fake:
//! - **EmbeddedBundle**: resources held as in-memory byte maps (embedded in
//!   the binary by the packaging step)
//! - **DirBundle**: resources laid out as files under a base directory (dev
//!   mode, unpacked installs)
//!
//! Lookups are always keyed by the bare decorated filename (`libfoo.so`,
//! `foo.dll`, `libfoo.dylib`) with any path prefix already stripped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

/// A readable stream of resource bytes.
pub type ByteSource = Box<dyn Read + Send>;

/// Errors from a bundle lookup.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// No resource is registered under the requested key.
    #[error("no bundled resource named {0:?}")]
    NotFound(String),

    /// The resource exists but its stream could not be opened.
    #[error("failed to open bundled resource: {0}")]
    Io(#[from] io::Error),
}

/// Named access to the application's bundled resources.
pub trait ResourceBundle {
    /// Open the resource registered under `key`.
    ///
    /// `key` is the bare decorated filename, e.g. `libmosaic.so`.
    fn open(&self, key: &str) -> Result<ByteSource, BundleError>;
}

impl<T: ResourceBundle + ?Sized> ResourceBundle for &T {
    fn open(&self, key: &str) -> Result<ByteSource, BundleError> {
        (**self).open(key)
    }
}

/// Resources held in memory, keyed by bare filename.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedBundle {
    entries: HashMap<String, Vec<u8>>,
}

impl EmbeddedBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), data.into());
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the bundle has no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceBundle for EmbeddedBundle {
    fn open(&self, key: &str) -> Result<ByteSource, BundleError> {
        match self.entries.get(key) {
            Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
            None => Err(BundleError::NotFound(key.to_string())),
        }
    }
}

/// Resources laid out as files directly under a base directory.
#[derive(Debug, Clone)]
pub struct DirBundle {
    base: PathBuf,
}

impl DirBundle {
    /// Create a bundle rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ResourceBundle for DirBundle {
    fn open(&self, key: &str) -> Result<ByteSource, BundleError> {
        let path = self.base.join(key);
        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(BundleError::NotFound(key.to_string()))
            }
            Err(e) => Err(BundleError::Io(e)),
        }
    }
}
