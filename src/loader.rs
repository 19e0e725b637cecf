//! Two-phase load orchestration.
//!
//! Per call, no shared state:
//! 1. **Attempt-native**: hand the logical name to the native loader and let
//!    ordinary search-path resolution run. Success terminates.
//! 2. **Fallback**, entered only on a link failure: decorate the name for the
//!    host platform, look the bare decorated filename up in the bundle,
//!    materialize the bytes into a temp file, and load that file by absolute
//!    canonical path.
//!
//! Any failure inside the fallback is fatal and propagates; nothing is
//! retried. The native loader only ever sees the original logical name or
//! the canonical path of a file the extractor just populated.

use log::debug;

use crate::bundle::{BundleError, ResourceBundle};
use crate::error::LoadError;
use crate::extract;
use crate::linker::{NativeLinker, SystemLinker};
use crate::platform::{bare_name, decorated_filename, Platform};

/// Two-phase loader over an injected native linker and resource bundle.
pub struct Loader<L, B> {
    linker: L,
    bundle: B,
}

impl<L: NativeLinker, B: ResourceBundle> Loader<L, B> {
    pub fn new(linker: L, bundle: B) -> Self {
        Self { linker, bundle }
    }

    /// Load the library identified by `name`.
    ///
    /// On success the library is registered in the process-wide symbol table.
    /// On failure an extracted temp file may remain on disk; partial side
    /// effects are not rolled back.
    pub fn load(&self, name: &str) -> Result<(), LoadError> {
        let link_err = match self.linker.load_by_name(name) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        let decorated = decorated_filename(name, Platform::host());
        let key = bare_name(&decorated).to_string();
        debug!("native loader could not resolve {name:?} ({link_err}); trying bundled {key:?}");

        let source = self.bundle.open(&key).map_err(|e| match e {
            BundleError::NotFound(_) => LoadError::ResourceNotFound {
                name: name.to_string(),
                key: key.clone(),
            },
            BundleError::Io(source) => LoadError::Extraction {
                key: key.clone(),
                source,
            },
        })?;

        let path = extract::materialize(source, &key).map_err(|source| LoadError::Extraction {
            key: key.clone(),
            source,
        })?;

        self.linker
            .load_by_path(&path)
            .map_err(|e| LoadError::SecondaryLinkFailure { path, reason: e.0 })
    }
}

/// Load `name` through the host's dynamic linker, falling back to `bundle`.
pub fn load_library<B: ResourceBundle>(name: &str, bundle: &B) -> Result<(), LoadError> {
    Loader::new(SystemLinker, bundle).load(name)
}
