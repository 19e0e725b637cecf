//! Loader error types.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading a library through the fallback path.
///
/// A link failure on the *first* (by-name) attempt is never surfaced on its
/// own: the loader recovers from it by switching to the bundled-resource
/// fallback. Everything below is fatal and reported to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No bundled resource matches the decorated bare filename.
    #[error("library {name:?} not found in bundled resources (looked for {key:?})")]
    ResourceNotFound {
        /// Logical name the caller asked for
        name: String,
        /// Bare decorated filename used as the bundle lookup key
        key: String,
    },

    /// Temp-file creation, resource-stream open, or byte copy failed.
    #[error("failed to extract bundled library {key:?}")]
    Extraction {
        /// Bare decorated filename being extracted
        key: String,
        #[source]
        source: io::Error,
    },

    /// The native loader rejected the extracted file itself
    /// (architecture mismatch, corrupt bytes, …).
    #[error("native loader rejected extracted library at {path}: {reason}")]
    SecondaryLinkFailure {
        /// Canonical path of the extracted file
        path: PathBuf,
        /// Platform diagnostic (dlerror / GetLastError)
        reason: String,
    },
}
