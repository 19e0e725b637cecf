//! Two-phase native library loading.
//!
//! Resolves a native library referenced by a logical name, mirroring a
//! mobile-platform loader API so calling code can move between environments
//! that expose native libraries differently:
//!
//! 1. Ask the host's dynamic linker to resolve the name through its standard
//!    search paths.
//! 2. On a link failure, locate a matching binary in the application's
//!    bundled resources, materialize it into a temp file, and load it by
//!    absolute path.
//!
//! Both external collaborators sit behind traits ([`NativeLinker`],
//! [`ResourceBundle`]) so the orchestration can be exercised with fakes.
//!
//! ```ignore
//! let mut bundle = soload::EmbeddedBundle::new();
//! bundle.insert("libmosaic.so", MOSAIC_SO_BYTES);
//! soload::load_library("mosaic", &bundle)?;
//! ```

pub mod bundle;
pub mod error;
pub mod extract;
pub mod linker;
pub mod loader;
pub mod platform;

pub use bundle::{BundleError, ByteSource, DirBundle, EmbeddedBundle, ResourceBundle};
pub use error::LoadError;
pub use linker::{LinkFailure, NativeLinker, SystemLinker};
pub use loader::{load_library, Loader};
pub use platform::{bare_name, decorate, decorated_filename, Platform};
