//! Native-loader capability.
//!
//! The process-wide dynamic linker is modeled as a trait so the two-phase
//! load orchestration can be tested against a fake. [`SystemLinker`] is the
//! production implementation:
//!
//! - **Linux / BSD**: `dlopen(RTLD_NOW | RTLD_LOCAL)` on `.so` files
//! - **macOS**: same, on `.dylib` files
//! - **Windows**: `LoadLibraryW` on `.dll` files
//!
//! Loaded handles are never released; unloading is out of scope, and the OS
//! keeps the library registered for the life of the process.

use std::path::Path;

use crate::platform::{decorated_filename, Platform};

/// The native loader could not resolve a name or accept a file.
///
/// Carries the platform diagnostic (`dlerror` text or a Win32 error code).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct LinkFailure(pub String);

/// Injected capability over the process-wide native symbol table.
pub trait NativeLinker {
    /// Load a library by logical name through the platform's standard
    /// search-path resolution. Idempotent if the library is already loaded.
    fn load_by_name(&self, name: &str) -> Result<(), LinkFailure>;

    /// Load a library from an absolute filesystem path.
    fn load_by_path(&self, path: &Path) -> Result<(), LinkFailure>;
}

impl<T: NativeLinker + ?Sized> NativeLinker for &T {
    fn load_by_name(&self, name: &str) -> Result<(), LinkFailure> {
        (**self).load_by_name(name)
    }

    fn load_by_path(&self, path: &Path) -> Result<(), LinkFailure> {
        (**self).load_by_path(path)
    }
}

/// The host operating system's dynamic linker.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinker;

impl NativeLinker for SystemLinker {
    fn load_by_name(&self, name: &str) -> Result<(), LinkFailure> {
        // By-name loads decorate internally, the same mapping the platform's
        // own by-name entry point applies before searching.
        let filename = decorated_filename(name, Platform::host());
        sys::load(Path::new(&filename))
    }

    fn load_by_path(&self, path: &Path) -> Result<(), LinkFailure> {
        sys::load(path)
    }
}

// ============================================================================
// Unix Implementation (Linux, macOS, BSD)
// ============================================================================

#[cfg(unix)]
mod sys {
    use std::ffi::{CStr, CString};
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    use super::LinkFailure;

    pub fn load(path: &Path) -> Result<(), LinkFailure> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| LinkFailure(format!("invalid library path: {e}")))?;

        let handle = unsafe {
            // RTLD_NOW: resolve all symbols immediately
            // RTLD_LOCAL: symbols not available for subsequently loaded libraries
            libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL)
        };

        if handle.is_null() {
            return Err(LinkFailure(dlerror_string()));
        }

        // Handle deliberately left open; the library stays mapped.
        Ok(())
    }

    fn dlerror_string() -> String {
        unsafe {
            let err_ptr = libc::dlerror();
            if err_ptr.is_null() {
                "unknown dlopen error".to_string()
            } else {
                CStr::from_ptr(err_ptr).to_string_lossy().into_owned()
            }
        }
    }
}

// ============================================================================
// Windows Implementation
// ============================================================================

#[cfg(windows)]
mod sys {
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use super::LinkFailure;

    pub fn load(path: &Path) -> Result<(), LinkFailure> {
        // Convert to a NUL-terminated wide string
        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        let handle = unsafe { LoadLibraryW(wide.as_ptr()) };

        if handle.is_null() {
            let error = unsafe { GetLastError() };
            return Err(LinkFailure(format!(
                "{} (error code: {})",
                path.display(),
                error
            )));
        }

        // Handle deliberately left open; the library stays mapped.
        Ok(())
    }

    extern "system" {
        fn LoadLibraryW(filename: *const u16) -> *mut std::ffi::c_void;
        fn GetLastError() -> u32;
    }
}
