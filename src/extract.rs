//! Temp-file materialization of bundled libraries.
//!
//! The native loader can only load from the filesystem, so a bundled resource
//! has to be copied out before the by-path load. Each extraction claims a
//! uniquely named file in the OS temp directory; nothing is deduplicated, a
//! second fallback for the same library produces a second file. Extracted
//! files are left in place for the rest of the process (the native loader
//! keeps them mapped) and registered for best-effort removal at exit.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use log::debug;

use crate::bundle::ByteSource;

/// Fixed, recognizable prefix for extracted files. The full name also carries
/// the bare decorated filename as a hint, but is otherwise unpredictable.
const TEMP_PREFIX: &str = "soload-";

/// Paths to unlink at process teardown. Best-effort only: on platforms where
/// a mapped library cannot be unlinked while loaded, removal silently fails.
static EXIT_CLEANUP: LazyLock<Mutex<Vec<PathBuf>>> = LazyLock::new(|| Mutex::new(Vec::new()));

/// Copy `source` into a freshly created temp file and return its canonical
/// absolute path.
///
/// `bare_name` is the bare decorated filename (`libfoo.so`), used only as a
/// naming hint for humans inspecting the temp directory.
pub fn materialize(mut source: ByteSource, bare_name: &str) -> io::Result<PathBuf> {
    let placeholder = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(&format!("-{bare_name}"))
        .tempfile()?;
    let path = placeholder.path().to_path_buf();

    // Drop the just-created empty file so the copy below can create the path
    // fresh, with no "already exists" conflict. The name is ours from here on
    // in practice, though nothing holds it between the unlink and the create.
    placeholder.close()?;
    register_for_exit_cleanup(path.clone());

    let mut file = File::create(&path)?;
    io::copy(&mut source, &mut file)?;

    let canonical = fs::canonicalize(&path)?;
    debug!("extracted {bare_name} to {}", canonical.display());
    Ok(canonical)
}

/// Schedule `path` for removal at process teardown.
fn register_for_exit_cleanup(path: PathBuf) {
    #[cfg(unix)]
    {
        use std::sync::Once;
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| unsafe {
            libc::atexit(remove_registered);
        });
    }
    // On Windows the DLL stays mapped until the process dies and the unlink
    // would fail regardless, so no teardown hook is installed there.
    if let Ok(mut paths) = EXIT_CLEANUP.lock() {
        paths.push(path);
    }
}

#[cfg(unix)]
extern "C" fn remove_registered() {
    if let Ok(mut paths) = EXIT_CLEANUP.lock() {
        for path in paths.drain(..) {
            let _ = fs::remove_file(path);
        }
    }
}
