//! Platform-specific library filename decoration.
//!
//! Maps a logical library name (as callers write it, e.g. `"mosaic"` or
//! `"jni/arm64/mosaic"`) to the filename convention the host's native loader
//! expects: `libmosaic.so` on Unix, `libmosaic.dylib` on macOS, `mosaic.dll`
//! on Windows. Pure functions, no I/O.

/// Host platform family, as far as library naming is concerned.
///
/// Anything that is neither Windows nor macOS gets Unix `.so` naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    /// Identify the platform this binary was built for.
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }
}

/// Compute the platform-decorated filename for a logical library name.
///
/// Windows never gets a `lib` prefix and always gets `.dll` appended, even to
/// a name that already carries a suffix. Unix-like platforms go through
/// [`decorate`], which is idempotent on already-decorated names.
///
/// Any `/`-delimited path prefix in `name` is preserved; only the bare name
/// after the last `/` receives prefix/suffix treatment.
pub fn decorated_filename(name: &str, platform: Platform) -> String {
    match platform {
        Platform::Windows => format!("{name}.dll"),
        Platform::MacOs => decorate(name, ".dylib"),
        Platform::Unix => decorate(name, ".so"),
    }
}

/// Apply Unix-style `lib` + suffix decoration to a logical name.
///
/// Names already ending in `suffix` are returned unchanged.
pub fn decorate(name: &str, suffix: &str) -> String {
    if name.ends_with(suffix) {
        return name.to_string();
    }
    match name.rfind('/') {
        Some(pos) => format!("{}/lib{}{}", &name[..pos], &name[pos + 1..], suffix),
        None => format!("lib{name}{suffix}"),
    }
}

/// The bare name: everything after the last `/`, or the whole name.
///
/// Bundled resources and temp-file naming hints are always keyed by the bare
/// decorated filename, never by a path-qualified one.
pub fn bare_name(name: &str) -> &str {
    match name.rfind('/') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}
