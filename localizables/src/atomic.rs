//! Atomic file replacement.

use std::io::Write;
use std::path::Path;

use crate::error::Error;

/// Writes `bytes` to `path` without ever exposing a partial file.
///
/// The content goes to a temporary file in the same directory, is flushed to
/// disk and then renamed over `path`. When an existing file is replaced its
/// permissions are carried over. On any error the temporary file is removed
/// and the previous content of `path` is left untouched.
pub fn write_file_atomically<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), Error> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".localizables-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;

    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|err| Error::Io(err.error))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "replaced file");
    Ok(())
}
