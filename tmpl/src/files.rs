//! File accessor used from inside templates

use std::path::Path;

use tracing::debug;

use crate::error::{Result, TemplateError};

/// Read a whole file relative to the current working directory
///
/// Contents are returned byte for byte and must be valid UTF-8. No caching:
/// every call hits the filesystem and the handle is closed before returning.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    debug!(?path, "read_file: called");
    let bytes = std::fs::read(path).map_err(|e| TemplateError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| TemplateError::FileRead {
        path: path.to_path_buf(),
        message: format!("file is not valid UTF-8 ({})", e.utf8_error()),
    })
}
