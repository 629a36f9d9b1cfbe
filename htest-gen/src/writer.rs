//! Idempotent file writer for generated sources.
//!
//! Build systems treat a modification time change as a rebuild trigger, so a
//! generated file is only touched when its content actually differs.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;

use crate::error::GenError;

/// Result of handing rendered content to [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or overwritten.
    Updated,
    /// The file already held identical content and was left alone.
    Unchanged,
}

/// Ensures a directory exists and returns a handle to it.
///
/// # Errors
///
/// Returns [`GenError::Io`] if the directory cannot be created or opened.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, GenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| GenError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| GenError::io(path, io_err))
        }
        Err(open_err) => Err(GenError::io(path, open_err)),
    }
}

/// Writes `content` to `file_name` inside `dir` unless the file already holds
/// exactly these bytes.
///
/// `root` is the path of `dir` and is only used for error reporting.
///
/// # Errors
///
/// Returns [`GenError::Io`] if the existing file cannot be read or the new
/// content cannot be written.
pub fn write_if_changed(
    dir: &Dir,
    root: &Utf8Path,
    file_name: &str,
    content: &str,
) -> Result<WriteOutcome, GenError> {
    let file_path = root.join(file_name);
    match dir.read(file_name) {
        Ok(existing) if existing == content.as_bytes() => return Ok(WriteOutcome::Unchanged),
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(GenError::io(file_path, err)),
    }

    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| GenError::io(file_path.clone(), io_err))?;
    file.write_all(content.as_bytes())
        .map_err(|io_err| GenError::io(file_path, io_err))?;

    Ok(WriteOutcome::Updated)
}
