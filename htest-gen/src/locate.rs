//! Discovery and loading of hand-written test sources.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use tracing::warn;

use crate::error::GenError;
use crate::scan::normalize_line_endings;
use crate::vocabulary::MarkerVocabulary;

/// A test source selected for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name within the source directory.
    pub name: String,
    /// Full path, used for diagnostics and for reading linked sources.
    pub path: Utf8PathBuf,
    /// Whether the directory entry is a symlink. Links are resolved through
    /// the ambient path since their target may lie outside the directory.
    pub linked: bool,
}

/// Opens the source directory, mapping a missing directory to
/// [`GenError::DirectoryNotFound`].
///
/// # Errors
///
/// Returns [`GenError::DirectoryNotFound`] when `path` is absent or not a
/// directory, and [`GenError::Io`] for any other failure.
pub fn open_source_dir(path: &Utf8Path) -> Result<Dir, GenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Err(GenError::DirectoryNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(err) => Err(GenError::io(path, err)),
    }
}

/// Lists the regular files in `dir` carrying the vocabulary's source
/// extension, excluding the framework source. Names are sorted so logs are
/// reproducible.
///
/// # Errors
///
/// Returns [`GenError::Io`] if the directory cannot be listed.
pub fn locate_sources(
    dir: &Dir,
    root: &Utf8Path,
    vocabulary: &MarkerVocabulary,
) -> Result<Vec<SourceFile>, GenError> {
    let mut sources = Vec::new();
    for entry_result in dir.read_dir(".").map_err(|err| GenError::io(root, err))? {
        let entry = entry_result.map_err(|err| GenError::io(root, err))?;
        let name = entry.file_name().map_err(|err| GenError::io(root, err))?;
        if !name.ends_with(vocabulary.extension.as_str()) || name == vocabulary.framework_source {
            continue;
        }
        let path = root.join(&name);
        let file_type = entry.file_type().map_err(|err| GenError::io(&path, err))?;
        let linked = file_type.is_symlink();
        let is_file = if linked {
            link_target_is_file(&path)?
        } else {
            file_type.is_file()
        };
        if is_file {
            sources.push(SourceFile { name, path, linked });
        }
    }
    sources.sort_by(|left, right| left.name.cmp(&right.name));

    Ok(sources)
}

fn link_target_is_file(path: &Utf8Path) -> Result<bool, GenError> {
    match path.metadata() {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(file = %path, "skipping dangling symlink");
            Ok(false)
        }
        Err(err) => Err(GenError::io(path, err)),
    }
}

/// Reads a source file and strips carriage returns.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; markers and
/// identifiers are ASCII.
///
/// # Errors
///
/// Returns [`GenError::Io`] if the file cannot be read.
pub fn read_source(dir: &Dir, source: &SourceFile) -> Result<String, GenError> {
    let read = if source.linked {
        std::fs::read(&source.path)
    } else {
        dir.read(&source.name)
    };
    let bytes = read.map_err(|err| GenError::io(&source.path, err))?;
    Ok(normalize_line_endings(&String::from_utf8_lossy(&bytes)))
}
