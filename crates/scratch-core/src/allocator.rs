//! Scratch file allocation.
//!
//! Scratch files are named `<n>.<ext>` where `<n>` is a base-10 integer.
//! The next file takes one more than the largest integer already present in
//! the directory, or `0` when there is none. Entries whose stem is not an
//! integer are not scratch files and are skipped without complaint.
//!
//! Every entry counts, whatever its extension and whether it is a file or a
//! directory: `3.txt` or a subdirectory named `3` both push the next number
//! to `4`.

use std::path::{Path, PathBuf};

use crate::error::{FsOp, Result, ScratchError};

/// The next free scratch name in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextName {
    /// Numeric part of the file name.
    pub index: i64,
    /// Full path: directory joined with `<index>.<extension>`.
    pub path: PathBuf,
}

/// Portion of `name` before its final extension separator.
///
/// Leading dots do not begin an extension, so `.5` is its own stem and
/// `0.` has stem `0`.
pub fn stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if name[..pos].chars().any(|c| c != '.') => &name[..pos],
        _ => name,
    }
}

/// Numeric part of a scratch file name, or `None` if `name` is not one.
pub fn parse_index(name: &str) -> Option<i64> {
    stem(name).parse().ok()
}

/// Index following the largest scratch index among `names`.
///
/// # Errors
///
/// Returns [`ScratchError::Exhausted`] if the largest index is `i64::MAX`.
pub fn next_index<I, S>(names: I) -> Result<i64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let max = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let index = parse_index(name);
            if index.is_none() {
                tracing::trace!(name, "not a scratch entry");
            }
            index
        })
        .max();

    match max {
        Some(max) => max.checked_add(1).ok_or(ScratchError::Exhausted { max }),
        None => Ok(0),
    }
}

/// File name for a scratch index.
pub fn file_name(index: i64, extension: &str) -> String {
    format!("{index}.{extension}")
}

/// Compute the next scratch path in `dir` without creating anything.
///
/// # Errors
///
/// Returns [`ScratchError::Filesystem`] if `dir` cannot be listed, or
/// [`ScratchError::Exhausted`] if no further index is representable.
pub fn next_file_path(dir: &Path, extension: &str) -> Result<NextName> {
    let list_err = |e| ScratchError::fs(FsOp::ListDir, dir, e);

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        // Names that are not UTF-8 cannot be integers.
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    let index = next_index(&names)?;
    let path = dir.join(file_name(index, extension));
    tracing::debug!(index, path = %path.display(), "next scratch file");
    Ok(NextName { index, path })
}

/// Create an empty file at `path`, truncating it if it already exists.
///
/// # Errors
///
/// Returns [`ScratchError::Filesystem`] on permission or path errors.
pub fn touch(path: &Path) -> Result<()> {
    std::fs::File::create(path).map_err(|e| ScratchError::fs(FsOp::CreateFile, path, e))?;
    Ok(())
}

/// Allocate the next scratch name in `dir` and create the empty file.
///
/// # Errors
///
/// See [`next_file_path`] and [`touch`].
pub fn create_next(dir: &Path, extension: &str) -> Result<NextName> {
    let next = next_file_path(dir, extension)?;
    touch(&next.path)?;
    Ok(next)
}
