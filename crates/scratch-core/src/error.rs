//! Error types for scratch.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for scratch operations.
pub type Result<T> = std::result::Result<T, ScratchError>;

/// Top-level error type for scratch.
#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("cannot {op} {}: {source}", path.display())]
    Filesystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("editor error: {0}")]
    Editor(String),

    #[error("no scratch number left after {max}")]
    Exhausted { max: i64 },
}

impl ScratchError {
    pub(crate) fn fs(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Filesystem operation that failed, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    ResolvePath,
    CreateDir,
    ListDir,
    CreateFile,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FsOp::ResolvePath => "resolve path",
            FsOp::CreateDir => "create directory",
            FsOp::ListDir => "list directory",
            FsOp::CreateFile => "create file",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = ScratchError::fs(
            FsOp::ListDir,
            "/tmp/scratch",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        let msg = err.to_string();
        assert!(msg.contains("list directory"));
        assert!(msg.contains("/tmp/scratch"));

        let err = ScratchError::Exhausted { max: i64::MAX };
        assert!(err.to_string().contains(&i64::MAX.to_string()));
    }

    #[test]
    fn filesystem_error_exposes_io_source() {
        use std::error::Error as _;

        let err = ScratchError::fs(
            FsOp::CreateFile,
            "/nope/0.md",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.source().is_some());
    }
}
