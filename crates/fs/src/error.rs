use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("access to {} was denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("reading {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an I/O failure on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            io::ErrorKind::NotADirectory => FsError::NotADirectory(path),
            _ => FsError::Io { path, source },
        }
    }

    /// Recoverable through a user grant rather than a different path.
    pub fn is_permission(&self) -> bool {
        matches!(self, FsError::PermissionDenied(_))
    }
}
