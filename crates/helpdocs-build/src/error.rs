use std::io;
use std::path::PathBuf;

use helpdocs_render::ConvertError;

/// Error returned while building output for any target.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read page {}: {source}", path.display())]
    ReadPage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Output path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Failed to serialize search index: {0}")]
    Index(#[from] serde_json::Error),
    #[error("Failed to run `{program}`: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with {status}")]
    CommandFailed { program: String, status: String },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
