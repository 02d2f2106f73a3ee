use std::path::PathBuf;

use thiserror::Error;

use crate::ident::AmiiboIdError;

/// All the ways a vault operation can fail.
///
/// `InvalidIdentifier` and `PathEscape` are deliberately separate kinds:
/// the first means the caller handed us a bad id, the second means the
/// filesystem itself tried to lead us out of the storage root.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("invalid amiibo id: {0}")]
    InvalidIdentifier(#[from] AmiiboIdError),

    #[error("path '{}' escapes the storage root '{}'", .path.display(), .root.display())]
    PathEscape { path: PathBuf, root: PathBuf },

    #[error("corrupt record file '{}': {}", .path.display(), .source)]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
