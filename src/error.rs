use std::path::PathBuf;
use thiserror::Error;

/// Reasons a digest set fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("digest set is empty")]
    Empty,

    #[error("digest '{0}' is not of the form <algorithm>:<hex>")]
    Malformed(String),

    #[error("unsupported digest algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("{algorithm} digest must be {expected} hex characters, got {actual}")]
    Length {
        algorithm: String,
        expected: usize,
        actual: usize,
    },

    #[error("{0} digest is not lowercase hex")]
    NotLowercaseHex(String),
}

/// Why a subject digest could not be determined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("reference not found")]
    NotFound,

    #[error("ambiguous manifest: {0}")]
    Ambiguous(String),

    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(#[from] DigestError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to resolve subject '{reference}': {kind}")]
    Resolution {
        reference: String,
        kind: ResolutionFailure,
    },

    #[error("build context field '{field}' is missing or empty")]
    Context { field: &'static str },

    #[error("statement assembly failed: {0}")]
    Assembly(String),

    #[error("material #{index} ('{uri}') rejected: {reason}")]
    Material {
        index: usize,
        uri: String,
        reason: String,
    },

    #[error("failed to persist statement to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn resolution(reference: impl Into<String>, kind: ResolutionFailure) -> Self {
        Error::Resolution {
            reference: reference.into(),
            kind,
        }
    }

    pub(crate) fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Persist {
            path: path.into(),
            source,
        }
    }
}
