use std::path::PathBuf;

/// Errors produced while reading, validating or writing a profile.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A recognized directive carried a value that does not parse.
    #[error("line {line}: invalid {field} value {value:?}: {reason}")]
    InvalidLiteral {
        field: &'static str,
        value: String,
        line: usize,
        reason: String,
    },

    /// The profile parsed but is not usable as-is.
    #[error("invalid config: {0}")]
    Validation(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Auth(#[from] clipshare_auth::Error),
}

impl Error {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
