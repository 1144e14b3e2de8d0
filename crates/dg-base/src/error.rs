use std::fmt;
use std::io;

/// Error for the I/O edges: writing exports, reading icons, rewriting documents.
///
/// Grid and session operations never fail; only the parts that touch the
/// filesystem or parse a document return this.
#[derive(Debug)]
pub enum DeckError {
    /// Filesystem failure, with the path involved
    Io { path: String, message: String },
    /// Document could not be serialized or parsed
    Json(String),
    /// A path that should be a directory is not one
    NotADirectory(String),
}

impl DeckError {
    pub fn io(path: impl Into<String>, err: io::Error) -> Self {
        DeckError::Io { path: path.into(), message: err.to_string() }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Io { path, message } => write!(f, "I/O error on {}: {}", path, message),
            DeckError::Json(msg) => write!(f, "JSON error: {}", msg),
            DeckError::NotADirectory(path) => write!(f, "Not a directory: {}", path),
        }
    }
}

impl std::error::Error for DeckError {}

impl From<io::Error> for DeckError {
    fn from(e: io::Error) -> Self {
        DeckError::Io { path: String::from("<unknown>"), message: e.to_string() }
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        DeckError::Json(e.to_string())
    }
}
