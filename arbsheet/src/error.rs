//! All error types for the arbsheet crate.
//!
//! These are returned from all fallible operations (parsing, serialization, merging, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read directory `{path}`: {message}")]
    Directory { path: String, message: String },

    #[error("file not found: `{0}`")]
    FileNotFound(String),

    #[error("invalid sheet: {0}")]
    Schema(String),

    #[error("invalid resource file name `{name}`: {message}")]
    FileName { name: String, message: String },

    #[error("invalid document: {0}")]
    Document(String),
}

impl Error {
    /// Creates a new directory error for an unreadable resource directory
    pub fn directory(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Directory {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new sheet schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Error::Schema(message.into())
    }

    /// Creates a new error for a resource file name that does not follow the
    /// `<prefix>_<locale>.arb` convention
    pub fn file_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::FileName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a new document shape error
    pub fn document(message: impl Into<String>) -> Self {
        Error::Document(message.into())
    }
}
