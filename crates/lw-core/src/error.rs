use std::path::PathBuf;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when loading a world or an ore table.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A world snapshot was not valid JSON or did not match the format.
    #[error("malformed world file {}: {source}", .path.display())]
    Malformed {
        /// The file that failed.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// A line of an ore table could not be parsed.
    #[error("ore table line {line}: {message}")]
    OreTable {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}
