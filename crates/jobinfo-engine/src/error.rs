use std::fmt;

/// Result type for jobinfo-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A raw line does not have one column per requested field
    ColumnCount { expected: usize, found: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ColumnCount { expected, found } => write!(
                f,
                "Column count mismatch: expected {} columns, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for Error {}
