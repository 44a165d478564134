use std::fmt;

/// Result type for jobinfo-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Job identifier contains characters other than digits, '_', '.', '+'
    InvalidJobId(String),

    /// Scheduler version string has no MAJOR.MINOR component
    InvalidVersion(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidJobId(id) => write!(
                f,
                "Invalid job id '{}': only digits and the characters '_', '.', '+' are allowed",
                id
            ),
            Error::InvalidVersion(raw) => {
                write!(f, "Cannot parse scheduler version from '{}'", raw.trim())
            }
        }
    }
}

impl std::error::Error for Error {}
