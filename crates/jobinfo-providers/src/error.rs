use std::fmt;

/// Result type for jobinfo-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug)]
pub enum Error {
    /// Scheduler command could not be started
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Scheduler command exited unsuccessfully
    CommandFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Version probe output could not be parsed
    Version(jobinfo_types::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spawn { program, source } => {
                write!(f, "Failed to run '{}': {}", program, source)
            }
            Error::CommandFailed {
                program,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "'{}' exited with status {}", program, code)?,
                    None => write!(f, "'{}' was terminated by a signal", program)?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            Error::Version(err) => write!(f, "Version probe failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn { source, .. } => Some(source),
            Error::Version(err) => Some(err),
            Error::CommandFailed { .. } => None,
        }
    }
}

impl From<jobinfo_types::Error> for Error {
    fn from(err: jobinfo_types::Error) -> Self {
        Error::Version(err)
    }
}
