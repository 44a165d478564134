use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Scheduler job identifier as typed by the user.
///
/// Plain jobs are numeric (`4711`), array tasks use `_` (`4711_3`),
/// heterogeneous components use `+` (`4711+1`) and steps use `.` (`4711.0`).
/// Nothing else is accepted because the id ends up on the command line of
/// the scheduler tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_allowed(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '_' | '.' | '+')
    }
}

impl FromStr for JobId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.chars().all(Self::is_allowed) {
            return Err(Error::InvalidJobId(s.to_string()));
        }
        Ok(JobId(s.to_string()))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_array_and_het_ids() {
        for id in ["4711", "4711_3", "4711+1", "4711.0"] {
            assert!(id.parse::<JobId>().is_ok(), "{} should be accepted", id);
        }
    }

    #[test]
    fn test_rejects_shell_metacharacters() {
        for id in ["", "12;rm", "abc", "12 13", "-1", "12,13"] {
            assert_eq!(
                id.parse::<JobId>(),
                Err(Error::InvalidJobId(id.to_string())),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: JobId = "4711_3".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"4711_3\"");
    }
}
