use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Scheduler release as a comparable `(major, minor)` pair.
///
/// Slurm numbers releases `YY.MM`, so `23.02.7` becomes `(23, 2)`; the patch
/// level never changes which accounting fields exist and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SchedulerVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchedulerVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Find the first `MAJOR.MINOR[.PATCH]` token in probe output such as
    /// `slurm 23.02.7` or `slurm-wlm 19.05.5`.
    pub fn detect(probe_output: &str) -> Result<Self> {
        probe_output
            .split_whitespace()
            .find_map(|token| token.parse().ok())
            .ok_or_else(|| Error::InvalidVersion(probe_output.to_string()))
    }
}

impl FromStr for SchedulerVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_string());
        let mut parts = s.split('.');
        let major = parts.next().ok_or_else(invalid)?;
        let minor = parts.next().ok_or_else(invalid)?;

        let number = |part: &str| -> Result<u32> {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };

        let version = Self::new(number(major)?, number(minor)?);
        // Trailing components must still look like a version (23.02.7, 23.02.0-1)
        for rest in parts {
            if !rest.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid());
            }
        }
        Ok(version)
    }
}

impl fmt::Display for SchedulerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_probe_output() {
        assert_eq!(
            SchedulerVersion::detect("slurm 23.02.7\n").unwrap(),
            SchedulerVersion::new(23, 2)
        );
        assert_eq!(
            SchedulerVersion::detect("slurm-wlm 19.05.5").unwrap(),
            SchedulerVersion::new(19, 5)
        );
        assert_eq!(
            SchedulerVersion::detect("slurm 24.11").unwrap(),
            SchedulerVersion::new(24, 11)
        );
    }

    #[test]
    fn test_detect_fails_loudly() {
        for raw in ["", "slurm", "slurm unknown", "slurm 23", "slurm x.y.z"] {
            assert!(
                SchedulerVersion::detect(raw).is_err(),
                "{:?} should not yield a version",
                raw
            );
        }
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(SchedulerVersion::new(18, 8) < SchedulerVersion::new(19, 5));
        assert!(SchedulerVersion::new(9, 11) < SchedulerVersion::new(17, 2));
        assert!(SchedulerVersion::new(23, 2) < SchedulerVersion::new(23, 11));
    }

    #[test]
    fn test_display_pads_minor() {
        assert_eq!(SchedulerVersion::new(23, 2).to_string(), "23.02");
    }
}
