use crate::Config;

/// Who is asking for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    privileged: bool,
}

impl Identity {
    pub fn new(name: impl Into<String>, privileged: bool) -> Self {
        Self {
            name: name.into(),
            privileged,
        }
    }

    /// The invoking user: login name from `USER` or `LOGNAME`, privileged
    /// when running as root or listed in `privileged_users`.
    pub fn current(config: &Config) -> Self {
        let name = ["USER", "LOGNAME"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        let privileged = is_superuser() || config.is_privileged(&name);
        tracing::debug!(user = %name, privileged, "resolved caller identity");
        Self::new(name, privileged)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the caller may read live statistics of a job owned by `owner`.
    pub fn may_inspect(&self, owner: &str) -> bool {
        self.privileged || (!self.name.is_empty() && self.name == owner)
    }
}

#[cfg(unix)]
fn is_superuser() -> bool {
    unsafe { libc::getuid() == 0 }
}

#[cfg(not(unix))]
fn is_superuser() -> bool {
    false
}
