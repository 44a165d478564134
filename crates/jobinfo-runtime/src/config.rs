use crate::Result;
use jobinfo_providers::Programs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "JOBINFO_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. JOBINFO_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
///
/// Returns `None` when no location can be determined; built-in defaults
/// apply then.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    resolve_from(explicit_path, std::env::var(CONFIG_ENV).ok())
}

fn resolve_from(explicit_path: Option<&Path>, env_path: Option<String>) -> Option<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Some(expand_tilde(&path.to_string_lossy()));
    }

    // Priority 2: JOBINFO_CONFIG environment variable
    if let Some(env_path) = env_path.filter(|p| !p.is_empty()) {
        return Some(expand_tilde(&env_path));
    }

    // Priority 3: XDG config directory
    dirs::config_dir().map(|dir| dir.join("jobinfo").join("config.toml"))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Width of the left-justified label column in plain output
    pub label_width: usize,

    /// Login names allowed to read live statistics of any job
    pub privileged_users: Vec<String>,

    /// Scheduler tool names or paths
    pub commands: Programs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label_width: 20,
            privileged_users: Vec::new(),
            commands: Programs::default(),
        }
    }
}

impl Config {
    /// Load from the resolved location, falling back to defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn is_privileged(&self, user: &str) -> bool {
        self.privileged_users.iter().any(|u| u == user)
    }
}
