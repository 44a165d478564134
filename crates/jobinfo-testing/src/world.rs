//! TestWorld pattern for end-to-end CLI tests.
//!
//! Provides a fluent interface for:
//! - Installing fake `sacct`, `sstat`, `squeue` and `sinfo` scripts
//! - Writing a config file that points jobinfo at them
//! - Recording which scheduler commands the CLI invoked

use crate::fixtures::DEFAULT_VERSION_OUTPUT;
use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROGRAMS: [&str; 4] = ["sacct", "sstat", "squeue", "sinfo"];

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use jobinfo_testing::TestWorld;
///
/// let world = TestWorld::new().with_sacct(&["4711|train|alice"]);
///
/// let result = world.run(&["4711"]).unwrap();
/// assert!(result.success());
/// assert_eq!(world.calls(), vec!["sinfo", "sacct"]);
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    bin_dir: PathBuf,
    config_path: PathBuf,
    calls_log: PathBuf,
    privileged_users: Vec<String>,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated scheduler.
    ///
    /// `sinfo` reports 23.02 and `sstat` fails the way it does for jobs
    /// without running steps. The other commands print nothing.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let bin_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");

        let world = Self {
            config_path: temp_dir.path().join("config.toml"),
            calls_log: temp_dir.path().join("calls.log"),
            bin_dir,
            temp_dir,
            privileged_users: Vec::new(),
            env_vars: HashMap::new(),
        };

        world
            .with_program("sinfo", 0, &[DEFAULT_VERSION_OUTPUT], "")
            .with_program("sacct", 0, &[] as &[&str], "")
            .with_program("sstat", 1, &[] as &[&str], "sstat: error: no steps running")
            .with_program("squeue", 0, &[] as &[&str], "")
            .with_env("USER", "alice")
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Replace a fake program with one that prints `stdout_lines`, writes
    /// `stderr` and exits with `status`.
    pub fn with_program<S: AsRef<str>>(
        self,
        program: &str,
        status: i32,
        stdout_lines: &[S],
        stderr: &str,
    ) -> Self {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!(
            "printf '%s\\n' \"{} $*\" >> '{}'\n",
            program,
            self.calls_log.display()
        ));
        script.push_str("cat <<'JOBINFO_EOF'\n");
        for line in stdout_lines {
            script.push_str(line.as_ref());
            script.push('\n');
        }
        script.push_str("JOBINFO_EOF\n");
        if !stderr.is_empty() {
            script.push_str("cat >&2 <<'JOBINFO_EOF'\n");
            script.push_str(stderr);
            script.push_str("\nJOBINFO_EOF\n");
        }
        script.push_str(&format!("exit {}\n", status));

        write_executable(&self.bin_dir.join(program), &script)
            .expect("Failed to write fake scheduler command");
        self.write_config();
        self
    }

    pub fn with_version_output(self, output: &str) -> Self {
        self.with_program("sinfo", 0, &[output], "")
    }

    pub fn with_sacct<S: AsRef<str>>(self, lines: &[S]) -> Self {
        self.with_program("sacct", 0, lines, "")
    }

    pub fn with_sstat<S: AsRef<str>>(self, lines: &[S]) -> Self {
        self.with_program("sstat", 0, lines, "")
    }

    pub fn with_squeue(self, line: &str) -> Self {
        self.with_program("squeue", 0, &[line], "")
    }

    pub fn with_privileged_user(mut self, user: &str) -> Self {
        self.privileged_users.push(user.to_string());
        self.write_config();
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    fn write_config(&self) {
        let mut config = String::from("label_width = 20\n");
        config.push_str(&format!(
            "privileged_users = [{}]\n\n[commands]\n",
            self.privileged_users
                .iter()
                .map(|u| format!("{:?}", u))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        for program in PROGRAMS {
            config.push_str(&format!(
                "{} = {:?}\n",
                program,
                self.bin_dir.join(program).display().to_string()
            ));
        }
        fs::write(&self.config_path, config).expect("Failed to write config");
    }

    /// Scheduler commands invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.calls_log)
            .unwrap_or_default()
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    /// Full command lines invoked so far, in order.
    pub fn call_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.calls_log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config").arg(&self.config_path);
        cmd.env_remove("RUST_LOG").env_remove("JOBINFO_CONFIG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the jobinfo binary with `args` and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, which cargo test does for the CLI crate's integration tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("jobinfo")
            .map_err(|e| anyhow::anyhow!("Failed to find jobinfo binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    {
        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn write_executable(path: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
