use crate::traits::{CommandOutput, CommandRunner};
use crate::{Error, Result};
use std::process::{Command, Stdio};

/// Runs scheduler commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, "running scheduler command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(
            program,
            status = ?result.status,
            stdout_lines = result.lines().count(),
            "scheduler command finished"
        );
        Ok(result)
    }
}
