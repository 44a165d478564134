//! In-memory command runner.

use jobinfo_providers::{CommandOutput, CommandRunner, Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
enum Response {
    Output(CommandOutput),
    NotInstalled,
}

#[derive(Debug, Default)]
struct State {
    responses: HashMap<String, Response>,
    calls: Vec<Invocation>,
}

/// Replays canned output per program and records every invocation.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the calls through another. Programs without a response fail
/// to spawn, like a missing binary.
///
/// # Example
/// ```
/// use jobinfo_testing::ScriptedRunner;
/// use jobinfo_providers::CommandRunner;
///
/// let runner = ScriptedRunner::new().respond("sinfo", "slurm 23.02.7\n");
/// let out = runner.run("sinfo", &["--version".to_string()]).unwrap();
/// assert!(out.success());
/// assert_eq!(runner.programs_called(), vec!["sinfo"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    state: Arc<Mutex<State>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set(self, program: &str, response: Response) -> Self {
        self.state().responses.insert(program.to_string(), response);
        self
    }

    /// Successful run printing `stdout`.
    pub fn respond(self, program: &str, stdout: &str) -> Self {
        self.set(
            program,
            Response::Output(CommandOutput {
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        )
    }

    /// Successful run printing the given lines.
    pub fn respond_lines<S: AsRef<str>>(self, program: &str, lines: &[S]) -> Self {
        let mut stdout = String::new();
        for line in lines {
            stdout.push_str(line.as_ref());
            stdout.push('\n');
        }
        self.respond(program, &stdout)
    }

    /// Run exiting with `status` and printing `stderr`.
    pub fn fail(self, program: &str, status: i32, stderr: &str) -> Self {
        self.set(
            program,
            Response::Output(CommandOutput {
                status: Some(status),
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        )
    }

    /// Program cannot be spawned.
    pub fn not_installed(self, program: &str) -> Self {
        self.set(program, Response::NotInstalled)
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.state().calls.clone()
    }

    pub fn programs_called(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .map(|c| c.program.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let mut state = self.state();
        state.calls.push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });

        match state.responses.get(program) {
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::NotInstalled) | None => Err(Error::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            }),
        }
    }
}
