use crate::traits::CommandRunner;
use crate::{Error, Result};
use jobinfo_types::SchedulerVersion;

/// Ask the scheduler for its release. Unlike the optional sources, every
/// failure here is fatal: without a version the column layout is unknown.
pub fn query_version(runner: &dyn CommandRunner, program: &str) -> Result<SchedulerVersion> {
    let output = runner.run(program, &["--version".to_string()])?;
    if !output.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: output.stderr,
        });
    }
    let version = SchedulerVersion::detect(&output.stdout)?;
    tracing::debug!(%version, "detected scheduler version");
    Ok(version)
}
