use crate::traits::CommandRunner;
use crate::{Error, Result};
use jobinfo_engine::{LineFormat, Record, Schema, is_bookkeeping_step, parse_line};
use jobinfo_types::JobId;

pub(crate) fn sacct_args(job: &JobId, schema: &Schema) -> Vec<String> {
    vec![
        "--noheader".to_string(),
        "--parsable2".to_string(),
        format!("--format={}", schema.format_list()),
        format!("--jobs={}", job),
    ]
}

/// Fetch every accounting record (allocation plus steps) of a job.
///
/// Bookkeeping steps are dropped. A line whose column count does not match
/// the schema is skipped with a warning rather than misread. An empty result
/// means the scheduler does not know the job.
pub fn query_sacct(
    runner: &dyn CommandRunner,
    program: &str,
    job: &JobId,
    schema: &Schema,
) -> Result<Vec<Record>> {
    let output = runner.run(program, &sacct_args(job, schema))?;
    if !output.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: output.stderr,
        });
    }

    let format = LineFormat::ACCOUNTING;
    let mut records = Vec::new();
    for line in output.lines() {
        if is_bookkeeping_step(schema, line, format) {
            tracing::trace!(line, "dropping bookkeeping step");
            continue;
        }
        match parse_line(schema, line, format) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(%err, line, "skipping accounting line"),
        }
    }
    Ok(records)
}
