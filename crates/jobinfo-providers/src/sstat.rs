use crate::traits::CommandRunner;
use jobinfo_engine::{LineFormat, Record, Schema, fold_records, parse_runtime_line};
use jobinfo_types::JobId;

pub(crate) fn sstat_args(job: &JobId, schema: &Schema) -> Vec<String> {
    vec![
        "--noheader".to_string(),
        "--parsable".to_string(),
        "--allsteps".to_string(),
        format!("--format={}", schema.runtime_format_list()),
        format!("--jobs={}", job),
    ]
}

/// Fetch live statistics for a running job.
///
/// Each running step yields one line; they are folded into a single record.
/// Any failure means "no live data" and yields `None`.
pub fn query_sstat(
    runner: &dyn CommandRunner,
    program: &str,
    job: &JobId,
    schema: &Schema,
) -> Option<Record> {
    let output = match runner.run(program, &sstat_args(job, schema)) {
        Ok(output) if output.success() => output,
        Ok(output) => {
            tracing::debug!(status = ?output.status, stderr = %output.stderr.trim(), "no live statistics");
            return None;
        }
        Err(err) => {
            tracing::debug!(%err, "no live statistics");
            return None;
        }
    };

    let records = output.lines().filter_map(|line| {
        parse_runtime_line(schema, line, LineFormat::LIVE_STATISTICS)
            .map_err(|err| tracing::warn!(%err, line, "skipping live statistics line"))
            .ok()
    });
    fold_records(schema, records)
}
