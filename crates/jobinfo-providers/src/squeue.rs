use crate::traits::CommandRunner;
use jobinfo_engine::QueueSupplement;
use jobinfo_types::JobId;

/// `%E` is the dependency expression, `%r` the reason the job is waiting.
const QUEUE_FORMAT: &str = "%E|%r";

pub(crate) fn squeue_args(job: &JobId) -> Vec<String> {
    vec![
        "--noheader".to_string(),
        format!("--format={}", QUEUE_FORMAT),
        format!("--jobs={}", job),
    ]
}

fn normalize(value: &str, null: &str) -> String {
    let value = value.trim();
    if value == null {
        String::new()
    } else {
        value.to_string()
    }
}

/// Parse the single `dependency|reason` line.
pub(crate) fn parse_queue_line(line: &str) -> Option<QueueSupplement> {
    let (dependencies, reason) = line.split_once('|')?;
    Some(QueueSupplement {
        dependencies: normalize(dependencies, "(null)"),
        pending_reason: normalize(reason, "None"),
    })
}

/// Fetch dependency and pending reason for a queued job.
/// Any failure means "no queue data" and yields `None`.
pub fn query_squeue(
    runner: &dyn CommandRunner,
    program: &str,
    job: &JobId,
) -> Option<QueueSupplement> {
    let output = match runner.run(program, &squeue_args(job)) {
        Ok(output) if output.success() => output,
        Ok(output) => {
            tracing::debug!(status = ?output.status, stderr = %output.stderr.trim(), "no queue state");
            return None;
        }
        Err(err) => {
            tracing::debug!(%err, "no queue state");
            return None;
        }
    };

    let supplement = output.lines().next().and_then(parse_queue_line);
    if supplement.is_none() {
        tracing::debug!("queue state output had no usable line");
    }
    supplement
}
