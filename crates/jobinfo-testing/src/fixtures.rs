//! Scheduler output lines for common job shapes.

use jobinfo_engine::Schema;
use jobinfo_types::SchedulerVersion;

/// Version reported by the fake `sinfo` unless a test overrides it.
pub const DEFAULT_VERSION_OUTPUT: &str = "slurm 23.02.7";

pub fn default_schema() -> Schema {
    Schema::for_version(SchedulerVersion::new(23, 2))
}

/// One `sacct --parsable2` line, built by field name.
///
/// Fields that are not set render as empty columns, which is what sacct
/// prints for values it does not have.
#[derive(Debug, Clone, Default)]
pub struct SacctRow {
    values: Vec<(String, String)>,
}

impl SacctRow {
    pub fn new(job_id: &str) -> Self {
        Self::default().set("JobID", job_id)
    }

    pub fn set(mut self, field: &str, value: &str) -> Self {
        self.values.retain(|(name, _)| name != field);
        self.values.push((field.to_string(), value.to_string()));
        self
    }

    fn value(&self, field: &str) -> &str {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn render(&self, schema: &Schema) -> String {
        schema
            .fields()
            .iter()
            .map(|f| self.value(f.name))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Only the columns the live-statistics source reports, with its
    /// trailing delimiter.
    pub fn render_runtime(&self, schema: &Schema) -> String {
        let mut line = String::new();
        for f in schema.fields().iter().filter(|f| f.prefer_runtime) {
            line.push_str(self.value(f.name));
            line.push('|');
        }
        line
    }
}

/// Allocation record of a job that ran to a failure on 50 cores.
pub fn finished_job(job_id: &str) -> SacctRow {
    SacctRow::new(job_id)
        .set("JobName", "train")
        .set("User", "alice")
        .set("Account", "ml")
        .set("Partition", "gpu")
        .set("NodeList", "node[01-02]")
        .set("NNodes", "2")
        .set("NCPUS", "50")
        .set("ReqTRES", "billing=50,cpu=50,mem=200G,node=2")
        .set("State", "FAILED")
        .set("Submit", "2024-03-01T09:58:00")
        .set("Start", "2024-03-01T10:00:00")
        .set("End", "2024-03-01T12:30:00")
        .set("Timelimit", "1-00:00:00")
        .set("Elapsed", "02:30:00")
        .set("TotalCPU", "2-01:00:00")
        .set("UserCPU", "1-20:06:00")
        .set("SystemCPU", "04:54:00")
        .set("ReqMem", "4000M")
        .set("WorkDir", "/home/alice/train")
        .set("ExitCode", "1:0")
}

/// The batch step of [`finished_job`], carrying the usage peaks.
pub fn finished_batch_step(job_id: &str) -> SacctRow {
    SacctRow::new(&format!("{}.batch", job_id))
        .set("JobName", "batch")
        .set("NodeList", "node01")
        .set("NNodes", "1")
        .set("NCPUS", "25")
        .set("State", "FAILED")
        .set("Start", "2024-03-01T10:00:00")
        .set("End", "2024-03-01T12:30:00")
        .set("Elapsed", "02:30:00")
        .set("MaxRSS", "3.5G")
        .set("MaxRSSNode", "node01")
        .set("MaxDiskWrite", "512M")
        .set("MaxDiskWriteNode", "node01")
        .set("MaxDiskRead", "1G")
        .set("MaxDiskReadNode", "node01")
        .set("ExitCode", "1:0")
}

/// Bookkeeping step the scheduler adds to every job.
pub fn extern_step(job_id: &str) -> SacctRow {
    SacctRow::new(&format!("{}.extern", job_id))
        .set("JobName", "extern")
        .set("NCPUS", "64")
        .set("State", "CANCELLED")
        .set("Start", "2024-03-01T09:00:00")
        .set("MaxRSS", "900G")
        .set("ExitCode", "0:15")
}

/// A job still waiting in the queue.
pub fn pending_job(job_id: &str) -> SacctRow {
    SacctRow::new(job_id)
        .set("JobName", "wait")
        .set("User", "alice")
        .set("Partition", "gpu")
        .set("NodeList", "None assigned")
        .set("NCPUS", "8")
        .set("State", "PENDING")
        .set("Submit", "2024-03-01T09:58:00")
        .set("Start", "Unknown")
        .set("End", "Unknown")
        .set("Timelimit", "02:00:00")
        .set("Elapsed", "00:00:00")
        .set("TotalCPU", "00:00:00")
        .set("UserCPU", "00:00:00")
        .set("SystemCPU", "00:00:00")
        .set("ReqMem", "16G")
        .set("ExitCode", "0:0")
}

/// A job currently executing, owned by `user`.
pub fn running_job(job_id: &str, user: &str) -> SacctRow {
    SacctRow::new(job_id)
        .set("JobName", "sim")
        .set("User", user)
        .set("Partition", "compute")
        .set("NodeList", "node03")
        .set("NCPUS", "4")
        .set("State", "RUNNING")
        .set("Submit", "2024-03-01T09:58:00")
        .set("Start", "2024-03-01T10:00:00")
        .set("End", "Unknown")
        .set("Timelimit", "UNLIMITED")
        .set("Elapsed", "00:05:00")
        .set("TotalCPU", "00:00:00")
        .set("ReqMem", "4000Mc")
        .set("ExitCode", "0:0")
}

/// Live statistics line for a running step.
pub fn live_statistics(max_rss: &str, node: &str) -> SacctRow {
    SacctRow::default()
        .set("MaxRSS", max_rss)
        .set("MaxRSSNode", node)
        .set("MaxDiskWrite", "10M")
        .set("MaxDiskWriteNode", node)
        .set("MaxDiskRead", "20M")
        .set("MaxDiskReadNode", node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_schema_aligned() {
        let schema = default_schema();
        let line = finished_job("4711").render(&schema);
        assert_eq!(line.split('|').count(), schema.len());
        assert!(line.starts_with("4711|train|alice|"));
    }

    #[test]
    fn test_render_runtime_has_trailing_delimiter() {
        let schema = default_schema();
        let line = live_statistics("1G", "node03").render_runtime(&schema);
        assert_eq!(line, "1G|node03|10M|node03|20M|node03|");
    }
}
