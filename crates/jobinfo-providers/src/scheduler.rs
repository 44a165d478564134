use crate::traits::CommandRunner;
use crate::{Result, query_sacct, query_squeue, query_sstat, query_version};
use jobinfo_engine::{QueueSupplement, Record, Schema};
use jobinfo_types::{JobId, SchedulerVersion};
use serde::{Deserialize, Serialize};

/// Program names (or paths) of the scheduler tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Programs {
    pub sacct: String,
    pub sstat: String,
    pub squeue: String,
    pub sinfo: String,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            sacct: "sacct".to_string(),
            sstat: "sstat".to_string(),
            squeue: "squeue".to_string(),
            sinfo: "sinfo".to_string(),
        }
    }
}

/// Adapter that bundles a command runner with the four data sources
pub struct Scheduler {
    runner: Box<dyn CommandRunner>,
    programs: Programs,
}

impl Scheduler {
    pub fn new(runner: Box<dyn CommandRunner>, programs: Programs) -> Self {
        Self { runner, programs }
    }

    /// Scheduler backed by real child processes
    pub fn system(programs: Programs) -> Self {
        Self::new(Box::new(crate::SystemRunner), programs)
    }

    pub fn programs(&self) -> &Programs {
        &self.programs
    }

    pub fn version(&self) -> Result<SchedulerVersion> {
        query_version(self.runner.as_ref(), &self.programs.sinfo)
    }

    pub fn accounting(&self, job: &JobId, schema: &Schema) -> Result<Vec<Record>> {
        query_sacct(self.runner.as_ref(), &self.programs.sacct, job, schema)
    }

    pub fn live_statistics(&self, job: &JobId, schema: &Schema) -> Option<Record> {
        query_sstat(self.runner.as_ref(), &self.programs.sstat, job, schema)
    }

    pub fn queue_state(&self, job: &JobId) -> Option<QueueSupplement> {
        query_squeue(self.runner.as_ref(), &self.programs.squeue, job)
    }
}
