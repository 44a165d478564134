use crate::{Config, Error, Identity, Result};
use jobinfo_engine::{CanonicalRecord, Reconciler, Schema};
use jobinfo_providers::Scheduler;
use jobinfo_types::JobId;

const RUNNING: &str = "RUNNING";
const PENDING: &str = "PENDING";

/// Sequences the scheduler queries for one job and reconciles the results.
///
/// The order is fixed: version probe, accounting, then live statistics
/// (running jobs the caller may inspect) and queue state (pending jobs).
pub struct ReportService {
    scheduler: Scheduler,
    identity: Identity,
}

impl ReportService {
    pub fn new(scheduler: Scheduler, identity: Identity) -> Self {
        Self {
            scheduler,
            identity,
        }
    }

    /// Service running the configured scheduler tools as the current user.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Scheduler::system(config.commands.clone()),
            Identity::current(config),
        )
    }

    pub fn fetch(&self, job: &JobId) -> Result<CanonicalRecord> {
        let version = self.scheduler.version()?;
        let schema = Schema::for_version(version);
        tracing::debug!(%version, fields = schema.len(), "selected field schema");

        let records = self.scheduler.accounting(job, &schema)?;
        tracing::debug!(count = records.len(), "accounting records");
        let reconciler = Reconciler::from_accounting(schema.clone(), records)
            .ok_or_else(|| Error::JobNotFound(job.clone()))?;
        let view = reconciler.accounting_view();

        let reconciler = if !view.has_state(RUNNING) {
            reconciler
        } else if self.identity.may_inspect(view.user()) {
            reconciler.with_live_statistics(self.scheduler.live_statistics(job, &schema))
        } else {
            tracing::debug!(
                caller = self.identity.name(),
                owner = view.user(),
                "skipping live statistics for another user's job"
            );
            reconciler
        };

        let reconciler = if view.has_state(PENDING) {
            reconciler.with_queue_state(self.scheduler.queue_state(job))
        } else {
            reconciler
        };

        Ok(reconciler.finish())
    }
}
