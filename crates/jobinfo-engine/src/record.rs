use crate::schema::{FieldSpec, Schema, field};
use jobinfo_types::{JobDate, Value};

/// Typed values positionally aligned to a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<Value>);

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Record(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

/// Pending-job details from the queue-state source.
///
/// Kept outside the schema: only one source reports them and only for
/// pending jobs, so there is nothing to merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSupplement {
    pub dependencies: String,
    pub pending_reason: String,
}

/// The reconciled view of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    schema: Schema,
    record: Record,
    supplement: QueueSupplement,
}

impl CanonicalRecord {
    pub fn new(schema: Schema, record: Record, supplement: QueueSupplement) -> Self {
        debug_assert_eq!(schema.len(), record.len());
        Self {
            schema,
            record,
            supplement,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn supplement(&self) -> &QueueSupplement {
        &self.supplement
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .position(name)
            .and_then(|idx| self.record.get(idx))
    }

    /// Fields paired with their values, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, &Value)> + '_ {
        self.schema
            .fields()
            .iter()
            .copied()
            .zip(self.record.values())
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(Value::as_text).unwrap_or_default()
    }

    pub fn date(&self, name: &str) -> JobDate {
        self.get(name)
            .and_then(Value::as_date)
            .unwrap_or(JobDate::Unknown)
    }

    pub fn start(&self) -> JobDate {
        self.date(field::START)
    }

    pub fn end(&self) -> JobDate {
        self.date(field::END)
    }

    pub fn user(&self) -> &str {
        self.text(field::USER)
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.get(field::STATE)
            .and_then(Value::as_flags)
            .is_some_and(|flags| flags.contains(state))
    }
}
