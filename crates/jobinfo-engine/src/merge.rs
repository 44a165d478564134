use crate::record::{CanonicalRecord, QueueSupplement, Record};
use crate::schema::{MergeRule, Schema};
use jobinfo_types::Value;
use std::cmp::Ordering;

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Count(x), Value::Count(y)) => Some(x.cmp(y)),
        (Value::Bytes(x), Value::Bytes(y)) => Some(x.cmp(y)),
        (Value::Span(x), Value::Span(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Combine two values of the same field.
///
/// Values of different kinds cannot occur in aligned records; if they do,
/// the left value is kept.
pub fn merge_values(rule: MergeRule, a: Value, b: Value) -> Value {
    match rule {
        MergeRule::KeepFirst => {
            if a.is_empty() {
                b
            } else {
                a
            }
        }
        MergeRule::Union => match (a, b) {
            (Value::Flags(mut left), Value::Flags(right)) => {
                left.extend(right);
                Value::Flags(left)
            }
            (a, _) => a,
        },
        MergeRule::Max => match compare(&a, &b) {
            Some(Ordering::Less) => b,
            _ => a,
        },
        MergeRule::Min => match compare(&a, &b) {
            Some(Ordering::Greater) => b,
            _ => a,
        },
    }
}

/// Combine two aligned records field by field, in schema order.
pub fn merge_records(schema: &Schema, a: Record, b: Record) -> Record {
    Record::new(
        schema
            .fields()
            .iter()
            .zip(a.into_values().into_iter().zip(b.into_values()))
            .map(|(spec, (x, y))| merge_values(spec.merge, x, y))
            .collect(),
    )
}

/// Fold any number of aligned records left to right.
pub fn fold_records(schema: &Schema, records: impl IntoIterator<Item = Record>) -> Option<Record> {
    records
        .into_iter()
        .reduce(|acc, next| merge_records(schema, acc, next))
}

/// Builds the canonical record in the fixed source order: accounting
/// records among themselves, then live statistics, then the queue-state
/// supplement.
#[derive(Debug, Clone)]
pub struct Reconciler {
    schema: Schema,
    accounting: Record,
    live: Option<Record>,
    supplement: QueueSupplement,
}

impl Reconciler {
    /// Returns `None` when there are no accounting records, i.e. the job
    /// does not exist.
    pub fn from_accounting(
        schema: Schema,
        records: impl IntoIterator<Item = Record>,
    ) -> Option<Self> {
        let accounting = fold_records(&schema, records)?;
        Some(Self {
            schema,
            accounting,
            live: None,
            supplement: QueueSupplement::default(),
        })
    }

    /// The accounting-only view, used to decide which optional sources apply.
    pub fn accounting_view(&self) -> CanonicalRecord {
        CanonicalRecord::new(
            self.schema.clone(),
            self.accounting.clone(),
            QueueSupplement::default(),
        )
    }

    pub fn with_live_statistics(mut self, record: Option<Record>) -> Self {
        self.live = record;
        self
    }

    pub fn with_queue_state(mut self, supplement: Option<QueueSupplement>) -> Self {
        self.supplement = supplement.unwrap_or_default();
        self
    }

    pub fn finish(self) -> CanonicalRecord {
        let record = match self.live {
            Some(live) => merge_records(&self.schema, self.accounting, live),
            None => self.accounting,
        };
        CanonicalRecord::new(self.schema, record, self.supplement)
    }
}
