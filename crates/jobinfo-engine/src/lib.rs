//! Reconciliation engine for jobinfo.
//!
//! Raw scheduler output flows through four stages, all driven by the same
//! field table:
//!
//! - [`schema`]: the ordered field catalogue, narrowed once per run to the
//!   detected scheduler version
//! - [`parser`]: one delimited line into a positionally aligned [`Record`]
//! - [`merge`]: many records into one [`CanonicalRecord`]
//! - [`presenter`]: the canonical record into labelled report lines

pub mod error;
pub mod format;
pub mod merge;
pub mod parser;
pub mod presenter;
pub mod record;
pub mod schema;

pub use error::{Error, Result};
pub use merge::{Reconciler, fold_records, merge_records, merge_values};
pub use parser::{LineFormat, is_bookkeeping_step, parse_line, parse_runtime_line};
pub use presenter::{Presenter, Report, ReportLine};
pub use record::{CanonicalRecord, QueueSupplement, Record};
pub use schema::{FIELDS, FieldSpec, FormatRule, MergeRule, Schema, Visibility};
