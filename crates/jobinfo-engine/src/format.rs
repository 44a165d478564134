//! Per-field display rules.
//!
//! Formatters receive the whole canonical record because several of them
//! depend on other fields: durations align to the widest duration, byte
//! counts append a node list, and anything time related checks whether the
//! job has started or finished.

use crate::record::CanonicalRecord;
use crate::schema::{FieldSpec, FormatRule, field};
use jobinfo_types::{ByteCount, TimeSpan, Value};
use std::collections::BTreeSet;

/// Shown instead of a value that would be misleading or meaningless.
pub const PLACEHOLDER: &str = "--";

const COMPLETED: &str = "COMPLETED";

pub fn format_field(spec: &FieldSpec, value: &Value, record: &CanonicalRecord) -> String {
    match (spec.format, value) {
        (FormatRule::Duration, Value::Span(span)) => duration(*span, record),
        (FormatRule::CpuShare, Value::Span(span)) => cpu_share(*span, record),
        (FormatRule::Memory, Value::Text(request)) => memory_request(request),
        (FormatRule::Bytes { nodes }, Value::Bytes(bytes)) => byte_count(*bytes, nodes, record),
        (FormatRule::State, Value::Flags(flags)) => state(flags, record),
        (FormatRule::ExitCode, value) => exit_code(value, record),
        // Plain and Date rely on the value's own Display
        (_, value) => value.to_string(),
    }
}

/// Width of the widest `[D-]HH:MM:SS` among the record's duration fields.
pub fn duration_width(record: &CanonicalRecord) -> usize {
    record
        .iter()
        .filter(|(spec, _)| spec.format == FormatRule::Duration)
        .filter_map(|(_, value)| value.as_span().and_then(TimeSpan::seconds))
        .map(|secs| TimeSpan::clock(secs).len())
        .max()
        .unwrap_or(0)
}

fn duration(span: TimeSpan, record: &CanonicalRecord) -> String {
    match span {
        TimeSpan::Unlimited => span.to_string(),
        TimeSpan::Invalid => PLACEHOLDER.to_string(),
        // A job that never started has not run for zero seconds
        TimeSpan::Finite(0) if record.start().is_unknown() => PLACEHOLDER.to_string(),
        TimeSpan::Finite(secs) => {
            let width = duration_width(record);
            format!("{:>width$}", TimeSpan::clock(secs), width = width)
        }
    }
}

fn cpu_share(span: TimeSpan, record: &CanonicalRecord) -> String {
    let total = record
        .get(field::TOTAL_CPU)
        .and_then(Value::as_span)
        .and_then(TimeSpan::seconds)
        .unwrap_or(0);
    if total == 0 {
        return PLACEHOLDER.to_string();
    }
    let part = span.seconds().unwrap_or(0);
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

fn memory_request(request: &str) -> String {
    if let Some(amount) = request.strip_suffix('c') {
        format!("{}/core", amount)
    } else if let Some(amount) = request.strip_suffix('n') {
        format!("{}/node", amount)
    } else {
        request.to_string()
    }
}

fn byte_count(bytes: ByteCount, nodes_field: &str, record: &CanonicalRecord) -> String {
    let Some(size) = bytes.humanize() else {
        return PLACEHOLDER.to_string();
    };
    let nodes: Vec<&str> = record
        .get(nodes_field)
        .and_then(Value::as_flags)
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .collect();

    if nodes.is_empty() {
        size
    } else {
        format!("{} ({})", size, nodes.join(","))
    }
}

fn state(flags: &BTreeSet<String>, record: &CanonicalRecord) -> String {
    let mut shown: Vec<&str> = flags.iter().map(String::as_str).collect();
    // A job with another concurrent state is not meaningfully completed
    if shown.len() > 1 {
        shown.retain(|f| !f.is_empty() && *f != COMPLETED);
    }

    let mut out = shown.join(",");
    let supplement = record.supplement();
    if !supplement.pending_reason.is_empty() {
        out.push_str(&format!(" ({})", supplement.pending_reason));
    }
    if !supplement.dependencies.is_empty() {
        out.push_str(&format!(" ({})", supplement.dependencies));
    }
    out
}

fn exit_code(value: &Value, record: &CanonicalRecord) -> String {
    if record.end().is_unknown() {
        return PLACEHOLDER.to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::Reconciler;
    use crate::parser::{LineFormat, parse_line};
    use crate::record::QueueSupplement;
    use crate::schema::Schema;
    use jobinfo_types::SchedulerVersion;

    fn record(values: &[(&str, &str)]) -> CanonicalRecord {
        record_with(values, None)
    }

    fn record_with(values: &[(&str, &str)], queue: Option<QueueSupplement>) -> CanonicalRecord {
        let schema = Schema::for_version(SchedulerVersion::new(23, 2));
        let raw = schema
            .fields()
            .iter()
            .map(|f| {
                values
                    .iter()
                    .find(|(name, _)| *name == f.name)
                    .map_or("", |(_, v)| *v)
            })
            .collect::<Vec<_>>()
            .join("|");
        let parsed = parse_line(&schema, &raw, LineFormat::ACCOUNTING).unwrap();
        Reconciler::from_accounting(schema, [parsed])
            .unwrap()
            .with_queue_state(queue)
            .finish()
    }

    fn show(record: &CanonicalRecord, name: &str) -> String {
        let (spec, value) = record.iter().find(|(spec, _)| spec.name == name).unwrap();
        format_field(spec, value, record)
    }

    #[test]
    fn test_byte_count_with_nodes() {
        let r = record(&[
            ("MaxRSS", "1G"),
            ("MaxRSSNode", "node01"),
            ("MaxDiskRead", "0"),
            ("MaxDiskWrite", "16?"),
        ]);
        assert_eq!(show(&r, "MaxRSS"), "1.00G (node01)");
        assert_eq!(show(&r, "MaxDiskRead"), "0.00K");
        assert_eq!(show(&r, "MaxDiskWrite"), PLACEHOLDER);
    }

    #[test]
    fn test_duration_aligns_to_widest() {
        let r = record(&[
            ("Start", "2024-03-01T10:00:00"),
            ("Timelimit", "1-01:01:01"),
            ("Elapsed", "00:10:00"),
            ("TotalCPU", "02:00.500"),
        ]);
        assert_eq!(show(&r, "Timelimit"), "1-01:01:01");
        assert_eq!(show(&r, "Elapsed"), "  00:10:00");
        assert_eq!(show(&r, "TotalCPU"), "  00:02:00");
    }

    #[test]
    fn test_duration_placeholder_when_never_started() {
        let pending = record(&[
            ("Start", "Unknown"),
            ("Timelimit", "UNLIMITED"),
            ("Elapsed", "00:00:00"),
        ]);
        assert_eq!(show(&pending, "Elapsed"), PLACEHOLDER);
        assert_eq!(show(&pending, "Timelimit"), "UNLIMITED");
        assert_eq!(show(&pending, "TotalCPU"), PLACEHOLDER);

        let started = record(&[("Start", "2024-03-01T10:00:00"), ("Elapsed", "00:00:00")]);
        assert_eq!(show(&started, "Elapsed"), "00:00:00");
    }

    #[test]
    fn test_cpu_share() {
        let r = record(&[
            ("TotalCPU", "00:10:00"),
            ("UserCPU", "00:07:30"),
            ("SystemCPU", "00:00:00"),
        ]);
        assert_eq!(show(&r, "UserCPU"), "75.0%");
        assert_eq!(show(&r, "SystemCPU"), "0.0%");

        let idle = record(&[("TotalCPU", "00:00:00"), ("UserCPU", "00:00:00")]);
        assert_eq!(show(&idle, "UserCPU"), PLACEHOLDER);
    }

    #[test]
    fn test_memory_request_suffix() {
        assert_eq!(memory_request("4000Mc"), "4000M/core");
        assert_eq!(memory_request("64Gn"), "64G/node");
        assert_eq!(memory_request("16G"), "16G");
    }

    #[test]
    fn test_state_suppresses_completed_only_with_company() {
        let mixed = record_with(&[("State", "COMPLETED,CANCELLED")], None);
        assert_eq!(show(&mixed, "State"), "CANCELLED");

        let done = record(&[("State", "COMPLETED")]);
        assert_eq!(show(&done, "State"), "COMPLETED");

        let failed_with_blank = record(&[("State", "FAILED,")]);
        assert_eq!(show(&failed_with_blank, "State"), "FAILED");
    }

    #[test]
    fn test_state_drops_blank_and_completed_together() {
        let with_blank = record(&[("State", "COMPLETED,")]);
        assert_eq!(show(&with_blank, "State"), "");

        let blank_only = record(&[("State", "")]);
        assert_eq!(show(&blank_only, "State"), "");
    }

    #[test]
    fn test_state_appends_reason_and_dependency() {
        let pending = record_with(
            &[("State", "PENDING")],
            Some(QueueSupplement {
                dependencies: "afterok:123".into(),
                pending_reason: "Resources".into(),
            }),
        );
        assert_eq!(show(&pending, "State"), "PENDING (Resources) (afterok:123)");
    }

    #[test]
    fn test_exit_code_hidden_until_finished() {
        let running = record(&[("End", "Unknown"), ("ExitCode", "0:0")]);
        assert_eq!(show(&running, "ExitCode"), PLACEHOLDER);

        let finished = record(&[("End", "2024-03-01T11:00:00"), ("ExitCode", "1:0")]);
        assert_eq!(show(&finished, "ExitCode"), "1:0");
    }

    #[test]
    fn test_dates() {
        let r = record(&[("Start", "2024-03-01T10:00:00"), ("End", "Unknown")]);
        assert_eq!(show(&r, "Start"), "2024-03-01T10:00:00");
        assert_eq!(show(&r, "End"), "Unknown");
    }
}
