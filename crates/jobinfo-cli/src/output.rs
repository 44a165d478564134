use crate::types::OutputFormat;
use anyhow::Result;
use jobinfo_engine::{CanonicalRecord, Report, ReportLine};
use jobinfo_types::JobId;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    job_id: &'a JobId,
    scheduler_version: String,
    fields: &'a [ReportLine],
}

/// Render a presented report in the requested format, newline-terminated.
pub fn render(
    format: OutputFormat,
    job: &JobId,
    record: &CanonicalRecord,
    report: &Report,
    label_width: usize,
) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(report.render_plain(label_width)),
        OutputFormat::Json => {
            let json = JsonReport {
                job_id: job,
                scheduler_version: record.schema().version().to_string(),
                fields: &report.fields,
            };
            let mut text = serde_json::to_string_pretty(&json)?;
            text.push('\n');
            Ok(text)
        }
    }
}
