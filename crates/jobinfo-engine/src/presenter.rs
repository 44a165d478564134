use crate::format::format_field;
use crate::record::CanonicalRecord;
use serde::Serialize;

/// One visible field, formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub fields: Vec<ReportLine>,
}

impl Report {
    /// `label: value` lines with the label left-justified to `label_width`.
    pub fn render_plain(&self, label_width: usize) -> String {
        let mut out = String::new();
        for line in &self.fields {
            out.push_str(&format!(
                "{:<width$}: {}\n",
                line.label,
                line.value,
                width = label_width
            ));
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|line| line.name == name)
            .map(|line| line.value.as_str())
    }
}

/// Turns a canonical record into report lines, in schema order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    verbose: bool,
}

impl Presenter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn present(&self, record: &CanonicalRecord) -> Report {
        let fields = record
            .iter()
            .filter(|(spec, _)| spec.is_visible(self.verbose))
            .map(|(spec, value)| ReportLine {
                name: spec.name,
                label: spec.label,
                value: format_field(spec, value, record),
            })
            .collect();
        Report { fields }
    }
}
