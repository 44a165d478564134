use crate::record::Record;
use jobinfo_types::{SchedulerVersion, ValueKind};

/// Names of fields other parts of the engine look up directly.
/// These fields carry no version bounds, so every gated schema has them.
pub mod field {
    pub const JOB_ID: &str = "JobID";
    pub const USER: &str = "User";
    pub const STATE: &str = "State";
    pub const START: &str = "Start";
    pub const END: &str = "End";
    pub const TOTAL_CPU: &str = "TotalCPU";
}

/// How two values of the same field from different records combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Static per job; the first non-empty value wins
    KeepFirst,
    /// Larger value wins, sentinels are ordered so that this is sentinel-aware
    Max,
    /// Smaller value wins
    Min,
    /// Set union
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
    Verbose,
}

/// Display rule. Some rules read other fields of the canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    Plain,
    Date,
    /// `[D-]HH:MM:SS`, right-aligned across all duration fields
    Duration,
    /// Share of the `TotalCPU` duration, in percent
    CpuShare,
    /// Memory request with the per-core / per-node suffix spelled out
    Memory,
    /// Byte count followed by the node list held in the named field
    Bytes { nodes: &'static str },
    State,
    ExitCode,
}

/// One reportable attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column key understood by the accounting and live-statistics tools
    pub name: &'static str,
    pub kind: ValueKind,
    pub merge: MergeRule,
    pub visibility: Visibility,
    /// Live statistics are fresher than accounting for this field
    pub prefer_runtime: bool,
    pub format: FormatRule,
    pub label: &'static str,
    pub since: Option<SchedulerVersion>,
    pub until: Option<SchedulerVersion>,
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        kind: ValueKind,
        merge: MergeRule,
        visibility: Visibility,
        label: &'static str,
        format: FormatRule,
    ) -> Self {
        Self {
            name,
            kind,
            merge,
            visibility,
            prefer_runtime: false,
            format,
            label,
            since: None,
            until: None,
        }
    }

    const fn hidden(name: &'static str, kind: ValueKind, merge: MergeRule) -> Self {
        Self::new(name, kind, merge, Visibility::Hidden, "", FormatRule::Plain)
    }

    const fn runtime(mut self) -> Self {
        self.prefer_runtime = true;
        self
    }

    const fn since(mut self, major: u32, minor: u32) -> Self {
        self.since = Some(SchedulerVersion::new(major, minor));
        self
    }

    const fn until(mut self, major: u32, minor: u32) -> Self {
        self.until = Some(SchedulerVersion::new(major, minor));
        self
    }

    /// Inclusive on both ends; a missing bound does not constrain.
    pub fn is_available(&self, version: SchedulerVersion) -> bool {
        self.since.is_none_or(|lo| lo <= version) && self.until.is_none_or(|hi| version <= hi)
    }

    pub fn is_visible(&self, verbose: bool) -> bool {
        match self.visibility {
            Visibility::Hidden => false,
            Visibility::Shown => true,
            Visibility::Verbose => verbose,
        }
    }
}

use FormatRule as F;
use MergeRule as M;
use ValueKind as K;
use Visibility as V;

/// Every field jobinfo knows about, in column and presentation order.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec::hidden(field::JOB_ID, K::Text, M::KeepFirst),
    FieldSpec::new("JobName", K::Text, M::KeepFirst, V::Shown, "Name", F::Plain),
    FieldSpec::new(field::USER, K::Text, M::KeepFirst, V::Shown, "User", F::Plain),
    FieldSpec::new("Account", K::Text, M::KeepFirst, V::Verbose, "Account", F::Plain),
    FieldSpec::new("Partition", K::Text, M::KeepFirst, V::Shown, "Partition", F::Plain),
    FieldSpec::new("NodeList", K::Text, M::KeepFirst, V::Shown, "Nodes", F::Plain),
    FieldSpec::new("NNodes", K::Count, M::Max, V::Verbose, "Node count", F::Plain),
    FieldSpec::new("NCPUS", K::Count, M::Max, V::Shown, "Cores", F::Plain),
    // sacct dropped the GRES columns in favour of TRES in 19.05
    FieldSpec::new("ReqGRES", K::Text, M::KeepFirst, V::Shown, "Reserved GRES", F::Plain)
        .until(18, 8),
    FieldSpec::new("ReqTRES", K::Text, M::KeepFirst, V::Shown, "Reserved TRES", F::Plain)
        .since(19, 5),
    FieldSpec::new(field::STATE, K::Flags, M::Union, V::Shown, "State", F::State),
    FieldSpec::new("Submit", K::Date, M::KeepFirst, V::Verbose, "Submit", F::Date),
    FieldSpec::new(field::START, K::Date, M::Min, V::Shown, "Start", F::Date),
    FieldSpec::new(field::END, K::Date, M::Max, V::Shown, "End", F::Date),
    FieldSpec::new("Timelimit", K::Span, M::Max, V::Shown, "Reserved walltime", F::Duration),
    FieldSpec::new("Elapsed", K::Span, M::Max, V::Shown, "Used walltime", F::Duration),
    FieldSpec::new(field::TOTAL_CPU, K::Span, M::Max, V::Shown, "Used CPU time", F::Duration),
    FieldSpec::new("UserCPU", K::Span, M::Max, V::Shown, "% User (Computation)", F::CpuShare),
    FieldSpec::new("SystemCPU", K::Span, M::Max, V::Shown, "% System (I/O)", F::CpuShare),
    FieldSpec::new("ReqMem", K::Text, M::KeepFirst, V::Shown, "Mem reserved", F::Memory),
    FieldSpec::new(
        "MaxRSS",
        K::Bytes,
        M::Max,
        V::Shown,
        "Max Mem used",
        F::Bytes { nodes: "MaxRSSNode" },
    )
    .runtime(),
    FieldSpec::hidden("MaxRSSNode", K::Flags, M::Union).runtime(),
    FieldSpec::new(
        "MaxDiskWrite",
        K::Bytes,
        M::Max,
        V::Shown,
        "Max Disk Write",
        F::Bytes { nodes: "MaxDiskWriteNode" },
    )
    .runtime(),
    FieldSpec::hidden("MaxDiskWriteNode", K::Flags, M::Union).runtime(),
    FieldSpec::new(
        "MaxDiskRead",
        K::Bytes,
        M::Max,
        V::Shown,
        "Max Disk Read",
        F::Bytes { nodes: "MaxDiskReadNode" },
    )
    .runtime(),
    FieldSpec::hidden("MaxDiskReadNode", K::Flags, M::Union).runtime(),
    FieldSpec::new("WorkDir", K::Text, M::KeepFirst, V::Verbose, "Working directory", F::Plain)
        .since(17, 11),
    FieldSpec::new("Comment", K::Text, M::KeepFirst, V::Verbose, "Comment", F::Plain),
    FieldSpec::new("ExitCode", K::Text, M::KeepFirst, V::Shown, "Exit code", F::ExitCode),
];

/// The field catalogue narrowed to one scheduler version.
///
/// Built once per run. Its order fixes the columns requested from the
/// scheduler tools, the positional layout of every [`Record`] and the
/// presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    version: SchedulerVersion,
    fields: Vec<&'static FieldSpec>,
}

impl Schema {
    pub fn for_version(version: SchedulerVersion) -> Self {
        Self::from_catalogue(FIELDS, version)
    }

    pub fn from_catalogue(catalogue: &'static [FieldSpec], version: SchedulerVersion) -> Self {
        Self {
            version,
            fields: catalogue
                .iter()
                .filter(|f| f.is_available(version))
                .collect(),
        }
    }

    pub fn version(&self) -> SchedulerVersion {
        self.version
    }

    pub fn fields(&self) -> &[&'static FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Positions of the fields the live-statistics source reports, in order.
    pub fn runtime_positions(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.prefer_runtime)
            .map(|(i, _)| i)
            .collect()
    }

    /// Comma-separated column list for the accounting source.
    pub fn format_list(&self) -> String {
        self.join_names(|_| true)
    }

    /// Comma-separated column list for the live-statistics source.
    pub fn runtime_format_list(&self) -> String {
        self.join_names(|f| f.prefer_runtime)
    }

    fn join_names(&self, keep: impl Fn(&FieldSpec) -> bool) -> String {
        self.fields
            .iter()
            .filter(|f| keep(f))
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// A record holding every field's declared empty value.
    pub fn empty_record(&self) -> Record {
        Record::new(self.fields.iter().map(|f| f.kind.empty()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u32, minor: u32) -> SchedulerVersion {
        SchedulerVersion::new(major, minor)
    }

    #[test]
    fn test_is_available_respects_inclusive_bounds() {
        let spec = FieldSpec::hidden("X", K::Text, M::KeepFirst).since(17, 11).until(20, 2);
        assert!(!spec.is_available(v(17, 2)));
        assert!(spec.is_available(v(17, 11)));
        assert!(spec.is_available(v(19, 5)));
        assert!(spec.is_available(v(20, 2)));
        assert!(!spec.is_available(v(20, 11)));
    }

    #[test]
    fn test_is_available_matches_bounds_for_all_versions() {
        for field in FIELDS {
            for major in 14..=26 {
                for minor in [2, 5, 8, 11] {
                    let version = v(major, minor);
                    let expected = field.since.is_none_or(|lo| lo <= version)
                        && field.until.is_none_or(|hi| version <= hi);
                    let gated = Schema::for_version(version);
                    assert_eq!(
                        gated.position(field.name).is_some(),
                        expected,
                        "{} at {}",
                        field.name,
                        version
                    );
                }
            }
        }
    }

    #[test]
    fn test_gres_and_tres_never_overlap() {
        let old = Schema::for_version(v(18, 8));
        assert!(old.position("ReqGRES").is_some());
        assert!(old.position("ReqTRES").is_none());

        let new = Schema::for_version(v(23, 2));
        assert!(new.position("ReqGRES").is_none());
        assert!(new.position("ReqTRES").is_some());
        assert!(new.position("WorkDir").is_some());

        let ancient = Schema::for_version(v(17, 2));
        assert!(ancient.position("WorkDir").is_none());
    }

    #[test]
    fn test_gating_preserves_catalogue_order() {
        let schema = Schema::for_version(v(23, 2));
        let catalogue_order: Vec<&str> = FIELDS
            .iter()
            .map(|f| f.name)
            .filter(|name| schema.position(name).is_some())
            .collect();
        let schema_order: Vec<&str> = schema.fields().iter().map(|f| f.name).collect();
        assert_eq!(catalogue_order, schema_order);
        assert_eq!(schema.format_list().split(',').count(), schema.len());
    }

    #[test]
    fn test_lookup_fields_are_never_gated() {
        for name in [
            field::JOB_ID,
            field::USER,
            field::STATE,
            field::START,
            field::END,
            field::TOTAL_CPU,
        ] {
            let spec = FIELDS.iter().find(|f| f.name == name).unwrap();
            assert!(spec.since.is_none() && spec.until.is_none(), "{}", name);
        }
        for spec in FIELDS {
            if let FormatRule::Bytes { nodes } = spec.format {
                let node_spec = FIELDS.iter().find(|f| f.name == nodes).unwrap();
                assert_eq!(node_spec.kind, K::Flags);
                assert_eq!(node_spec.prefer_runtime, spec.prefer_runtime);
            }
        }
    }

    #[test]
    fn test_merge_rules_fit_value_kinds() {
        for spec in FIELDS {
            let ok = match spec.merge {
                M::KeepFirst => true,
                M::Union => spec.kind == K::Flags,
                M::Max | M::Min => matches!(spec.kind, K::Count | K::Bytes | K::Span | K::Date),
            };
            assert!(ok, "{} has {:?} merge on {:?}", spec.name, spec.merge, spec.kind);
        }
    }

    #[test]
    fn test_hidden_fields_have_no_label() {
        for spec in FIELDS {
            assert_eq!(
                spec.visibility == V::Hidden,
                spec.label.is_empty(),
                "{}",
                spec.name
            );
        }
    }

    #[test]
    fn test_runtime_format_list() {
        let schema = Schema::for_version(v(23, 2));
        assert_eq!(
            schema.runtime_format_list(),
            "MaxRSS,MaxRSSNode,MaxDiskWrite,MaxDiskWriteNode,MaxDiskRead,MaxDiskReadNode"
        );
        assert_eq!(schema.runtime_positions().len(), 6);
    }
}
