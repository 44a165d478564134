use crate::record::Record;
use crate::schema::{Schema, field};
use crate::{Error, Result};

/// Steps named `<job>.extern` are spawned by the scheduler for process
/// tracking. They are always reported as cancelled and carry no usage data.
pub const BOOKKEEPING_STEP_SUFFIX: &str = ".extern";

/// Column layout of one source's output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    pub delimiter: char,
    /// Every column, including the last, is followed by the delimiter
    pub trailing_delimiter: bool,
}

impl LineFormat {
    /// `sacct --parsable2`
    pub const ACCOUNTING: LineFormat = LineFormat {
        delimiter: '|',
        trailing_delimiter: false,
    };

    /// `sstat --parsable`
    pub const LIVE_STATISTICS: LineFormat = LineFormat {
        delimiter: '|',
        trailing_delimiter: true,
    };

    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let line = line.trim_end_matches(['\r', '\n']);
        let line = if self.trailing_delimiter {
            line.strip_suffix(self.delimiter).unwrap_or(line)
        } else {
            line
        };
        line.split(self.delimiter).collect()
    }
}

fn check_columns(expected: usize, columns: &[&str]) -> Result<()> {
    if columns.len() != expected {
        return Err(Error::ColumnCount {
            expected,
            found: columns.len(),
        });
    }
    Ok(())
}

/// Parse a full-width line: one column per schema field, in schema order.
pub fn parse_line(schema: &Schema, line: &str, format: LineFormat) -> Result<Record> {
    let columns = format.split(line);
    check_columns(schema.len(), &columns)?;

    Ok(Record::new(
        schema
            .fields()
            .iter()
            .zip(columns)
            .map(|(spec, raw)| spec.kind.parse(Some(raw)))
            .collect(),
    ))
}

/// Parse a sparse line holding only the runtime-preferred fields.
///
/// Every other field is filled with its declared empty value so the result
/// has the same shape as an accounting record.
pub fn parse_runtime_line(schema: &Schema, line: &str, format: LineFormat) -> Result<Record> {
    let positions = schema.runtime_positions();
    let columns = format.split(line);
    check_columns(positions.len(), &columns)?;

    let mut raw: Vec<Option<&str>> = vec![None; schema.len()];
    for (pos, column) in positions.into_iter().zip(columns) {
        raw[pos] = Some(column);
    }

    Ok(Record::new(
        schema
            .fields()
            .iter()
            .zip(raw)
            .map(|(spec, raw)| spec.kind.parse(raw))
            .collect(),
    ))
}

/// True when a full-width line describes a bookkeeping step that must be
/// dropped before parsing.
pub fn is_bookkeeping_step(schema: &Schema, line: &str, format: LineFormat) -> bool {
    let Some(idx) = schema.position(field::JOB_ID) else {
        return false;
    };
    format
        .split(line)
        .get(idx)
        .is_some_and(|id| id.trim().ends_with(BOOKKEEPING_STEP_SUFFIX))
}
