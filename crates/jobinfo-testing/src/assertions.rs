//! Custom assertions for jobinfo report validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Plain report line lookup
//! - JSON report field checks
//! - Scheduler command order

use anyhow::{Context, Result};
use serde_json::Value;

/// Value printed after `label` in a plain report, if the line exists.
pub fn report_value<'a>(stdout: &'a str, label: &str) -> Option<&'a str> {
    stdout.lines().find_map(|line| {
        let (head, value) = line.split_once(": ")?;
        (head.trim_end() == label).then_some(value)
    })
}

/// Assert that a plain report prints `expected` for `label`.
pub fn assert_report_line(stdout: &str, label: &str, expected: &str) -> Result<()> {
    let value = report_value(stdout, label)
        .with_context(|| format!("Expected a '{}' line in report:\n{}", label, stdout))?;

    if value != expected {
        anyhow::bail!("Expected {} to be {:?}, got {:?}", label, expected, value);
    }

    Ok(())
}

/// Assert that a plain report has no line for `label`.
pub fn assert_report_lacks(stdout: &str, label: &str) -> Result<()> {
    if let Some(value) = report_value(stdout, label) {
        anyhow::bail!("Expected no '{}' line, found value {:?}", label, value);
    }

    Ok(())
}

/// Assert that a JSON report carries `expected` for the field `name`.
pub fn assert_json_field(json: &Value, name: &str, expected: &str) -> Result<()> {
    let fields = json["fields"]
        .as_array()
        .context("Expected 'fields' array in JSON")?;

    let field = fields
        .iter()
        .find(|f| f["name"] == name)
        .with_context(|| format!("Field {} missing from JSON report", name))?;

    let value = field["value"]
        .as_str()
        .with_context(|| format!("Field {} has no string value", name))?;

    if value != expected {
        anyhow::bail!("Expected {} to be {:?}, got {:?}", name, expected, value);
    }

    Ok(())
}

/// Assert that exactly these scheduler commands ran, in this order.
pub fn assert_programs_called(actual: &[String], expected: &[&str]) -> Result<()> {
    if actual != expected {
        anyhow::bail!("Expected calls {:?}, got {:?}", expected, actual);
    }

    Ok(())
}
