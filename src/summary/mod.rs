//! Summarizers that turn one tool's harvested output into a [`Definition`] fragment.
//!
//! - [`described`] — registry/package metadata, dispatching per package type to [`ecosystem`].
//! - [`scancode`] — ScanCode license scans, bucketed by [`facets`].
//! - [`merge`] — path-keyed merging of file lists shared by both.

pub mod described;
pub mod ecosystem;
pub mod facets;
pub mod merge;
pub mod scancode;

use serde_json::Value;

use crate::error::Result;
use crate::models::{Coordinates, Definition, Facets};

/// The tool that produced a harvested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ClearlyDefined,
    ScanCode,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::ClearlyDefined => write!(f, "clearlydefined"),
            Tool::ScanCode => write!(f, "scancode"),
        }
    }
}

/// Run the summarizer for `tool`. `facets` is only consulted for scan output;
/// `None` asks the scan summarizer for an empty fragment.
pub fn summarize(
    tool: Tool,
    coordinates: &Coordinates,
    data: &Value,
    facets: Option<&Facets>,
) -> Result<Definition> {
    match tool {
        Tool::ClearlyDefined => Ok(described::ClearlyDescribedSummarizer::new().summarize(coordinates, data)),
        Tool::ScanCode => scancode::ScanCodeSummarizer::new().summarize(coordinates, data, facets),
    }
}

/// Non-blank string value, if `value` holds one.
pub(crate) fn text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Elements of an array value; empty for anything else.
pub(crate) fn items(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A value that may be given either as a single item or as a list of items.
pub(crate) fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
