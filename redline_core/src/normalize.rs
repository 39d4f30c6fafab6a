//! Reduction of stored document bodies to the plain text the diff consumes.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::api::{Delta, DocumentContent};
use crate::{Error, Result};

const ITEM_BULLET: &str = "• ";

impl DocumentContent {
    /// Classify an arbitrary JSON value.
    ///
    /// `null`, `false`, zero and the empty string are empty, other strings are
    /// plain text, objects holding an `ops` array of delta operations are
    /// deltas, and everything else is kept as unknown.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        if value.get("ops").is_some_and(Value::is_array) {
            return match serde_json::from_value::<Delta>(value.clone()) {
                Ok(delta) => Self::Delta(delta),
                Err(error) => {
                    tracing::debug!(%error, "ops array is not a delta");
                    Self::Unknown(value)
                }
            };
        }

        match value {
            Value::Null | Value::Bool(false) => Self::Empty,
            Value::String(text) if text.is_empty() => Self::Empty,
            Value::String(text) => Self::Text(text),
            Value::Number(number) if is_zero(&number) => Self::Empty,
            other => Self::Unknown(other),
        }
    }

    /// Parse a JSON document and classify it with [`DocumentContent::from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Content`] when `source` is not valid JSON.
    pub fn parse_json(source: &str) -> Result<Self> {
        let value = serde_json::from_str(source).map_err(|source| Error::Content { source })?;
        Ok(Self::from_json(value))
    }
}

fn is_zero(number: &serde_json::Number) -> bool {
    number.as_u64() == Some(0) || number.as_i64() == Some(0) || number.as_f64() == Some(0.0)
}

/// Reduce document content to plain text.
#[must_use]
pub fn normalize(content: &DocumentContent) -> String {
    match content {
        DocumentContent::Empty => String::new(),
        DocumentContent::Text(text) => text.clone(),
        DocumentContent::Delta(delta) => delta_text(delta),
        DocumentContent::BbCode(markup) => bbcode_to_plain_text(markup),
        DocumentContent::Unknown(value) => unknown_text(value),
    }
}

fn delta_text(delta: &Delta) -> String {
    delta.ops.iter().filter_map(|op| op.insert_text()).collect()
}

fn unknown_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Strip BBCode markup, keeping the enclosed text and rendering list items
/// as bulleted lines.
#[must_use]
pub fn bbcode_to_plain_text(markup: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    static ITEM: OnceLock<Regex> = OnceLock::new();
    static NEWLINES: OnceLock<Regex> = OnceLock::new();

    let tag = TAG.get_or_init(|| {
        compile(r"\[/?(?:b|i|u|s|url|color|size|center|right|left|quote|code|list)(?:=[^\]]*)?\]")
    });
    let item = ITEM.get_or_init(|| compile(r"\[\*\]\s*"));
    let newlines = NEWLINES.get_or_init(|| compile(r"\n+"));

    let stripped = tag.replace_all(markup, "");
    let itemized = item.replace_all(&stripped, format!("\n{ITEM_BULLET}").as_str());
    newlines.replace_all(&itemized, "\n").trim().to_owned()
}

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this module.
    Regex::new(pattern).expect("valid BBCode pattern")
}
