use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document body as handed over by the storage layer, before it is reduced
/// to plain text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "format", content = "body", rename_all = "snake_case")]
pub enum DocumentContent {
    /// Missing content.
    #[default]
    Empty,
    /// Plain text.
    Text(String),
    /// Rich-text editor delta.
    Delta(Delta),
    /// Text carrying BBCode markup.
    BbCode(String),
    /// Any other JSON shape.
    Unknown(Value),
}

/// Rich-text delta: an ordered list of insert operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    /// Operations in document order.
    #[serde(default)]
    pub ops: Vec<DeltaOp>,
}

/// Single delta operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaOp {
    /// Inserted payload: a string for text, an object for embeds.
    #[serde(default)]
    pub insert: Option<Value>,
    /// Formatting attributes; irrelevant for plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

impl DeltaOp {
    /// Text insert operation.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Some(Value::String(text.into())),
            attributes: None,
        }
    }

    /// Textual payload of the operation, if it inserts text.
    #[must_use]
    pub fn insert_text(&self) -> Option<&str> {
        self.insert.as_ref().and_then(Value::as_str)
    }
}

/// A stored version offered for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRef {
    /// Sequential version number; absent for drafts.
    #[serde(default)]
    pub version_number: Option<u32>,
    /// The live document, newer than any numbered version.
    #[serde(default)]
    pub is_latest: bool,
    /// Body of the version.
    #[serde(default)]
    pub content: DocumentContent,
}

impl VersionRef {
    /// A numbered version.
    #[must_use]
    pub const fn numbered(version_number: u32, content: DocumentContent) -> Self {
        Self {
            version_number: Some(version_number),
            is_latest: false,
            content,
        }
    }

    /// The live document.
    #[must_use]
    pub const fn latest(content: DocumentContent) -> Self {
        Self {
            version_number: None,
            is_latest: true,
            content,
        }
    }
}
