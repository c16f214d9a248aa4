//! Patch Decision Engine
//!
//! Decides the single label mutation to apply to an admitted object and
//! describes it as an RFC 6902 JSON Patch document. The engine only reads the
//! caller's labels; it never mutates them.
//!
//! The rule depends on presence alone, never on the current value:
//! - `cumulo.ai` absent: `add` it with `"true"`
//! - `cumulo.ai` present: `add` it with `"false"` (`add` overwrites an
//!   existing member, so it is valid in both cases)

use std::collections::BTreeMap;

use json_patch::{AddOperation, ReplaceOperation};
use jsonptr::PointerBuf;
use serde::{Deserialize, Serialize};

use crate::{Result, MANAGED_LABEL};

/// Value written when the managed label is absent
pub const LABEL_ABSENT_VALUE: &str = "true";

/// Value written when the managed label is already present
pub const LABEL_PRESENT_VALUE: &str = "false";

/// JSON Patch operation kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// RFC 6902 `add`: creates or overwrites the target member
    Add,
    /// RFC 6902 `replace`: target member must already exist
    Replace,
}

/// A single label patch operation
///
/// Serializes as `{"op":"add","path":"/metadata/labels/cumulo.ai","value":"true"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchOperation {
    /// Operation kind
    pub op: PatchOp,
    /// JSON pointer to the label
    pub path: PointerBuf,
    /// New label value
    pub value: String,
}

impl PatchOperation {
    /// Create an `add` operation
    pub fn add(path: PointerBuf, value: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Add,
            path,
            value: value.into(),
        }
    }

    /// Create a `replace` operation
    pub fn replace(path: PointerBuf, value: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Replace,
            path,
            value: value.into(),
        }
    }
}

impl From<PatchOperation> for json_patch::PatchOperation {
    fn from(op: PatchOperation) -> Self {
        let value = serde_json::Value::String(op.value);
        match op.op {
            PatchOp::Add => json_patch::PatchOperation::Add(AddOperation {
                path: op.path,
                value,
            }),
            PatchOp::Replace => json_patch::PatchOperation::Replace(ReplaceOperation {
                path: op.path,
                value,
            }),
        }
    }
}

/// Ordered list of patch operations returned to the API server
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
    /// Create a document from operations
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    /// Operations in application order
    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no operations
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to the JSON Patch wire format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }
}

impl From<PatchDocument> for json_patch::Patch {
    fn from(doc: PatchDocument) -> Self {
        json_patch::Patch(doc.0.into_iter().map(Into::into).collect())
    }
}

/// JSON pointer to `metadata.labels[key]`
///
/// `/` and `~` in the key are escaped as `~1` and `~0`.
pub fn label_path(key: &str) -> PointerBuf {
    PointerBuf::from_tokens(["metadata", "labels", key])
}

/// Decide the label patch for an object with the given labels
///
/// `None` (no label map on the object) is treated the same as an empty map.
pub fn decide(labels: Option<&BTreeMap<String, String>>) -> PatchDocument {
    let present = labels.is_some_and(|l| l.contains_key(MANAGED_LABEL));
    let value = if present {
        LABEL_PRESENT_VALUE
    } else {
        LABEL_ABSENT_VALUE
    };

    PatchDocument::new(vec![PatchOperation::add(label_path(MANAGED_LABEL), value)])
}

/// Decide the label patch and serialize it in one step
pub fn generate_json_patch(labels: Option<&BTreeMap<String, String>>) -> Result<Vec<u8>> {
    decide(labels).to_bytes()
}
