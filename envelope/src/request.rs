//! Request envelope: a self-describing cross-binary call.

use crate::EnvelopeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded cross-binary call.
///
/// The field names are a wire contract (`targetType`, `targetId`,
/// `targetMethod`, `targetParameters`). A request is immutable once decoded
/// and consumed exactly once by the router.
///
/// `targetId` disambiguates instances within a target type; it may be empty
/// and no currently registered pair consumes it. `targetParameters` is an
/// opaque structured value whose shape is defined per (type, method) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrossBinaryRequest {
    pub target_type: String,
    #[serde(default)]
    pub target_id: String,
    pub target_method: String,
    #[serde(default = "empty_parameters")]
    pub target_parameters: Value,
}

fn empty_parameters() -> Value {
    Value::Object(Map::new())
}

impl CrossBinaryRequest {
    /// Creates a request with no target id and empty parameters.
    pub fn new(target_type: impl Into<String>, target_method: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            target_id: String::new(),
            target_method: target_method.into(),
            target_parameters: empty_parameters(),
        }
    }

    /// Sets the target instance disambiguator.
    pub fn with_target_id(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = target_id.into();
        self
    }

    /// Sets the parameter payload.
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.target_parameters = parameters;
        self
    }

    /// Decodes a request from its serialized text form.
    ///
    /// Fails with [`EnvelopeError::MalformedRequest`] on a parse error,
    /// a missing `targetType`/`targetMethod`, or a wrongly typed field.
    /// `targetId` and `targetParameters` may be absent; they default to an
    /// empty string and an empty object, matching what the far side sends
    /// for parameterless operations.
    pub fn from_json(text: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(text).map_err(|err| EnvelopeError::MalformedRequest(err.to_string()))
    }

    /// Encodes this request into its serialized text form.
    pub fn to_json(&self) -> String {
        // All field types serialize infallibly; the fallback is unreachable.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
