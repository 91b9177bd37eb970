//! Response envelope: a two-variant success/fault result.

use crate::{wire, EnvelopeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback document for the unreachable serializer-error path; encoding a
/// response must never fail or panic.
const FALLBACK_FAULT: &str = concat!(
    r#"{"fault":{"kind":"Internal","subsystem":"DeviceAgent","code":6,"#,
    r#""message":"response serialization failed"}}"#
);

/// Structured failure carried across the boundary.
///
/// `subsystem` and `code` identify the failing component and its own error
/// code; `kind` is a stable string naming the error class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaultDetail {
    pub kind: String,
    pub subsystem: String,
    pub code: i64,
    pub message: String,
}

impl FaultDetail {
    pub fn new(
        kind: impl Into<String>,
        subsystem: impl Into<String>,
        code: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            subsystem: subsystem.into(),
            code,
            message: message.into(),
        }
    }
}

impl From<EnvelopeError> for FaultDetail {
    fn from(err: EnvelopeError) -> Self {
        let message = err.to_string();
        match err {
            EnvelopeError::MalformedRequest(_) => Self::new(
                wire::FAULT_KIND_MALFORMED_REQUEST,
                wire::SUBSYSTEM_DEVICE_AGENT,
                wire::CODE_MALFORMED_REQUEST,
                message,
            ),
            EnvelopeError::MalformedResponse(_) => Self::new(
                wire::FAULT_KIND_INTERNAL,
                wire::SUBSYSTEM_DEVICE_AGENT,
                wire::CODE_INTERNAL,
                message,
            ),
        }
    }
}

/// Result of a cross-binary call: exactly one of a success payload or a
/// fault.
///
/// On the wire, a success is `{"payload": ...}` and a fault is
/// `{"fault": {...}}`; a document carrying both fields or neither is
/// rejected, so the variant tag is always unambiguous.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossBinaryResponse {
    Success { payload: Value },
    Fault(FaultDetail),
}

/// Raw wire shape for serialization; decoding inspects field presence
/// directly in [`CrossBinaryResponse::from_json`].
#[derive(Serialize)]
struct WireResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fault: Option<FaultDetail>,
}

impl CrossBinaryResponse {
    /// Creates a success response carrying a payload.
    pub fn success(payload: Value) -> Self {
        Self::Success { payload }
    }

    /// Creates a success response with an empty-but-present payload.
    ///
    /// Void operations return `{}`, never an absent or null value; the far
    /// side distinguishes "succeeded with nothing to say" from "no answer".
    pub fn success_empty() -> Self {
        Self::Success {
            payload: Value::Object(Map::new()),
        }
    }

    /// Creates a fault response.
    pub fn fault(detail: FaultDetail) -> Self {
        Self::Fault(detail)
    }

    /// Returns true for the fault variant.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Encodes this response into its serialized text form.
    ///
    /// Total for well-formed responses: all fields are strings, integers,
    /// or JSON values, none of which can fail to serialize.
    pub fn to_json(&self) -> String {
        let wire = match self {
            Self::Success { payload } => WireResponse {
                payload: Some(payload.clone()),
                fault: None,
            },
            Self::Fault(detail) => WireResponse {
                payload: None,
                fault: Some(detail.clone()),
            },
        };
        serde_json::to_string(&wire).unwrap_or_else(|_| String::from(FALLBACK_FAULT))
    }

    /// Decodes a response from its serialized text form.
    ///
    /// The variant tag is field *presence*, so the document is inspected as
    /// a map rather than through `Option` fields: an explicit `null`
    /// payload is still a present payload.
    pub fn from_json(text: &str) -> Result<Self, EnvelopeError> {
        let mut document: Map<String, Value> = serde_json::from_str(text)
            .map_err(|err| EnvelopeError::MalformedResponse(err.to_string()))?;
        let payload = document.remove(wire::FIELD_PAYLOAD);
        let fault = document.remove(wire::FIELD_FAULT);
        match (payload, fault) {
            (Some(payload), None) => Ok(Self::Success { payload }),
            (None, Some(fault)) => {
                let detail: FaultDetail = serde_json::from_value(fault)
                    .map_err(|err| EnvelopeError::MalformedResponse(err.to_string()))?;
                Ok(Self::Fault(detail))
            }
            (Some(_), Some(_)) => Err(EnvelopeError::MalformedResponse(
                "both payload and fault present".to_string(),
            )),
            (None, None) => Err(EnvelopeError::MalformedResponse(
                "neither payload nor fault present".to_string(),
            )),
        }
    }
}
