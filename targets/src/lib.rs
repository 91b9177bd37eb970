//! Collaborator interfaces the call bridge dispatches into.
//!
//! The bridge routes to a small, closed set of local subsystems. Each is
//! modeled as a trait so the real implementation can live in the agent
//! while tests inject mocks. Both targets are injected once, process-wide,
//! before traffic starts, and must be safe to call from concurrent
//! invocations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deployment status a raw handler reports for a configuration operation.
///
/// The wire form is the exact variant name (`"Succeeded"` etc.); unknown
/// strings are rejected before the target is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    NotStarted,
    Pending,
    Succeeded,
    Failed,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::NotStarted => "NotStarted",
            DeploymentStatus::Pending => "Pending",
            DeploymentStatus::Succeeded => "Succeeded",
            DeploymentStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a deployment status string outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown deployment status: {0}")]
pub struct UnknownDeploymentStatus(pub String);

impl FromStr for DeploymentStatus {
    type Err = UnknownDeploymentStatus;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "NotStarted" => Ok(DeploymentStatus::NotStarted),
            "Pending" => Ok(DeploymentStatus::Pending),
            "Succeeded" => Ok(DeploymentStatus::Succeeded),
            "Failed" => Ok(DeploymentStatus::Failed),
            other => Err(UnknownDeploymentStatus(other.to_string())),
        }
    }
}

/// Domain failure raised by a target operation.
///
/// Carries the failing subsystem's own name and error code; the bridge
/// surfaces these unchanged in the fault envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{subsystem} error {code}: {message}")]
pub struct TargetError {
    pub subsystem: String,
    pub code: i64,
    pub message: String,
}

impl TargetError {
    pub fn new(subsystem: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            subsystem: subsystem.into(),
            code,
            message: message.into(),
        }
    }
}

/// The device-management protocol engine.
pub trait MdmServer: Send + Sync {
    /// Executes a management session.
    ///
    /// `input` and the returned output are opaque text-safe encodings of
    /// the SyncML blobs; the bridge passes them through verbatim.
    fn run_sync_ml(&self, session_id: &str, input: &str) -> Result<String, TargetError>;
}

/// The raw-handler host: records status and emits notifications.
pub trait PluginHost: Send + Sync {
    /// Records the deployment status of the handler identified by `id`.
    fn report(&self, id: &str, status: DeploymentStatus, value: &Value)
        -> Result<(), TargetError>;

    /// Emits a notification event on a device interface.
    fn send_event(
        &self,
        interface_name: &str,
        event_name: &str,
        data: &Value,
    ) -> Result<(), TargetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_status_string_roundtrip() {
        for status in [
            DeploymentStatus::NotStarted,
            DeploymentStatus::Pending,
            DeploymentStatus::Succeeded,
            DeploymentStatus::Failed,
        ] {
            let parsed = DeploymentStatus::from_str(status.as_str()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_deployment_status_wire_form() {
        let text = serde_json::to_string(&DeploymentStatus::Succeeded).unwrap();
        assert_eq!(text, "\"Succeeded\"");

        let parsed: DeploymentStatus = serde_json::from_str("\"Failed\"").unwrap();
        assert_eq!(parsed, DeploymentStatus::Failed);
    }

    #[test]
    fn test_deployment_status_unknown_rejected() {
        let result = DeploymentStatus::from_str("succeeded");
        assert!(matches!(result, Err(UnknownDeploymentStatus(_))));
    }

    #[test]
    fn test_target_error_display() {
        let error = TargetError::new("MdmServer", 17, "session aborted");
        assert_eq!(error.to_string(), "MdmServer error 17: session aborted");
    }
}
