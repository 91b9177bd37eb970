//! # Cross-Binary Dispatch
//!
//! This crate routes decoded cross-binary requests to the injected targets.
//!
//! ## Philosophy
//!
//! - **Closed routing table**: two-level exact match on
//!   (`targetType`, `targetMethod`); no prefix matching, no wildcards.
//!   Extend by registering a new pair, never by generalizing the matcher.
//! - **Stateless routing**: the router owns nothing but the two injected
//!   target handles; all observable side effects belong to the targets.
//! - **Pass-through errors**: adapters validate parameters, then surface
//!   target failures unchanged.

mod adapters;

use envelope::{wire, CrossBinaryRequest, CrossBinaryResponse, FaultDetail};
use serde_json::Value;
use std::sync::Arc;
use targets::{MdmServer, PluginHost, TargetError};
use thiserror::Error;

/// Errors raised while routing a request to a target.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// `targetType` is outside the closed enumeration; no adapter invoked.
    #[error("Invalid target type: {0}")]
    UnknownTargetType(String),

    /// `targetType` is known but `targetMethod` is not registered for it;
    /// no adapter invoked.
    #[error("Invalid {target_type} operation: {method}")]
    UnknownMethod { target_type: String, method: String },

    /// A required parameter is absent or has the wrong shape; the target
    /// is never called.
    #[error("Missing or invalid parameter: {0}")]
    MissingOrInvalidParameter(String),

    /// The target reported a domain failure while executing.
    #[error(transparent)]
    Target(#[from] TargetError),
}

impl From<DispatchError> for FaultDetail {
    fn from(err: DispatchError) -> Self {
        let message = err.to_string();
        match err {
            DispatchError::UnknownTargetType(_) => Self::new(
                wire::FAULT_KIND_UNKNOWN_TARGET_TYPE,
                wire::SUBSYSTEM_DEVICE_AGENT,
                wire::CODE_UNKNOWN_TARGET_TYPE,
                message,
            ),
            DispatchError::UnknownMethod { .. } => Self::new(
                wire::FAULT_KIND_UNKNOWN_METHOD,
                wire::SUBSYSTEM_DEVICE_AGENT,
                wire::CODE_UNKNOWN_METHOD,
                message,
            ),
            DispatchError::MissingOrInvalidParameter(_) => Self::new(
                wire::FAULT_KIND_MISSING_PARAMETER,
                wire::SUBSYSTEM_DEVICE_AGENT,
                wire::CODE_MISSING_PARAMETER,
                message,
            ),
            DispatchError::Target(inner) => Self::new(
                wire::FAULT_KIND_TARGET_OPERATION,
                inner.subsystem,
                inner.code,
                inner.message,
            ),
        }
    }
}

/// Routes decoded requests to one of the two injected targets.
///
/// The handles are set at construction and never reassigned; the router is
/// safe to share across threads and imposes no serialization of its own.
/// If a target is not safe for concurrent calls, that is the target's
/// responsibility.
pub struct CallRouter {
    mdm_server: Arc<dyn MdmServer>,
    plugin_host: Arc<dyn PluginHost>,
}

impl CallRouter {
    pub fn new(mdm_server: Arc<dyn MdmServer>, plugin_host: Arc<dyn PluginHost>) -> Self {
        Self {
            mdm_server,
            plugin_host,
        }
    }

    /// Dispatches a request to its (targetType, targetMethod) adapter and
    /// returns the adapter's result payload unchanged.
    ///
    /// `targetId` is forwarded as part of the request contract but no
    /// currently registered pair consumes it.
    pub fn route(&self, request: &CrossBinaryRequest) -> Result<Value, DispatchError> {
        let parameters = &request.target_parameters;
        match request.target_type.as_str() {
            wire::TARGET_TYPE_MDM_SERVER => match request.target_method.as_str() {
                wire::METHOD_RUN_SYNC_ML => {
                    adapters::invoke_run_sync_ml(self.mdm_server.as_ref(), parameters)
                }
                other => Err(DispatchError::UnknownMethod {
                    target_type: request.target_type.clone(),
                    method: other.to_string(),
                }),
            },
            wire::TARGET_TYPE_PLUGIN_HOST => match request.target_method.as_str() {
                wire::METHOD_REPORT => {
                    adapters::invoke_report(self.plugin_host.as_ref(), parameters)
                }
                wire::METHOD_SEND_EVENT => {
                    adapters::invoke_send_event(self.plugin_host.as_ref(), parameters)
                }
                other => Err(DispatchError::UnknownMethod {
                    target_type: request.target_type.clone(),
                    method: other.to_string(),
                }),
            },
            other => Err(DispatchError::UnknownTargetType(other.to_string())),
        }
    }

    /// Drives decode, route, and encode for one serialized request.
    ///
    /// Every failure path becomes a fault envelope; this function always
    /// returns a well-formed response document for any input string.
    pub fn handle_json(&self, input: &str) -> String {
        let response = match CrossBinaryRequest::from_json(input) {
            Ok(request) => match self.route(&request) {
                Ok(payload) => CrossBinaryResponse::success(payload),
                Err(err) => CrossBinaryResponse::fault(err.into()),
            },
            Err(err) => CrossBinaryResponse::fault(err.into()),
        };
        response.to_json()
    }
}
