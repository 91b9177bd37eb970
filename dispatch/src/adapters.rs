//! Per-(target, method) adapters.
//!
//! Each adapter unpacks typed parameters from the generic parameter payload,
//! calls exactly one target method exactly once, and repacks the native
//! result into a payload keyed by well-known field names. Void operations
//! return an empty object, never an absent value.

use crate::DispatchError;
use envelope::wire;
use serde_json::{Map, Value};
use std::str::FromStr;
use targets::{DeploymentStatus, MdmServer, PluginHost};

fn require_str<'a>(parameters: &'a Value, key: &str) -> Result<&'a str, DispatchError> {
    parameters
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DispatchError::MissingOrInvalidParameter(key.to_string()))
}

fn require_value<'a>(parameters: &'a Value, key: &str) -> Result<&'a Value, DispatchError> {
    parameters
        .get(key)
        .ok_or_else(|| DispatchError::MissingOrInvalidParameter(key.to_string()))
}

pub(crate) fn invoke_run_sync_ml(
    server: &dyn MdmServer,
    parameters: &Value,
) -> Result<Value, DispatchError> {
    let session_id = require_str(parameters, wire::PARAM_SESSION_ID)?;
    let input = require_str(parameters, wire::PARAM_INPUT)?;

    let output = server.run_sync_ml(session_id, input)?;

    let mut fields = Map::new();
    fields.insert(wire::FIELD_OUTPUT.to_string(), Value::String(output));
    Ok(Value::Object(fields))
}

pub(crate) fn invoke_report(
    host: &dyn PluginHost,
    parameters: &Value,
) -> Result<Value, DispatchError> {
    let id = require_str(parameters, wire::PARAM_REPORT_ID)?;
    let status_text = require_str(parameters, wire::PARAM_DEPLOYMENT_STATUS)?;
    let status = DeploymentStatus::from_str(status_text).map_err(|_| {
        DispatchError::MissingOrInvalidParameter(wire::PARAM_DEPLOYMENT_STATUS.to_string())
    })?;
    let value = require_value(parameters, wire::PARAM_REPORT_VALUE)?;

    host.report(id, status, value)?;

    Ok(Value::Object(Map::new()))
}

pub(crate) fn invoke_send_event(
    host: &dyn PluginHost,
    parameters: &Value,
) -> Result<Value, DispatchError> {
    let interface_name = require_str(parameters, wire::PARAM_INTERFACE_NAME)?;
    let event_name = require_str(parameters, wire::PARAM_EVENT_NAME)?;
    let data = require_value(parameters, wire::PARAM_MESSAGE_DATA)?;

    host.send_event(interface_name, event_name, data)?;

    Ok(Value::Object(Map::new()))
}
