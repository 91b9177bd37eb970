//! Wire constants for the cross-binary contract.
//!
//! These strings are a wire contract shared with the far side of the
//! boundary; changing any of them is a breaking protocol change.

/// Target type owning the SyncML session engine.
pub const TARGET_TYPE_MDM_SERVER: &str = "MdmServer";

/// Target type owning raw-handler status and eventing.
pub const TARGET_TYPE_PLUGIN_HOST: &str = "PluginHost";

/// MdmServer: execute a SyncML session.
pub const METHOD_RUN_SYNC_ML: &str = "RunSyncML";

/// PluginHost: record a deployment status.
pub const METHOD_REPORT: &str = "Report";

/// PluginHost: emit a notification event.
pub const METHOD_SEND_EVENT: &str = "SendEvent";

// ===== Parameter and result field keys =====

pub const PARAM_SESSION_ID: &str = "sessionId";
pub const PARAM_INPUT: &str = "input";
pub const FIELD_OUTPUT: &str = "output";

pub const PARAM_REPORT_ID: &str = "id";
pub const PARAM_DEPLOYMENT_STATUS: &str = "deploymentStatus";
pub const PARAM_REPORT_VALUE: &str = "value";

pub const PARAM_INTERFACE_NAME: &str = "interfaceName";
pub const PARAM_EVENT_NAME: &str = "eventName";
pub const PARAM_MESSAGE_DATA: &str = "messageData";

// ===== Response envelope fields =====

/// Success variant: carries the adapter's result payload.
pub const FIELD_PAYLOAD: &str = "payload";

/// Fault variant: carries kind/subsystem/code/message.
pub const FIELD_FAULT: &str = "fault";

// ===== Fault vocabulary =====

/// Subsystem name for faults raised by the bridge itself, as opposed to
/// faults surfaced from a target operation.
pub const SUBSYSTEM_DEVICE_AGENT: &str = "DeviceAgent";

pub const FAULT_KIND_MALFORMED_REQUEST: &str = "MalformedRequest";
pub const FAULT_KIND_UNKNOWN_TARGET_TYPE: &str = "UnknownTargetType";
pub const FAULT_KIND_UNKNOWN_METHOD: &str = "UnknownMethod";
pub const FAULT_KIND_MISSING_PARAMETER: &str = "MissingOrInvalidParameter";
pub const FAULT_KIND_TARGET_OPERATION: &str = "TargetOperationError";
pub const FAULT_KIND_NOT_CONFIGURED: &str = "NotConfigured";
pub const FAULT_KIND_INTERNAL: &str = "Internal";

pub const CODE_MALFORMED_REQUEST: i64 = 1;
pub const CODE_UNKNOWN_TARGET_TYPE: i64 = 2;
pub const CODE_UNKNOWN_METHOD: i64 = 3;
pub const CODE_MISSING_PARAMETER: i64 = 4;
pub const CODE_NOT_CONFIGURED: i64 = 5;
pub const CODE_INTERNAL: i64 = 6;
