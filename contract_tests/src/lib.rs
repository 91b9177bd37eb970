//! # Bridge Contract Tests
//!
//! This crate provides "golden" tests for the cross-binary wire contract
//! to ensure it doesn't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: the wire contract is written as code
//! - **Testability first**: contract tests fail when field names, target
//!   types, methods, or fault vocabulary change
//!
//! ## Structure
//!
//! - [`wire`]: exact envelope field names, the registered
//!   (targetType, targetMethod) table, and the fault vocabulary
//! - [`cross_binary`]: end-to-end scenarios through the C-ABI boundary

pub mod cross_binary;
pub mod wire;

/// Mock targets shared by the contract tests.
pub mod test_support {
    use serde_json::Value;
    use std::sync::Mutex;
    use targets::{DeploymentStatus, MdmServer, PluginHost, TargetError};

    /// MdmServer that echoes its input blob as the output blob.
    pub struct EchoServer;

    impl MdmServer for EchoServer {
        fn run_sync_ml(&self, _session_id: &str, input: &str) -> Result<String, TargetError> {
            Ok(input.to_string())
        }
    }

    /// One observed `report` call.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ReportCall {
        pub id: String,
        pub status: DeploymentStatus,
        pub value: Value,
    }

    /// One observed `send_event` call.
    #[derive(Debug, Clone, PartialEq)]
    pub struct EventCall {
        pub interface_name: String,
        pub event_name: String,
        pub data: Value,
    }

    /// PluginHost that records every call for later inspection.
    #[derive(Default)]
    pub struct RecordingHost {
        reports: Mutex<Vec<ReportCall>>,
        events: Mutex<Vec<EventCall>>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reports observed for a given handler id.
        pub fn reports_for(&self, id: &str) -> Vec<ReportCall> {
            self.reports
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.id == id)
                .cloned()
                .collect()
        }

        /// Events observed for a given event name.
        pub fn events_named(&self, event_name: &str) -> Vec<EventCall> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.event_name == event_name)
                .cloned()
                .collect()
        }
    }

    impl PluginHost for RecordingHost {
        fn report(
            &self,
            id: &str,
            status: DeploymentStatus,
            value: &Value,
        ) -> Result<(), TargetError> {
            self.reports.lock().unwrap().push(ReportCall {
                id: id.to_string(),
                status,
                value: value.clone(),
            });
            Ok(())
        }

        fn send_event(
            &self,
            interface_name: &str,
            event_name: &str,
            data: &Value,
        ) -> Result<(), TargetError> {
            self.events.lock().unwrap().push(EventCall {
                interface_name: interface_name.to_string(),
                event_name: event_name.to_string(),
                data: data.clone(),
            });
            Ok(())
        }
    }
}
