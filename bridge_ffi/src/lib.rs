//! # Bridge FFI
//!
//! The only functions callable from the far side of the binary boundary.
//!
//! Nothing but serialized buffers crosses here: [`reverse_invoke`] takes a
//! NUL-terminated request document, drives decode → route → encode, and
//! hands back a newly allocated response buffer whose ownership transfers
//! to the caller. The paired [`reverse_release_buffer`] is the single
//! consuming release operation for that buffer.
//!
//! The status code reports only whether marshaling itself completed.
//! Operation failures travel inside the response as fault envelopes, so no
//! error (or panic) ever unwinds across the boundary.

use dispatch::CallRouter;
use envelope::{wire, CrossBinaryResponse, FaultDetail};
use std::ffi::{c_char, CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use targets::{MdmServer, PluginHost};

/// Marshaling completed; the response buffer holds the outcome.
pub const STATUS_SUCCESS: i32 = 0;

/// A required pointer argument was null; no buffer was produced.
pub const STATUS_INVALID_ARGUMENT: i32 = 1;

static ROUTER: OnceLock<CallRouter> = OnceLock::new();

/// Injects the two process-wide targets.
///
/// Must be called once, before any cross-binary traffic; the handles are
/// read-only afterwards. Returns `false` if the bridge was already
/// configured, in which case the original targets stay in place.
pub fn configure(mdm_server: Arc<dyn MdmServer>, plugin_host: Arc<dyn PluginHost>) -> bool {
    ROUTER
        .set(CallRouter::new(mdm_server, plugin_host))
        .is_ok()
}

fn fault_body(kind: &str, code: i64, message: &str) -> String {
    CrossBinaryResponse::fault(FaultDetail::new(
        kind,
        wire::SUBSYSTEM_DEVICE_AGENT,
        code,
        message,
    ))
    .to_json()
}

/// Produces the response document for one request, converting every
/// failure path (including panics inside a target) into a fault envelope.
fn respond(input: &str) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match ROUTER.get() {
        Some(router) => router.handle_json(input),
        None => fault_body(
            wire::FAULT_KIND_NOT_CONFIGURED,
            wire::CODE_NOT_CONFIGURED,
            "bridge targets are not configured",
        ),
    }));

    outcome.unwrap_or_else(|_| {
        fault_body(
            wire::FAULT_KIND_INTERNAL,
            wire::CODE_INTERNAL,
            "panic while dispatching request",
        )
    })
}

/// Invokes a cross-binary call.
///
/// On `STATUS_SUCCESS`, `*output` receives a newly allocated
/// NUL-terminated response document owned by the caller, to be released
/// exactly once via [`reverse_release_buffer`]. On any other status no
/// buffer is produced and `*output` is left untouched.
///
/// # Safety
///
/// `input`, when non-null, must point to a NUL-terminated buffer valid for
/// the duration of the call. `output`, when non-null, must be a valid,
/// writable out-pointer.
#[no_mangle]
pub unsafe extern "C" fn reverse_invoke(
    input: *const c_char,
    output: *mut *mut c_char,
) -> i32 {
    if input.is_null() || output.is_null() {
        return STATUS_INVALID_ARGUMENT;
    }

    let body = match CStr::from_ptr(input).to_str() {
        Ok(text) => respond(text),
        Err(_) => fault_body(
            wire::FAULT_KIND_MALFORMED_REQUEST,
            wire::CODE_MALFORMED_REQUEST,
            "input is not valid UTF-8",
        ),
    };

    // serde_json escapes control characters, so the body carries no
    // interior NUL and the conversion cannot fail.
    let buffer = CString::new(body).unwrap_or_default();
    *output = buffer.into_raw();
    STATUS_SUCCESS
}

/// Releases a buffer previously returned by [`reverse_invoke`].
///
/// A null buffer is a no-op. Releasing the same buffer twice, or a buffer
/// not obtained from [`reverse_invoke`], is undefined.
///
/// # Safety
///
/// `buffer` must be null or a pointer obtained from [`reverse_invoke`]
/// that has not already been released.
#[no_mangle]
pub unsafe extern "C" fn reverse_release_buffer(buffer: *mut c_char) -> i32 {
    if !buffer.is_null() {
        drop(CString::from_raw(buffer));
    }
    STATUS_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::ptr;
    use targets::{DeploymentStatus, TargetError};

    struct EchoServer;

    impl MdmServer for EchoServer {
        fn run_sync_ml(&self, _session_id: &str, input: &str) -> Result<String, TargetError> {
            Ok(input.to_string())
        }
    }

    struct NullHost;

    impl PluginHost for NullHost {
        fn report(
            &self,
            _id: &str,
            _status: DeploymentStatus,
            _value: &Value,
        ) -> Result<(), TargetError> {
            Ok(())
        }

        fn send_event(
            &self,
            _interface_name: &str,
            _event_name: &str,
            _data: &Value,
        ) -> Result<(), TargetError> {
            Ok(())
        }
    }

    /// First caller wins; every test shares the same echo targets.
    fn configure_echo() {
        let _ = configure(Arc::new(EchoServer), Arc::new(NullHost));
    }

    /// Drives the boundary entry point with a Rust string and releases the
    /// returned buffer after copying it out.
    fn invoke_text(input: &str) -> (i32, Option<String>) {
        let input_c = CString::new(input).unwrap();
        let mut output: *mut c_char = ptr::null_mut();

        let status = unsafe { reverse_invoke(input_c.as_ptr(), &mut output) };
        if output.is_null() {
            return (status, None);
        }

        let body = unsafe { CStr::from_ptr(output) }
            .to_str()
            .unwrap()
            .to_string();
        let released = unsafe { reverse_release_buffer(output) };
        assert_eq!(released, STATUS_SUCCESS);
        (status, Some(body))
    }

    #[test]
    fn test_null_input_is_invalid_argument() {
        configure_echo();
        let mut output: *mut c_char = ptr::null_mut();

        let status = unsafe { reverse_invoke(ptr::null(), &mut output) };
        assert_eq!(status, STATUS_INVALID_ARGUMENT);
        assert!(output.is_null(), "output must be left untouched");
    }

    #[test]
    fn test_null_output_is_invalid_argument() {
        configure_echo();
        let input = CString::new("{}").unwrap();

        let status = unsafe { reverse_invoke(input.as_ptr(), ptr::null_mut()) };
        assert_eq!(status, STATUS_INVALID_ARGUMENT);
    }

    #[test]
    fn test_run_sync_ml_roundtrip() {
        configure_echo();
        let request = json!({
            "targetType": "MdmServer",
            "targetMethod": "RunSyncML",
            "targetParameters": {"sessionId": "abc", "input": "PHN5bmNtbD4="}
        });

        let (status, body) = invoke_text(&request.to_string());
        assert_eq!(status, STATUS_SUCCESS);

        let response: Value = serde_json::from_str(&body.unwrap()).unwrap();
        assert_eq!(response["payload"]["output"], "PHN5bmNtbD4=");
    }

    #[test]
    fn test_garbage_input_returns_fault_with_success_status() {
        configure_echo();
        for input in ["", "not json", "{\"targetType\": []}"] {
            let (status, body) = invoke_text(input);
            assert_eq!(status, STATUS_SUCCESS);

            let response: Value = serde_json::from_str(&body.unwrap()).unwrap();
            assert_eq!(response["fault"]["kind"], "MalformedRequest");
        }
    }

    #[test]
    fn test_bogus_target_type_returns_fault() {
        configure_echo();
        let request = json!({
            "targetType": "Bogus",
            "targetMethod": "Anything",
            "targetParameters": {}
        });

        let (status, body) = invoke_text(&request.to_string());
        assert_eq!(status, STATUS_SUCCESS);

        let response: Value = serde_json::from_str(&body.unwrap()).unwrap();
        assert_eq!(response["fault"]["kind"], "UnknownTargetType");
        assert_eq!(response["fault"]["subsystem"], "DeviceAgent");
    }

    #[test]
    fn test_non_utf8_input_returns_fault() {
        configure_echo();
        let bytes: &[u8] = &[0xff, 0xfe, 0x00];
        let mut output: *mut c_char = ptr::null_mut();

        let status =
            unsafe { reverse_invoke(bytes.as_ptr() as *const c_char, &mut output) };
        assert_eq!(status, STATUS_SUCCESS);
        assert!(!output.is_null());

        let body = unsafe { CStr::from_ptr(output) }.to_str().unwrap();
        let response: Value = serde_json::from_str(body).unwrap();
        assert_eq!(response["fault"]["kind"], "MalformedRequest");
        unsafe { reverse_release_buffer(output) };
    }

    #[test]
    fn test_release_null_is_noop() {
        let status = unsafe { reverse_release_buffer(ptr::null_mut()) };
        assert_eq!(status, STATUS_SUCCESS);
    }

    #[test]
    fn test_concurrent_invocations_own_independent_buffers() {
        configure_echo();
        let handles: Vec<_> = (0..8)
            .map(|index| {
                std::thread::spawn(move || {
                    let request = json!({
                        "targetType": "MdmServer",
                        "targetMethod": "RunSyncML",
                        "targetParameters": {
                            "sessionId": format!("session-{index}"),
                            "input": format!("blob-{index}")
                        }
                    });

                    let (status, body) = invoke_text(&request.to_string());
                    assert_eq!(status, STATUS_SUCCESS);

                    let response: Value = serde_json::from_str(&body.unwrap()).unwrap();
                    assert_eq!(
                        response["payload"]["output"],
                        format!("blob-{index}").as_str()
                    );
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
