//! Behavior of the boundary entry point before target injection.
//!
//! Lives in its own test binary so no other test can configure the bridge
//! first; the process-wide targets are set at most once.

use bridge_ffi::{reverse_invoke, reverse_release_buffer, STATUS_SUCCESS};
use serde_json::{json, Value};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

#[test]
fn test_invoke_before_configure_returns_not_configured_fault() {
    let request = json!({
        "targetType": "MdmServer",
        "targetMethod": "RunSyncML",
        "targetParameters": {"sessionId": "abc", "input": "blob"}
    });
    let input = CString::new(request.to_string()).unwrap();
    let mut output: *mut c_char = ptr::null_mut();

    let status = unsafe { reverse_invoke(input.as_ptr(), &mut output) };
    assert_eq!(status, STATUS_SUCCESS);
    assert!(!output.is_null());

    let body = unsafe { CStr::from_ptr(output) }.to_str().unwrap();
    let response: Value = serde_json::from_str(body).unwrap();
    assert_eq!(response["fault"]["kind"], "NotConfigured");
    assert_eq!(response["fault"]["subsystem"], "DeviceAgent");

    let released = unsafe { reverse_release_buffer(output) };
    assert_eq!(released, STATUS_SUCCESS);
}
