//! Native status codes returned by the Chroma SDK entry points
//!
//! The SDK reports results as Win32-style error codes. Only `SUCCESS` means the
//! call went through; every other value is surfaced as-is in [`ChromaError`].
//!
//! [`ChromaError`]: crate::ChromaError

pub const SUCCESS: i32 = 0;
pub const ACCESS_DENIED: i32 = 5;
pub const INVALID_HANDLE: i32 = 6;
pub const NOT_SUPPORTED: i32 = 50;
pub const INVALID_PARAMETER: i32 = 87;
pub const NO_MORE_ITEMS: i32 = 259;
pub const SERVICE_NOT_ACTIVE: i32 = 1062;
pub const SINGLE_INSTANCE_APP: i32 = 1152;
pub const DEVICE_NOT_CONNECTED: i32 = 1167;
pub const NOT_FOUND: i32 = 1168;
pub const REQUEST_ABORTED: i32 = 1235;
pub const ALREADY_INITIALIZED: i32 = 1247;
pub const RESOURCE_DISABLED: i32 = 4309;
pub const DEVICE_NOT_AVAILABLE: i32 = 4319;
pub const NOT_VALID_STATE: i32 = 5023;
/// `E_FAIL` (0x80004005) reinterpreted as a signed status
pub const FAILED: i32 = 0x8000_4005_u32 as i32;

/// Get the name of a known status code
pub fn name(code: i32) -> Option<&'static str> {
    match code {
        SUCCESS => Some("success"),
        ACCESS_DENIED => Some("access denied"),
        INVALID_HANDLE => Some("invalid handle"),
        NOT_SUPPORTED => Some("not supported"),
        INVALID_PARAMETER => Some("invalid parameter"),
        NO_MORE_ITEMS => Some("no more items"),
        SERVICE_NOT_ACTIVE => Some("service not active"),
        SINGLE_INSTANCE_APP => Some("single instance application"),
        DEVICE_NOT_CONNECTED => Some("device not connected"),
        NOT_FOUND => Some("not found"),
        REQUEST_ABORTED => Some("request aborted"),
        ALREADY_INITIALIZED => Some("already initialized"),
        RESOURCE_DISABLED => Some("resource disabled"),
        DEVICE_NOT_AVAILABLE => Some("device not available"),
        NOT_VALID_STATE => Some("not valid state"),
        FAILED => Some("general failure"),
        _ => None,
    }
}

/// Name of a status code, or `"unknown status"`
pub fn describe(code: i32) -> &'static str {
    name(code).unwrap_or("unknown status")
}
