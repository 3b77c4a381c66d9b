//! FFI layer for hosting a feed outside Rust.
//!
//! This module provides C-compatible functions so a host (a WebView shell, a
//! native app, a test harness) can own a feed and drive it with JSON events.
//! All data crosses the boundary as JSON strings.
//!
//! # Memory Management
//!
//! - Strings returned by `nailfeed_*` functions are allocated by Rust
//! - Caller must free them with `nailfeed_string_free`
//! - Feed pointers must be freed with `nailfeed_feed_free`
//!
//! # Error Handling
//!
//! Functions return JSON with either:
//! - `{"ok": <result>}` on success
//! - `{"error": "<message>"}` on failure

use crate::{posts_from_json, FeedEvent, FeedReconciler};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Result wrapper for FFI responses.
#[derive(serde::Serialize)]
#[serde(untagged)]
enum FfiResult<T: serde::Serialize> {
    Ok { ok: T },
    Err { error: String },
}

impl<T: serde::Serialize> FfiResult<T> {
    fn ok(value: T) -> Self {
        FfiResult::Ok { ok: value }
    }

    fn err(message: impl Into<String>) -> Self {
        FfiResult::Err {
            error: message.into(),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `nailfeed_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        // String contained null bytes - return error JSON
        Err(_) => CString::new(r#"{"error":"string contained null bytes"}"#)
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut()),
    }
}

/// Convert a C string pointer to a Rust string.
/// Returns None if pointer is null or invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

// ============================================================================
// Feed Lifecycle
// ============================================================================

/// Create an empty feed.
///
/// The caller must free the returned pointer with `nailfeed_feed_free`.
#[no_mangle]
pub extern "C" fn nailfeed_feed_new() -> *mut FeedReconciler {
    Box::into_raw(Box::new(FeedReconciler::new()))
}

/// Create a feed seeded with an initial post list.
///
/// # Arguments
/// - `posts_json`: JSON array of posts
///
/// # Returns
/// Pointer to the feed, or null if the list could not be decoded.
///
/// # Safety
/// - `posts_json` must be a valid null-terminated C string or null
/// - Caller must free the returned pointer with `nailfeed_feed_free`
#[no_mangle]
pub unsafe extern "C" fn nailfeed_feed_with_posts(
    posts_json: *const c_char,
) -> *mut FeedReconciler {
    let posts_str = match from_c_string(posts_json) {
        Some(s) => s,
        None => return ptr::null_mut(),
    };

    match posts_from_json(&posts_str) {
        Ok(posts) => Box::into_raw(Box::new(FeedReconciler::with_posts(posts))),
        Err(e) => {
            tracing::warn!(error = %e, "rejected initial post list");
            ptr::null_mut()
        }
    }
}

/// Free a feed.
///
/// # Safety
/// - `feed` must be a valid pointer from `nailfeed_feed_new` or `nailfeed_feed_with_posts`
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn nailfeed_feed_free(feed: *mut FeedReconciler) {
    if !feed.is_null() {
        drop(Box::from_raw(feed));
    }
}

/// Free a string allocated by the engine.
///
/// # Safety
/// - `s` must be a valid pointer from a `nailfeed_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn nailfeed_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// Feed Operations
// ============================================================================

/// Apply a feed event.
///
/// # Arguments
/// - `feed`: Feed pointer
/// - `event_json`: JSON string of a FeedEvent
///
/// # Returns
/// JSON string: `{"ok": FeedChange}` or `{"error": "message"}`
///
/// # Safety
/// - `feed` must be a valid pointer from `nailfeed_feed_new` or null
/// - `event_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `nailfeed_string_free`
#[no_mangle]
pub unsafe extern "C" fn nailfeed_feed_apply(
    feed: *mut FeedReconciler,
    event_json: *const c_char,
) -> *mut c_char {
    let feed = match feed.as_mut() {
        Some(f) => f,
        None => return to_c_string(FfiResult::<()>::err("null feed pointer").to_json()),
    };

    let event_str = match from_c_string(event_json) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid event JSON").to_json()),
    };

    let event = match FeedEvent::from_json(&event_str).and_then(|event| {
        event.validate()?;
        Ok(event)
    }) {
        Ok(event) => event,
        Err(e) => return to_c_string(FfiResult::<()>::err(e.to_string()).to_json()),
    };

    to_c_string(FfiResult::ok(feed.apply(event)).to_json())
}

/// Get the rendered feed.
///
/// # Returns
/// JSON string: `{"ok": FeedView}` or `{"error": "message"}`
///
/// # Safety
/// - `feed` must be a valid pointer from `nailfeed_feed_new` or null
/// - Caller must free the returned string with `nailfeed_string_free`
#[no_mangle]
pub unsafe extern "C" fn nailfeed_feed_view(feed: *const FeedReconciler) -> *mut c_char {
    let feed = match feed.as_ref() {
        Some(f) => f,
        None => return to_c_string(FfiResult::<()>::err("null feed pointer").to_json()),
    };

    to_c_string(FfiResult::ok(feed.view()).to_json())
}

/// Get the number of pending placeholders, or -1 for a null feed.
///
/// # Safety
/// - `feed` must be a valid pointer from `nailfeed_feed_new` or null
#[no_mangle]
pub unsafe extern "C" fn nailfeed_feed_optimistic_count(feed: *const FeedReconciler) -> i64 {
    match feed.as_ref() {
        Some(f) => f.optimistic_posts_count() as i64,
        None => -1,
    }
}
