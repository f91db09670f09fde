//! Shared HTTP client and response classification.

use std::sync::OnceLock;

use serde_json::Value;

use crate::error::FormError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// The client carries no request timeout; callers opt in per backend.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build the error for a non-2xx response.
///
/// A JSON body yields an application error carrying its non-blank `error`
/// string, if any. A body that is not JSON (an HTML error page, an empty
/// body) means no usable reply was obtained, which is a transport failure.
pub fn status_to_error(status: u16, body: &str) -> FormError {
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => FormError::application(status, extract_error_message(&parsed)),
        Err(e) => FormError::Serialization(e),
    }
}

fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
