use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, UmbrellaError},
    model::RawResponse,
};

/// Statuses the forecast API uses for rejected requests.
pub const EXPECTED_FAILURES: [u16; 3] = [401, 404, 429];

/// Anything outside 2xx is a failure, which also covers every expected one.
pub fn is_failure(status: u16) -> bool {
    !(200..300).contains(&status) || EXPECTED_FAILURES.contains(&status)
}

/// Passes the body through on success, otherwise turns the response into
/// [`UmbrellaError::Api`] with the best detail the body offers.
pub fn classify(resp: RawResponse) -> Result<Vec<u8>> {
    if !is_failure(resp.status_code) {
        return Ok(resp.body);
    }

    let detail = error_detail(&resp.body);
    debug!(status = resp.status_code, detail = %detail, "status code error");
    Err(UmbrellaError::api(resp.status_code, detail))
}

/// The JSON `message` field when there is one, the raw body otherwise.
fn error_detail(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}
