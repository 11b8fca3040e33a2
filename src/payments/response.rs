//! Interpretation of gateway response bodies

use serde_json::Value;
use tracing::error;

use crate::error::{GatewayError, GatewayResult};
use crate::payments::types::RefundResponse;

/// Reject blank bodies; anything else is handed back untouched.
///
/// Charge replies (iframe or redirect tokens) go through this only; reading
/// them is up to the caller.
pub fn require_body(body: String) -> GatewayResult<String> {
    if body.trim().is_empty() {
        error!("Gateway returned an empty response body");
        return Err(GatewayError::EmptyResponse);
    }
    Ok(body)
}

/// Parse the refund endpoint's JSON reply.
pub fn parse_refund_response(body: &str) -> GatewayResult<RefundResponse> {
    if body.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    let document: Value = serde_json::from_str(body)?;
    match document.get("status") {
        Some(Value::String(_)) => Ok(serde_json::from_value(document)?),
        Some(other) => Err(GatewayError::parse(format!(
            "refund status must be a string, got {}",
            other
        ))),
        None => Err(GatewayError::parse("refund response has no status field")),
    }
}
