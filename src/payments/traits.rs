//! Transport trait definitions
//!
//! Builders never perform I/O. Whatever executes a `FormRequest` implements
//! `Transport`; the bundled implementation is `ReqwestTransport`.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::payments::form::FormRequest;

/// Executes signed form requests against the gateway.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `request` and return the raw response body.
    ///
    /// # Errors
    /// * `GatewayError::Transport` / `GatewayError::UnexpectedStatus` - network
    ///   failure or a non-2xx reply
    /// * `GatewayError::EmptyResponse` - the gateway answered with a blank body
    async fn send(&self, request: &FormRequest) -> GatewayResult<String>;
}
