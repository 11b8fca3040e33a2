//! Gateway client tying builders, transport and response handling together

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{ClientConfig, MerchantConfig};
use crate::error::GatewayResult;
use crate::payments::callback::verify_callback;
use crate::payments::charge::build_charge_request;
use crate::payments::refund::build_refund_request;
use crate::payments::response::parse_refund_response;
use crate::payments::traits::Transport;
use crate::payments::transport::ReqwestTransport;
use crate::payments::types::{CallbackNotification, ChargeRequest, RefundRequest, RefundResponse};

/// PayTR client.
///
/// Holds the merchant configuration read-only; clones of the `Arc` can be
/// shared between clients and tasks.
pub struct PaytrClient<T: Transport = ReqwestTransport> {
    merchant: Arc<MerchantConfig>,
    transport: T,
}

impl PaytrClient<ReqwestTransport> {
    /// Create a client using the bundled reqwest transport.
    pub fn new(merchant: Arc<MerchantConfig>, config: ClientConfig) -> GatewayResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(merchant, transport))
    }

    /// Create a client from `PAYTR_*` environment variables.
    pub fn from_env() -> GatewayResult<Self> {
        let merchant = Arc::new(MerchantConfig::from_env()?);
        Self::new(merchant, ClientConfig::from_env()?)
    }
}

impl<T: Transport> PaytrClient<T> {
    pub fn with_transport(merchant: Arc<MerchantConfig>, transport: T) -> Self {
        Self {
            merchant,
            transport,
        }
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    /// Submit a card payment and return the gateway's raw reply.
    pub async fn pay(&self, request: &ChargeRequest) -> GatewayResult<String> {
        info!(
            "Initiating PayTR payment: order_id={}, amount={}, currency={}",
            request.order_id, request.amount, request.currency
        );

        let form = build_charge_request(request, &self.merchant)?;
        let body = self.transport.send(&form).await?;

        info!("PayTR payment submitted: order_id={}", request.order_id);
        Ok(body)
    }

    /// Refund an order; `true` iff the gateway reports `success`.
    pub async fn refund(&self, request: &RefundRequest) -> GatewayResult<bool> {
        Ok(self.refund_with_details(request).await?.is_success())
    }

    /// Refund an order and return the parsed reply, including any error code.
    pub async fn refund_with_details(
        &self,
        request: &RefundRequest,
    ) -> GatewayResult<RefundResponse> {
        info!(
            "Requesting PayTR refund: order_id={}, amount={}",
            request.order_id, request.amount
        );

        let form = build_refund_request(request, &self.merchant)?;
        let body = self.transport.send(&form).await?;
        let response = parse_refund_response(&body)?;

        if response.is_success() {
            info!("PayTR refund accepted: order_id={}", request.order_id);
        } else {
            warn!(
                "PayTR refund rejected: order_id={}, status={}, err_no={:?}, err_msg={:?}",
                request.order_id, response.status, response.err_no, response.err_msg
            );
        }

        Ok(response)
    }

    /// Verify an inbound callback against this client's merchant credentials.
    pub fn verify_callback(&self, callback: &CallbackNotification) -> bool {
        verify_callback(callback, &self.merchant)
    }
}
