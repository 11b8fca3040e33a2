//! Client library for the PayTR payment gateway.
//!
//! Builds signed `multipart/form-data` requests for card payments and refunds,
//! verifies asynchronous payment callbacks and interprets the gateway's
//! replies.
//!
//! ```no_run
//! use std::sync::Arc;
//! use paytr_gateway::{ClientConfig, MerchantConfig, PaytrClient, RefundRequest};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> paytr_gateway::GatewayResult<()> {
//! let merchant = Arc::new(MerchantConfig::new(
//!     "123456",
//!     "merchant-key",
//!     "merchant-salt",
//!     "https://shop.example/ok",
//!     "https://shop.example/fail",
//! )?);
//! let client = PaytrClient::new(merchant, ClientConfig::default())?;
//! let refunded = client
//!     .refund(&RefundRequest::new("ORDER1001", Decimal::new(1050, 2)))
//!     .await?;
//! # let _ = refunded;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod payments;

pub use config::{ClientConfig, MerchantConfig};
pub use error::{GatewayError, GatewayResult};
pub use payments::callback::{verify_callback, CALLBACK_ACKNOWLEDGEMENT};
pub use payments::charge::build_charge_request;
pub use payments::form::{Endpoint, FormRequest};
pub use payments::refund::build_refund_request;
pub use payments::response::{parse_refund_response, require_body};
pub use payments::signing::sign;
pub use payments::types::{
    Billing, CallbackNotification, Card, ChargeRequest, Currency, LineItem, RefundRequest,
    RefundResponse,
};

#[cfg(feature = "client")]
pub use payments::client::PaytrClient;
#[cfg(feature = "client")]
pub use payments::traits::Transport;
#[cfg(feature = "client")]
pub use payments::transport::ReqwestTransport;
