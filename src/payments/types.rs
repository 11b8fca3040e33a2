//! Gateway request and notification types

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult};

/// ISO-4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    /// Turkish lira, the gateway's home currency.
    pub const TRY: &'static str = "TRY";

    pub fn new(code: impl Into<String>) -> GatewayResult<Self> {
        let code = code.into();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(GatewayError::invalid_field(
                "currency",
                format!("'{}' is not an ISO-4217 code", code),
            ));
        }
        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Code as the gateway expects it: `TRY` is sent as `TL`.
    pub fn gateway_code(&self) -> &str {
        if self.0 == Self::TRY {
            "TL"
        } else {
            &self.0
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(Self::TRY.to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card details. Used for a single request body and never logged.
#[derive(Clone, Default)]
pub struct Card {
    /// Name printed on the card
    pub holder_name: String,
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("holder_name", &self.holder_name)
            .field("number", &"<redacted>")
            .field("expiry_month", &"<redacted>")
            .field("expiry_year", &"<redacted>")
            .field("cvv", &"<redacted>")
            .finish()
    }
}

/// Billing details of the paying customer.
#[derive(Debug, Clone, Default)]
pub struct Billing {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub address: String,
}

impl Billing {
    /// Name and surname joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// A purchased item in the basket.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(title: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            title: title.into(),
            price,
            quantity,
        }
    }
}

/// A single card payment attempt.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    /// Unique merchant order id (`merchant_oid`)
    pub order_id: String,
    /// IP address of the paying customer
    pub client_ip: String,
    pub email: String,
    pub amount: Decimal,
    /// Number of installments; 0 means a single payment
    pub installment: u32,
    pub currency: Currency,
    /// BCP-47 language tag, e.g. `tr` or `en-US`
    pub language_tag: String,
    /// Skip 3-D Secure verification
    pub non_3d: bool,
    pub card: Card,
    pub billing: Billing,
    pub items: Vec<LineItem>,
}

impl ChargeRequest {
    /// Create a request with the gateway defaults: single payment, TRY,
    /// Turkish language and 3-D Secure enabled.
    pub fn new(
        order_id: impl Into<String>,
        client_ip: impl Into<String>,
        email: impl Into<String>,
        amount: Decimal,
        card: Card,
        billing: Billing,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            client_ip: client_ip.into(),
            email: email.into(),
            amount,
            installment: 0,
            currency: Currency::default(),
            language_tag: "tr".to_string(),
            non_3d: false,
            card,
            billing,
            items,
        }
    }

    pub fn with_installment(mut self, installment: u32) -> Self {
        self.installment = installment;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_language_tag(mut self, tag: impl Into<String>) -> Self {
        self.language_tag = tag.into();
        self
    }

    pub fn with_non_3d(mut self, non_3d: bool) -> Self {
        self.non_3d = non_3d;
        self
    }

    /// Primary language subtag, lowercased (`en-US` → `en`).
    pub fn language(&self) -> String {
        self.language_tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }
}

/// Asynchronous payment result posted by the gateway.
///
/// Field names follow the gateway's callback form so the embedding webhook
/// layer can deserialize the body directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallbackNotification {
    #[serde(rename = "merchant_oid")]
    pub order_id: String,
    pub status: String,
    #[serde(rename = "total_amount")]
    pub amount: Decimal,
    pub hash: String,
}

/// Refund of a previously captured order.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundRequest {
    pub order_id: String,
    pub amount: Decimal,
    /// Optional merchant reference number (`reference_no`)
    pub reference: Option<String>,
}

impl RefundRequest {
    pub fn new(order_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Parsed reply of the refund endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefundResponse {
    pub status: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub err_no: Option<String>,
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl RefundResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// Error codes arrive either quoted or as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(other) => Ok(Some(other.to_string())),
    }
}
