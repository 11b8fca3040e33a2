//! Card payment request builder

use std::str::FromStr;

use serde_json::{Number, Value};
use tracing::debug;

use crate::config::MerchantConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::payments::amount::format_amount;
use crate::payments::form::{Endpoint, FormRequest};
use crate::payments::signing::{ensure_single_line, sign};
use crate::payments::types::{ChargeRequest, LineItem};

pub const PAYMENT_TYPE: &str = "card";

/// Build the signed form for a direct card payment.
///
/// Pure: the returned descriptor is complete and nothing is sent.
pub fn build_charge_request(
    request: &ChargeRequest,
    config: &MerchantConfig,
) -> GatewayResult<FormRequest> {
    validate(request)?;

    let basket = serialize_basket(&request.items)?;
    let amount = format_amount(request.amount);
    let installment = request.installment.to_string();
    let currency = request.currency.gateway_code();
    let test_mode = flag(config.test_mode());
    let non_3d = flag(request.non_3d);

    let parts: [&str; 10] = [
        config.merchant_id(),
        &request.client_ip,
        &request.order_id,
        &request.email,
        &amount,
        PAYMENT_TYPE,
        &installment,
        currency,
        test_mode,
        non_3d,
    ];
    let plaintext = parts.concat();

    let token = sign(config.merchant_key(), config.merchant_salt(), &plaintext)?;

    debug!(
        "Built charge request: order_id={}, amount={}, currency={}, installment={}",
        request.order_id, amount, currency, installment
    );

    Ok(FormRequest::post(Endpoint::Payment)
        .field("merchant_id", config.merchant_id())
        .field("merchant_ok_url", config.ok_url())
        .field("merchant_fail_url", config.fail_url())
        .field("test_mode", test_mode)
        .field("debug_on", flag(config.debug_mode()))
        .field("user_ip", request.client_ip.as_str())
        .field("merchant_oid", request.order_id.as_str())
        .field("email", request.email.as_str())
        .field("payment_amount", amount)
        .field("payment_type", PAYMENT_TYPE)
        .field("installment_count", installment.as_str())
        .field("no_installment", installment.as_str())
        .field("max_installment", installment.as_str())
        .field("currency", currency)
        .field("lang", request.language())
        .field("non_3d", non_3d)
        .field("cc_owner", request.card.holder_name.as_str())
        .field("card_number", request.card.number.as_str())
        .field("expiry_month", request.card.expiry_month.as_str())
        .field("expiry_year", request.card.expiry_year.as_str())
        .field("cvv", request.card.cvv.as_str())
        .field("user_name", request.billing.full_name())
        .field("user_address", request.billing.address.as_str())
        .field("user_phone", request.billing.phone.as_str())
        .field("user_basket", basket)
        .field("paytr_token", token))
}

/// Serialize items as `[[title, price, quantity], ...]`, order preserved.
pub fn serialize_basket(items: &[LineItem]) -> GatewayResult<String> {
    let rows = items
        .iter()
        .map(|item| {
            let formatted = format_amount(item.price);
            let price = Number::from_str(&formatted).map_err(|e| {
                GatewayError::invalid_field("user_basket", format!("bad price: {}", e))
            })?;
            // Numbers without an exact JSON form would be sent altered.
            if price.to_string() != formatted {
                return Err(GatewayError::invalid_field(
                    "user_basket",
                    format!(
                        "price {} of item '{}' cannot be represented exactly",
                        formatted, item.title
                    ),
                ));
            }
            Ok(Value::Array(vec![
                Value::String(item.title.clone()),
                Value::Number(price),
                Value::from(item.quantity),
            ]))
        })
        .collect::<GatewayResult<Vec<Value>>>()?;

    Ok(serde_json::to_string(&Value::Array(rows))?)
}

fn validate(request: &ChargeRequest) -> GatewayResult<()> {
    let signed_fields = [
        ("user_ip", &request.client_ip),
        ("merchant_oid", &request.order_id),
        ("email", &request.email),
    ];
    for (name, value) in signed_fields {
        if value.trim().is_empty() {
            return Err(GatewayError::invalid_field(name, "cannot be empty"));
        }
        ensure_single_line(name, value)?;
    }

    if let Some(item) = request.items.iter().find(|item| item.quantity == 0) {
        return Err(GatewayError::invalid_field(
            "user_basket",
            format!("item '{}' has zero quantity", item.title),
        ));
    }

    Ok(())
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}
