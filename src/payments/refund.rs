//! Refund request builder

use tracing::debug;

use crate::config::MerchantConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::payments::amount::{format_amount, natural_amount};
use crate::payments::form::{Endpoint, FormRequest};
use crate::payments::signing::{ensure_single_line, sign};
use crate::payments::types::RefundRequest;

/// Build the signed form for a refund.
///
/// The signed plaintext carries the amount as written (`10.50`) while the
/// `return_amount` field carries the two-decimal form (`10.5`). The gateway
/// checks the token against the former.
pub fn build_refund_request(
    request: &RefundRequest,
    config: &MerchantConfig,
) -> GatewayResult<FormRequest> {
    if request.order_id.trim().is_empty() {
        return Err(GatewayError::invalid_field("merchant_oid", "cannot be empty"));
    }
    ensure_single_line("merchant_oid", &request.order_id)?;
    if let Some(reference) = &request.reference {
        ensure_single_line("reference_no", reference)?;
    }

    let plaintext = [
        config.merchant_id(),
        request.order_id.as_str(),
        natural_amount(request.amount).as_str(),
    ]
    .concat();

    let token = sign(config.merchant_key(), config.merchant_salt(), &plaintext)?;

    debug!(
        "Built refund request: order_id={}, amount={}, reference={:?}",
        request.order_id, request.amount, request.reference
    );

    let form = FormRequest::post(Endpoint::Refund)
        .field("merchant_id", config.merchant_id())
        .field("merchant_oid", request.order_id.as_str())
        .field("return_amount", format_amount(request.amount))
        .field("paytr_token", token);

    Ok(match &request.reference {
        Some(reference) => form.field("reference_no", reference.as_str()),
        None => form,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn create_test_config() -> MerchantConfig {
        MerchantConfig::new(
            "123456",
            "testkey",
            "testsalt",
            "https://shop.example/ok",
            "https://shop.example/fail",
        )
        .unwrap()
    }

    fn create_test_request() -> RefundRequest {
        RefundRequest::new("ORDER1001", Decimal::from_str("10.50").unwrap())
    }

    #[test]
    fn test_refund_token_signs_natural_amount() {
        let form = build_refund_request(&create_test_request(), &create_test_config()).unwrap();
        assert_eq!(
            form.get("paytr_token"),
            Some("IeUf2yDeMWrhK/kARdTIZVwrizIUjzaHDTvUq16+pdk=")
        );
        assert_eq!(form.get("return_amount"), Some("10.5"));
    }

    #[test]
    fn test_refund_fields_without_reference() {
        let form = build_refund_request(&create_test_request(), &create_test_config()).unwrap();
        assert_eq!(
            form.field_names(),
            vec!["merchant_id", "merchant_oid", "return_amount", "paytr_token"]
        );
        assert_eq!(form.endpoint(), Endpoint::Refund);
        assert_eq!(form.url(), "https://www.paytr.com/odeme/iade");
    }

    #[test]
    fn test_refund_fields_with_reference() {
        let request = create_test_request().with_reference("REF-77");
        let form = build_refund_request(&request, &create_test_config()).unwrap();
        assert_eq!(form.get("reference_no"), Some("REF-77"));
        assert_eq!(form.fields().len(), 5);

        // The reference is not part of the signed plaintext.
        let plain = build_refund_request(&create_test_request(), &create_test_config()).unwrap();
        assert_eq!(form.get("paytr_token"), plain.get("paytr_token"));
    }

    #[test]
    fn test_refund_is_deterministic() {
        let config = create_test_config();
        let request = create_test_request().with_reference("REF-77");
        let first = build_refund_request(&request, &config).unwrap();
        let second = build_refund_request(&request, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_refund_rejects_blank_order_id() {
        let request = RefundRequest::new(" ", Decimal::ONE);
        assert!(build_refund_request(&request, &create_test_config()).is_err());
    }
}
