//! Verification of asynchronous payment callbacks

use tracing::warn;

use crate::config::MerchantConfig;
use crate::payments::amount::natural_amount;
use crate::payments::signing::{ensure_single_line, sign_unsalted, tokens_match};
use crate::payments::types::CallbackNotification;

pub const SUCCESS_STATUS: &str = "success";

/// Body the merchant answers a processed callback with.
pub const CALLBACK_ACKNOWLEDGEMENT: &str = "OK";

/// `true` only for an authentic callback reporting a successful payment.
///
/// The hash covers `order_id + salt + status + amount`. A forged hash, a
/// failed status or malformed fields all yield `false`.
pub fn verify_callback(callback: &CallbackNotification, config: &MerchantConfig) -> bool {
    let amount = natural_amount(callback.amount);

    let fields = [
        ("merchant_oid", callback.order_id.as_str()),
        ("status", callback.status.as_str()),
        ("hash", callback.hash.as_str()),
    ];
    if let Some(err) = fields
        .iter()
        .find_map(|(name, value)| ensure_single_line(name, value).err())
    {
        warn!(
            "Rejecting callback for order_id={}: {}",
            callback.order_id.escape_debug(),
            err
        );
        return false;
    }

    let plaintext = [
        callback.order_id.as_str(),
        config.merchant_salt(),
        callback.status.as_str(),
        amount.as_str(),
    ]
    .concat();

    let expected = match sign_unsalted(config.merchant_key(), &plaintext) {
        Ok(token) => token,
        Err(e) => {
            warn!("Could not compute callback hash: {}", e);
            return false;
        }
    };

    if !tokens_match(&expected, &callback.hash) {
        warn!(
            "Callback hash mismatch: order_id={}, status={}",
            callback.order_id, callback.status
        );
        return false;
    }

    callback.status == SUCCESS_STATUS
}
