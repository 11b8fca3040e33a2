//! Keyed-hash tokens for requests and callbacks
//!
//! Every token is `Base64(HMAC-SHA256(merchant_key, message))`. Requests append
//! the merchant salt after the plaintext; callbacks embed the salt in the
//! message itself. Plaintexts are plain concatenations with no delimiter, so
//! the field order used by each builder is part of the wire contract.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{GatewayError, GatewayResult};

type HmacSha256 = Hmac<Sha256>;

/// Sign `plaintext` followed by `secret_salt`.
pub fn sign(secret_key: &str, secret_salt: &str, plaintext: &str) -> GatewayResult<String> {
    digest(secret_key, &[plaintext.as_bytes(), secret_salt.as_bytes()])
}

/// Sign a message that already carries the salt.
pub fn sign_unsalted(secret_key: &str, message: &str) -> GatewayResult<String> {
    digest(secret_key, &[message.as_bytes()])
}

/// Constant-time token comparison.
pub fn tokens_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Reject values that could shift field boundaries inside a plaintext.
pub fn ensure_single_line(field: &str, value: &str) -> GatewayResult<()> {
    if value.chars().any(char::is_control) {
        return Err(GatewayError::invalid_field(
            field,
            "must not contain line breaks or other control characters",
        ));
    }
    Ok(())
}

fn digest(secret_key: &str, parts: &[&[u8]]) -> GatewayResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes()).map_err(|e| {
        GatewayError::configuration(format!("Failed to initialize HMAC-SHA256: {}", e))
    })?;

    for part in parts {
        mac.update(part);
    }

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_TOKEN: &str = "Rrqft0yunxJQyusE4p77zFQ3L4IwApPBWn62AsGRmJ8=";

    #[test]
    fn test_sign_matches_golden_vector() {
        let token = sign("testkey", "testsalt", "123TEST").unwrap();
        assert_eq!(token, GOLDEN_TOKEN);
    }

    #[test]
    fn test_salt_is_appended_to_plaintext() {
        let salted = sign("testkey", "testsalt", "123TEST").unwrap();
        let inline = sign_unsalted("testkey", "123TESTtestsalt").unwrap();
        assert_eq!(salted, inline);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign("k", "s", "p").unwrap();
        let second = sign("k", "s", "p").unwrap();
        assert_eq!(first, second);
        assert_ne!(first, sign("k", "s", "q").unwrap());
    }

    #[test]
    fn test_token_is_padded_base64() {
        let token = sign("k", "s", "p").unwrap();
        assert_eq!(token.len(), 44);
        assert!(token.ends_with('='));
    }

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match(GOLDEN_TOKEN, GOLDEN_TOKEN));
        assert!(!tokens_match(GOLDEN_TOKEN, "Rrqft0yunxJQ"));
        assert!(!tokens_match(GOLDEN_TOKEN, ""));
    }

    #[test]
    fn test_ensure_single_line() {
        assert!(ensure_single_line("email", "buyer@example.com").is_ok());
        assert!(ensure_single_line("email", "buyer@example.com\n1").is_err());
        assert!(ensure_single_line("merchant_oid", "A\r").is_err());
        assert!(ensure_single_line("user_name", "Ayşe Yılmaz").is_ok());
    }
}
