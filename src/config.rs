//! Merchant and client configuration
//!
//! `MerchantConfig` carries the credentials every signed request needs. It is
//! built once by the embedding application and shared read-only by every call.

use std::fmt;

use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult};
use crate::payments::signing::ensure_single_line;

pub const DEFAULT_BASE_URL: &str = "https://www.paytr.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "PAYTR";

/// Merchant credentials and redirect settings.
///
/// There is no `Serialize` impl and the `Debug` output redacts the key and
/// salt, so the secrets cannot leak through logs or serialized payloads.
/// Deserialization goes through `validate()` like `new` does.
#[derive(Clone, Deserialize)]
#[serde(try_from = "RawMerchantConfig")]
pub struct MerchantConfig {
    merchant_id: String,
    merchant_key: String,
    merchant_salt: String,
    ok_url: String,
    fail_url: String,
    test_mode: bool,
    debug_mode: bool,
}

#[derive(Deserialize)]
struct RawMerchantConfig {
    merchant_id: String,
    merchant_key: String,
    merchant_salt: String,
    ok_url: String,
    fail_url: String,
    #[serde(default)]
    test_mode: bool,
    #[serde(default)]
    debug_mode: bool,
}

impl TryFrom<RawMerchantConfig> for MerchantConfig {
    type Error = GatewayError;

    fn try_from(raw: RawMerchantConfig) -> GatewayResult<Self> {
        let config = Self {
            merchant_id: raw.merchant_id,
            merchant_key: raw.merchant_key,
            merchant_salt: raw.merchant_salt,
            ok_url: raw.ok_url,
            fail_url: raw.fail_url,
            test_mode: raw.test_mode,
            debug_mode: raw.debug_mode,
        };

        config.validate()?;
        Ok(config)
    }
}

impl MerchantConfig {
    /// Create a validated merchant configuration with test and debug mode off.
    pub fn new(
        merchant_id: impl Into<String>,
        merchant_key: impl Into<String>,
        merchant_salt: impl Into<String>,
        ok_url: impl Into<String>,
        fail_url: impl Into<String>,
    ) -> GatewayResult<Self> {
        let config = Self {
            merchant_id: merchant_id.into(),
            merchant_key: merchant_key.into(),
            merchant_salt: merchant_salt.into(),
            ok_url: ok_url.into(),
            fail_url: fail_url.into(),
            test_mode: false,
            debug_mode: false,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `PAYTR_*` environment variables.
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_environment(source: config::Environment) -> GatewayResult<Self> {
        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    pub fn with_test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    pub fn validate(&self) -> GatewayResult<()> {
        let credentials = [
            ("merchant_id", &self.merchant_id),
            ("merchant_key", &self.merchant_key),
            ("merchant_salt", &self.merchant_salt),
        ];

        for (name, value) in credentials {
            if value.trim().is_empty() {
                return Err(GatewayError::configuration(format!(
                    "{} cannot be empty",
                    name
                )));
            }
            ensure_single_line(name, value)
                .map_err(|e| GatewayError::configuration(e.to_string()))?;
        }

        Ok(())
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn ok_url(&self) -> &str {
        &self.ok_url
    }

    pub fn fail_url(&self) -> &str {
        &self.fail_url
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub(crate) fn merchant_key(&self) -> &str {
        &self.merchant_key
    }

    pub(crate) fn merchant_salt(&self) -> &str {
        &self.merchant_salt
    }
}

impl fmt::Debug for MerchantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantConfig")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_key", &"<redacted>")
            .field("merchant_salt", &"<redacted>")
            .field("ok_url", &self.ok_url)
            .field("fail_url", &self.fail_url)
            .field("test_mode", &self.test_mode)
            .field("debug_mode", &self.debug_mode)
            .finish()
    }
}

/// HTTP settings for the bundled transport.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Gateway origin (defaults to https://www.paytr.com)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load `PAYTR_BASE_URL` and `PAYTR_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_environment(source: config::Environment) -> GatewayResult<Self> {
        let config: Self = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(GatewayError::configuration("PAYTR_BASE_URL cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::configuration(
                "PAYTR_TIMEOUT_SECS must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_source(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_new_rejects_blank_credentials() {
        let result = MerchantConfig::new("123456", "  ", "salt", "https://ok", "https://fail");
        let err = result.unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("merchant_key"));
    }

    #[test]
    fn test_new_rejects_multiline_merchant_id() {
        let result = MerchantConfig::new("123\n456", "key", "salt", "https://ok", "https://fail");
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_flags_default_off() {
        let config =
            MerchantConfig::new("123456", "key", "salt", "https://ok", "https://fail").unwrap();
        assert!(!config.test_mode());
        assert!(!config.debug_mode());

        let config = config.with_test_mode(true).with_debug_mode(true);
        assert!(config.test_mode());
        assert!(config.debug_mode());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = MerchantConfig::new(
            "123456",
            "super-secret-key",
            "super-secret-salt",
            "https://ok",
            "https://fail",
        )
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("123456"));
        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("super-secret-salt"));
    }

    #[test]
    fn test_merchant_config_from_environment() {
        let source = env_source(&[
            ("PAYTR_MERCHANT_ID", "123456"),
            ("PAYTR_MERCHANT_KEY", "key"),
            ("PAYTR_MERCHANT_SALT", "salt"),
            ("PAYTR_OK_URL", "https://shop.example/ok"),
            ("PAYTR_FAIL_URL", "https://shop.example/fail"),
            ("PAYTR_TEST_MODE", "true"),
        ]);

        let config = MerchantConfig::from_environment(source).unwrap();
        assert_eq!(config.merchant_id(), "123456");
        assert_eq!(config.ok_url(), "https://shop.example/ok");
        assert!(config.test_mode());
        assert!(!config.debug_mode());
    }

    #[test]
    fn test_merchant_config_from_environment_missing_salt() {
        let source = env_source(&[
            ("PAYTR_MERCHANT_ID", "123456"),
            ("PAYTR_MERCHANT_KEY", "key"),
            ("PAYTR_OK_URL", "https://shop.example/ok"),
            ("PAYTR_FAIL_URL", "https://shop.example/fail"),
        ]);

        let result = MerchantConfig::from_environment(source);
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let json = r#"{"merchant_id":"","merchant_key":"","merchant_salt":"a\nb","ok_url":"https://ok","fail_url":"https://fail"}"#;
        let result = serde_json::from_str::<MerchantConfig>(json);
        assert!(result.is_err());

        let json = r#"{"merchant_id":"123456","merchant_key":"key","merchant_salt":"a\nb","ok_url":"https://ok","fail_url":"https://fail"}"#;
        let err = serde_json::from_str::<MerchantConfig>(json).unwrap_err();
        assert!(err.to_string().contains("merchant_salt"));
    }

    #[test]
    fn test_deserialize_valid_config() {
        let json = r#"{"merchant_id":"123456","merchant_key":"key","merchant_salt":"salt","ok_url":"https://ok","fail_url":"https://fail","debug_mode":true}"#;
        let config: MerchantConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.merchant_id(), "123456");
        assert!(!config.test_mode());
        assert!(config.debug_mode());
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.paytr.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_config_from_environment() {
        let config = ClientConfig::from_environment(env_source(&[(
            "PAYTR_TIMEOUT_SECS",
            "5",
        )]))
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_client_config_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
