//! reqwest-backed transport posting `multipart/form-data`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Client;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::payments::form::FormRequest;
use crate::payments::response::require_body;
use crate::payments::traits::Transport;

pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> GatewayResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("paytr-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &FormRequest) -> GatewayResult<String> {
        let url = request.endpoint().url(&self.base_url);

        let form = request
            .fields()
            .iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });

        debug!("Posting {} fields to {}", request.fields().len(), url);

        let response = self
            .client
            .request(request.method().clone(), &url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Gateway request to {} failed: {}", url, e);
                GatewayError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read gateway response from {}: {}", url, e);
            GatewayError::from(e)
        })?;

        if !status.is_success() {
            error!("Gateway returned HTTP {} for {}", status, url);
            return Err(GatewayError::unexpected_status(status.as_u16(), body));
        }

        require_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig {
            base_url: String::new(),
            timeout_secs: 30,
        };
        assert!(ReqwestTransport::new(config).is_err());
    }

    #[test]
    fn test_new_keeps_base_url() {
        let transport = ReqwestTransport::new(ClientConfig::default()).unwrap();
        assert_eq!(transport.base_url(), "https://www.paytr.com");
    }
}
