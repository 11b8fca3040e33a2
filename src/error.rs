use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Gateway returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Gateway returned an empty response body")]
    EmptyResponse,

    #[error("Failed to parse gateway response: {message}")]
    Parse { message: String },
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Network failures and non-2xx replies from the gateway.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::Transport { .. } | GatewayError::UnexpectedStatus { .. }
        )
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Configuration { .. })
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::transport(format!("Request timed out: {}", err))
        } else if let Some(status) = err.status() {
            GatewayError::unexpected_status(status.as_u16(), String::new())
        } else {
            GatewayError::transport(format!("Request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::parse(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(err: config::ConfigError) -> Self {
        GatewayError::configuration(format!("Failed to load configuration: {}", err))
    }
}
