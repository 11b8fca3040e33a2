//! Transport-ready request descriptors

use std::fmt;

use http::Method;

use crate::config::DEFAULT_BASE_URL;

/// Fields whose values must never appear in logs.
const REDACTED_FIELDS: [&str; 5] = [
    "card_number",
    "expiry_month",
    "expiry_year",
    "cvv",
    "paytr_token",
];

/// Gateway endpoints addressed by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Payment,
    Refund,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Payment => "/odeme",
            Endpoint::Refund => "/odeme/iade",
        }
    }

    /// Absolute URL of this endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// A signed, self-contained form request.
///
/// Builders produce it without any I/O; a transport posts the fields as
/// `multipart/form-data` in the order they were added.
#[derive(Clone, PartialEq, Eq)]
pub struct FormRequest {
    endpoint: Endpoint,
    method: Method,
    fields: Vec<(String, String)>,
}

impl FormRequest {
    pub fn post(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            method: Method::POST,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URL on the production gateway.
    pub fn url(&self) -> String {
        self.endpoint.url(DEFAULT_BASE_URL)
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(key, _)| key.as_str()).collect()
    }
}

impl fmt::Debug for FormRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(key, value)| {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    (key.as_str(), "<redacted>")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("FormRequest")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("fields", &fields)
            .finish()
    }
}
