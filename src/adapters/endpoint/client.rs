//! HTTPS client for the conversion service
//!
//! One synchronous call per cycle. The transport negotiates TLS 1.2 at
//! minimum; no retry is attempted within a cycle.

use super::soap::{self, ConversionRequest};
use super::EndpointInvoker;
use crate::config::EndpointConfig;
use crate::domain::errors::EndpointError;
use crate::domain::outcome::EndpointResult;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::time::Duration;

/// Production endpoint client over reqwest/rustls
pub struct EndpointClient {
    http: reqwest::Client,
    config: EndpointConfig,
}

impl EndpointClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: EndpointConfig) -> Result<Self, EndpointError> {
        let http = reqwest::Client::builder()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| EndpointError::Connection(e.to_string()))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl EndpointInvoker for EndpointClient {
    async fn submit(&self, payload: &str) -> Result<EndpointResult, EndpointError> {
        let envelope = soap::build_envelope(&ConversionRequest {
            conversion_type: &self.config.conversion_type,
            directory: "",
            payload,
            key_field: &self.config.key_field,
            field_separator: &self.config.field_separator,
            organization: &self.config.organization,
            username: &self.config.username,
            password: self.config.password.expose_secret().as_ref(),
        });

        tracing::info!(
            url = %self.config.url,
            conversion_type = %self.config.conversion_type,
            payload_bytes = payload.len(),
            "Submitting payload to integration endpoint"
        );

        let response = self
            .http
            .post(&self.config.url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", soap::OPERATION)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EndpointError::Fault {
                status: status.as_u16(),
                message: body.chars().take(2000).collect(),
            });
        }

        soap::parse_response(&body)
    }
}
