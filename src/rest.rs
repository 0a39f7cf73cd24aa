use crate::config::ClientConfig;
use crate::errors::LvError;
use crate::failover::{attempt_with_failover, EndpointSet};
use crate::mapper;
use crate::models::{LeadRequest, LvResult};
use reqwest::Client;

const OPERATION: &str = "ValidateLead_V3";

/// REST/JSON client for the `ValidateLead_V3` operation.
///
/// Holds no per-call state; one instance can serve concurrent callers.
#[derive(Clone)]
pub struct RestLeadValidator {
    client: Client,
    config: ClientConfig,
}

impl RestLeadValidator {
    /// Creates a validator against the production ServiceObjects hosts.
    pub fn new() -> Result<Self, LvError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a validator with custom endpoints and timeout.
    pub fn with_config(config: ClientConfig) -> Result<Self, LvError> {
        let client = Client::builder()
            .timeout(config.rest_timeout)
            .build()
            .map_err(|e| LvError::Client(format!("Failed to create REST client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Validates a lead, failing over from primary to backup in live mode.
    ///
    /// A non-fatal service error is returned inside the result. A fatal one
    /// (`TypeCode == "3"`), a transport failure, a malformed or an empty body
    /// triggers the single backup attempt.
    pub async fn validate_lead(
        &self,
        request: &LeadRequest,
        license_key: &str,
        is_live: bool,
    ) -> Result<LvResult, LvError> {
        if license_key.trim().is_empty() {
            return Err(LvError::InvalidRequest(
                "license key cannot be empty".to_string(),
            ));
        }

        let endpoints = EndpointSet::select(
            is_live,
            &self.config.rest_primary_url,
            &self.config.rest_backup_url,
            &self.config.rest_trial_url,
        );

        attempt_with_failover(
            &endpoints,
            |base_url| self.get(base_url, request, license_key),
            |result: &LvResult| result.fatal_error().cloned(),
        )
        .await
    }

    async fn get(
        &self,
        base_url: String,
        request: &LeadRequest,
        license_key: &str,
    ) -> Result<Option<LvResult>, LvError> {
        let mut params = request.query_pairs();
        params.push(("LicenseKey", license_key));

        // Build URL with proper parameter encoding
        let url = reqwest::Url::parse_with_params(
            &format!("{}/{}", base_url.trim_end_matches('/'), OPERATION),
            &params,
        )
        .map_err(|e| LvError::transport(&base_url, format!("Failed to build URL: {}", e)))?;

        tracing::info!("Calling {} at {}", OPERATION, base_url);
        // Redact license key from logs
        tracing::debug!(
            "LV REST URL: {}/{}?...&LicenseKey=[REDACTED]",
            base_url,
            OPERATION
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LvError::transport(&base_url, format!("LV request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("LV REST returned error {}: {}", status, error_text);
            return Err(LvError::transport(
                &base_url,
                format!("LV returned status {}: {}", status, error_text),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LvError::transport(&base_url, format!("Failed to read body: {}", e)))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let payload: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| LvError::malformed(&base_url, format!("Failed to parse LV response: {}", e)))?;

        mapper::from_json(&payload).map_err(|e| LvError::malformed(&base_url, e))
    }
}
