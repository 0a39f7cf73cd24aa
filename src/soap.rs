use crate::config::ClientConfig;
use crate::errors::LvError;
use crate::failover::{attempt_with_failover, EndpointSet};
use crate::mapper;
use crate::models::{LeadRequest, LvResult};
use crate::xml::{self, XmlElement};
use quick_xml::escape::escape;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

const OPERATION: &str = "ValidateLead_V3";
const RESULT_ELEMENT: &str = "ValidateLead_V3Result";
const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP/XML client for the `ValidateLead_V3` operation.
///
/// The license key, mode and endpoint pair are fixed for the lifetime of the
/// validator. Nothing else is kept between calls.
#[derive(Clone)]
pub struct SoapLeadValidator {
    client: Client,
    license_key: String,
    endpoints: EndpointSet,
    timeout: Duration,
    namespace: String,
    action: String,
}

impl SoapLeadValidator {
    /// Creates a validator against the production ServiceObjects hosts.
    pub fn new(license_key: impl Into<String>, is_live: bool) -> Result<Self, LvError> {
        Self::with_config(license_key, is_live, ClientConfig::default())
    }

    /// Creates a validator with custom endpoints, timeout and SOAP contract names.
    pub fn with_config(
        license_key: impl Into<String>,
        is_live: bool,
        config: ClientConfig,
    ) -> Result<Self, LvError> {
        let license_key = license_key.into();
        if license_key.trim().is_empty() {
            return Err(LvError::InvalidRequest(
                "license key cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| LvError::Client(format!("Failed to create SOAP client: {}", e)))?;

        let endpoints = EndpointSet::select(
            is_live,
            &config.soap_primary_url,
            &config.soap_backup_url,
            &config.soap_trial_url,
        );

        Ok(Self {
            client,
            license_key,
            endpoints,
            timeout: config.soap_timeout,
            namespace: config.soap_namespace,
            action: config.soap_action,
        })
    }

    /// Overrides the per-attempt call timeout (15s by default).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-attempt call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns true when calls go to the primary/backup pair.
    pub fn is_live(&self) -> bool {
        self.endpoints.is_live()
    }

    /// Validates a lead, failing over from primary to backup in live mode.
    ///
    /// A SOAP fault, a transport error, a missing result or a result whose
    /// `Error.TypeCode == "3"` triggers the single backup attempt.
    pub async fn validate_lead(&self, request: &LeadRequest) -> Result<LvResult, LvError> {
        let envelope = self.envelope(request);

        attempt_with_failover(
            &self.endpoints,
            |endpoint| self.call(endpoint, &envelope),
            |result: &LvResult| result.fatal_error().cloned(),
        )
        .await
    }

    /// SOAP 1.1 envelope carrying every request field as a named argument.
    fn envelope(&self, request: &LeadRequest) -> String {
        let arguments: String = request
            .query_pairs()
            .into_iter()
            .chain([("LicenseKey", self.license_key.as_str())])
            .map(|(name, value)| format!("<{0}>{1}</{0}>", name, escape(value)))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="{}"><soap:Body><{} xmlns="{}">{}</{}></soap:Body></soap:Envelope>"#,
            SOAP_ENV_NS,
            OPERATION,
            escape(self.namespace.as_str()),
            arguments,
            OPERATION
        )
    }

    async fn call(&self, endpoint: String, envelope: &str) -> Result<Option<LvResult>, LvError> {
        tracing::info!("Calling {} (SOAP) at {}", OPERATION, endpoint);

        let response = self
            .client
            .post(&endpoint)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{}\"", self.action))
            .body(envelope.to_string())
            .send()
            .await
            .map_err(|e| LvError::transport(&endpoint, format!("SOAP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LvError::transport(&endpoint, format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let detail = xml::parse_document(&text)
                .ok()
                .and_then(|doc| fault_message(&doc))
                .unwrap_or_else(|| text.chars().take(200).collect());
            tracing::warn!("LV SOAP returned error {}: {}", status, detail);
            return Err(LvError::transport(
                &endpoint,
                format!("SOAP endpoint returned status {}: {}", status, detail),
            ));
        }

        if text.trim().is_empty() {
            return Ok(None);
        }

        let document = xml::parse_document(&text).map_err(|e| {
            LvError::malformed(&endpoint, format!("Failed to parse SOAP response: {}", e))
        })?;

        if let Some(fault) = fault_message(&document) {
            return Err(LvError::transport(&endpoint, format!("SOAP fault: {}", fault)));
        }

        Ok(document.find(RESULT_ELEMENT).and_then(mapper::from_soap))
    }
}

/// Fault text of a SOAP 1.1 or 1.2 fault, if the document carries one.
fn fault_message(document: &XmlElement) -> Option<String> {
    let fault = document.find("Fault")?;
    let message = fault
        .child_text("faultstring")
        .or_else(|| fault.child("Reason").and_then(|r| r.child_text("Text")))
        .unwrap_or_else(|| "unspecified SOAP fault".to_string());
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(is_live: bool) -> SoapLeadValidator {
        SoapLeadValidator::new("KEY&1", is_live).unwrap()
    }

    #[test]
    fn test_blank_license_key_is_rejected() {
        let err = SoapLeadValidator::new("", true).err().unwrap();
        assert!(matches!(err, LvError::InvalidRequest(_)));
    }

    #[test]
    fn test_default_timeout_and_override() {
        let v = validator(true);
        assert_eq!(v.timeout(), Duration::from_secs(15));
        let v = v.with_timeout(Duration::from_secs(3));
        assert_eq!(v.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_trial_mode_has_no_backup() {
        assert!(validator(true).is_live());
        assert!(!validator(false).is_live());
    }

    #[test]
    fn test_envelope_carries_escaped_named_arguments() {
        let lead = LeadRequest::new("business-noip").with_business_name("Procter & Gamble");
        let envelope = validator(true).envelope(&lead);

        let doc = xml::parse_document(&envelope).unwrap();
        let operation = doc.find(OPERATION).unwrap();
        assert_eq!(
            operation.child_text("BusinessName").as_deref(),
            Some("Procter & Gamble")
        );
        assert_eq!(operation.child_text("LicenseKey").as_deref(), Some("KEY&1"));
        assert_eq!(
            operation.child_text("TestType").as_deref(),
            Some("business-noip")
        );
        assert!(operation.child("Address5").is_some());
    }

    #[test]
    fn test_fault_message_reads_soap11_and_soap12() {
        let soap11 = xml::parse_document(
            r#"<s:Envelope xmlns:s="urn:s"><s:Body><s:Fault><faultcode>s:Server</faultcode><faultstring>boom</faultstring></s:Fault></s:Body></s:Envelope>"#,
        )
        .unwrap();
        assert_eq!(fault_message(&soap11).as_deref(), Some("boom"));

        let soap12 = xml::parse_document(
            r#"<e:Envelope xmlns:e="urn:e"><e:Body><e:Fault><e:Reason><e:Text>bang</e:Text></e:Reason></e:Fault></e:Body></e:Envelope>"#,
        )
        .unwrap();
        assert_eq!(fault_message(&soap12).as_deref(), Some("bang"));
    }
}
