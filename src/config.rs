use std::time::Duration;

pub const REST_PRIMARY_URL: &str = "https://sws.serviceobjects.com/lv/api.svc/json";
pub const REST_BACKUP_URL: &str = "https://swsbackup.serviceobjects.com/lv/api.svc/json";
pub const REST_TRIAL_URL: &str = "https://trial.serviceobjects.com/lv/api.svc/json";

pub const SOAP_PRIMARY_URL: &str = "https://sws.serviceobjects.com/LV/soap.svc/SOAP";
pub const SOAP_BACKUP_URL: &str = "https://swsbackup.serviceobjects.com/LV/soap.svc/SOAP";
pub const SOAP_TRIAL_URL: &str = "https://trial.serviceobjects.com/LV/soap.svc/SOAP";

pub const SOAP_NAMESPACE: &str = "https://www.serviceobjects.com";
pub const SOAP_ACTION: &str = "https://www.serviceobjects.com/ILVSoapService/ValidateLead_V3";

/// Endpoint addresses and timeouts used by both validators.
///
/// `Default` targets the production ServiceObjects hosts. Nothing here is read
/// from the environment; callers (and tests) construct it explicitly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rest_primary_url: String,
    pub rest_backup_url: String,
    pub rest_trial_url: String,
    pub soap_primary_url: String,
    pub soap_backup_url: String,
    pub soap_trial_url: String,
    pub rest_timeout: Duration,
    pub soap_timeout: Duration,
    pub soap_namespace: String,
    pub soap_action: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rest_primary_url: REST_PRIMARY_URL.to_string(),
            rest_backup_url: REST_BACKUP_URL.to_string(),
            rest_trial_url: REST_TRIAL_URL.to_string(),
            soap_primary_url: SOAP_PRIMARY_URL.to_string(),
            soap_backup_url: SOAP_BACKUP_URL.to_string(),
            soap_trial_url: SOAP_TRIAL_URL.to_string(),
            rest_timeout: Duration::from_secs(10),
            soap_timeout: Duration::from_secs(15),
            soap_namespace: SOAP_NAMESPACE.to_string(),
            soap_action: SOAP_ACTION.to_string(),
        }
    }
}

/// Settings for the `validate-lead` demo binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub license_key: String,
    pub is_live: bool,
    pub client: ClientConfig,
}

impl Config {
    /// Loads the demo settings from the environment (and `.env`, if present).
    ///
    /// `LV_REST_BASE_URL` / `LV_SOAP_BASE_URL` replace every REST / SOAP
    /// endpoint with a single host, which is handy against a local stub.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let license_key = std::env::var("LV_LICENSE_KEY")
            .map_err(|_| anyhow::anyhow!("LV_LICENSE_KEY environment variable required"))
            .and_then(|key| {
                if key.trim().is_empty() {
                    anyhow::bail!("LV_LICENSE_KEY cannot be empty");
                }
                Ok(key)
            })?;

        let is_live = match std::env::var("LV_IS_LIVE") {
            Ok(v) => v
                .trim()
                .parse::<bool>()
                .map_err(|_| anyhow::anyhow!("LV_IS_LIVE must be true or false"))?,
            Err(_) => false,
        };

        let mut client = ClientConfig::default();
        if let Some(base) = base_url_override("LV_REST_BASE_URL")? {
            client.rest_primary_url = base.clone();
            client.rest_backup_url = base.clone();
            client.rest_trial_url = base;
        }
        if let Some(base) = base_url_override("LV_SOAP_BASE_URL")? {
            client.soap_primary_url = base.clone();
            client.soap_backup_url = base.clone();
            client.soap_trial_url = base;
        }

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Live mode: {}", is_live);
        tracing::debug!("REST primary URL: {}", client.rest_primary_url);
        tracing::debug!("SOAP primary URL: {}", client.soap_primary_url);

        Ok(Self {
            license_key,
            is_live,
            client,
        })
    }
}

fn base_url_override(var: &str) -> anyhow::Result<Option<String>> {
    let Some(raw) = std::env::var(var).ok().filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    let parsed =
        url::Url::parse(&raw).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", var, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", var);
    }
    Ok(Some(raw.trim_end_matches('/').to_string()))
}
