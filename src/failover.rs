//! Primary/backup failover shared by the REST and SOAP validators.
//!
//! Attempts run strictly in sequence so a request is never billed twice in
//! parallel. An attempt fails when the call errors, when it yields nothing,
//! or when the fatal-check predicate flags the payload. Anything else,
//! including advisory service errors, is accepted as is.

use crate::errors::LvError;
use crate::models::ServiceError;
use std::future::Future;

/// Ordered endpoints for one call: `[primary, backup]` live, `[trial]` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    primary: String,
    backup: Option<String>,
}

impl EndpointSet {
    /// Primary with one backup.
    pub fn live(primary: impl Into<String>, backup: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            backup: Some(backup.into()),
        }
    }

    /// Single trial endpoint, no backup.
    pub fn trial(url: impl Into<String>) -> Self {
        Self {
            primary: url.into(),
            backup: None,
        }
    }

    /// Picks `[primary, backup]` or `[trial]` for the given mode.
    pub fn select(is_live: bool, primary: &str, backup: &str, trial: &str) -> Self {
        if is_live {
            Self::live(primary, backup)
        } else {
            Self::trial(trial)
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn backup(&self) -> Option<&str> {
        self.backup.as_deref()
    }

    /// Returns true when a backup endpoint is configured.
    pub fn is_live(&self) -> bool {
        self.backup.is_some()
    }
}

/// Runs `call` against each endpoint in order until one is accepted.
///
/// `call` receives the endpoint and returns `Ok(None)` for an empty response.
/// `is_fatal` inspects a decoded payload and returns the service error that
/// makes it unusable, if any.
///
/// Live mode retries exactly once on the backup and fails with
/// [`LvError::BothEndpointsFailed`] if that also fails. Trial mode never
/// retries; its failure comes back as [`LvError::TrialTerminal`].
pub async fn attempt_with_failover<T, F, Fut, P>(
    endpoints: &EndpointSet,
    mut call: F,
    is_fatal: P,
) -> Result<T, LvError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Option<T>, LvError>>,
    P: Fn(&T) -> Option<ServiceError>,
{
    let primary_err = match attempt(endpoints.primary(), &mut call, &is_fatal).await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(backup) = endpoints.backup() else {
        tracing::warn!("Trial endpoint failed, not retrying: {}", primary_err);
        return Err(LvError::TrialTerminal(Box::new(primary_err)));
    };

    tracing::warn!(
        "Primary endpoint failed ({}), falling back to {}",
        primary_err,
        backup
    );

    match attempt(backup, &mut call, &is_fatal).await {
        Ok(value) => {
            tracing::info!("✓ Backup endpoint answered");
            Ok(value)
        }
        Err(backup_err) => {
            tracing::error!(
                "Both endpoints failed. Primary: {} | Backup: {}",
                primary_err,
                backup_err
            );
            Err(LvError::BothEndpointsFailed {
                primary: Box::new(primary_err),
                backup: Box::new(backup_err),
            })
        }
    }
}

async fn attempt<T, F, Fut, P>(endpoint: &str, call: &mut F, is_fatal: &P) -> Result<T, LvError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Option<T>, LvError>>,
    P: Fn(&T) -> Option<ServiceError>,
{
    let value = call(endpoint.to_string())
        .await?
        .ok_or_else(|| LvError::EmptyResponse {
            endpoint: endpoint.to_string(),
        })?;

    match is_fatal(&value) {
        Some(error) => Err(LvError::ServiceFatal {
            endpoint: endpoint.to_string(),
            error,
        }),
        None => Ok(value),
    }
}
