use crate::models::ServiceError;
use std::fmt;

/// Errors raised by the lead validation clients.
///
/// Per-attempt failures (`Transport`, `MalformedResponse`, `EmptyResponse`,
/// `ServiceFatal`) are consumed by the failover policy and only reach the
/// caller wrapped in `BothEndpointsFailed` or `TrialTerminal`.
#[derive(Debug, Clone)]
pub enum LvError {
    /// The request was rejected before any network call.
    InvalidRequest(String),
    /// The HTTP client could not be constructed.
    Client(String),
    /// Network, HTTP status or SOAP fault while talking to an endpoint.
    Transport { endpoint: String, message: String },
    /// The endpoint answered with a body that could not be decoded.
    MalformedResponse { endpoint: String, message: String },
    /// The endpoint answered with no result at all.
    EmptyResponse { endpoint: String },
    /// The endpoint reported `Error.TypeCode == "3"`.
    ServiceFatal {
        endpoint: String,
        error: ServiceError,
    },
    /// Live mode: primary and backup both failed.
    BothEndpointsFailed {
        primary: Box<LvError>,
        backup: Box<LvError>,
    },
    /// Trial mode: the single trial endpoint failed. Never retried.
    TrialTerminal(Box<LvError>),
}

impl LvError {
    /// Per-attempt network, status or fault failure at `endpoint`.
    pub fn transport(endpoint: &str, message: impl fmt::Display) -> Self {
        LvError::Transport {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    /// Per-attempt failure to decode the body returned by `endpoint`.
    pub fn malformed(endpoint: &str, message: impl fmt::Display) -> Self {
        LvError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns true if the error is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, LvError::Transport { .. })
    }

    /// Returns true if the error ended a trial-mode call.
    pub fn is_trial_terminal(&self) -> bool {
        matches!(self, LvError::TrialTerminal(_))
    }

    /// Returns true if both live endpoints failed.
    pub fn is_both_failed(&self) -> bool {
        matches!(self, LvError::BothEndpointsFailed { .. })
    }
}

impl fmt::Display for LvError {
    /// Formats the error with its endpoint and, for wrapped failures, every cause.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LvError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            LvError::Client(msg) => write!(f, "HTTP client error: {}", msg),
            LvError::Transport { endpoint, message } => {
                write!(f, "Transport error at {}: {}", endpoint, message)
            }
            LvError::MalformedResponse { endpoint, message } => {
                write!(f, "Malformed response from {}: {}", endpoint, message)
            }
            LvError::EmptyResponse { endpoint } => {
                write!(f, "Empty response from {}", endpoint)
            }
            LvError::ServiceFatal { endpoint, error } => {
                write!(f, "Fatal service error at {}: {}", endpoint, error)
            }
            LvError::BothEndpointsFailed { primary, backup } => write!(
                f,
                "LeadValidation service unreachable on both endpoints. Primary error: {}. Backup error: {}",
                primary, backup
            ),
            LvError::TrialTerminal(cause) => write!(f, "LeadValidation trial error: {}", cause),
        }
    }
}

impl std::error::Error for LvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LvError::BothEndpointsFailed { backup, .. } => Some(backup.as_ref()),
            LvError::TrialTerminal(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}
