//! Lead Validation Client Library
//!
//! Client for the ServiceObjects Lead Validation `ValidateLead_V3` operation
//! over REST/JSON and SOAP/XML. Both bindings try a primary endpoint and fall
//! back once to a backup endpoint in live mode; trial mode uses a single
//! endpoint and never retries.
//!
//! # Modules
//!
//! - `config`: Endpoint addresses, timeouts and demo settings.
//! - `errors`: Error handling types.
//! - `failover`: Primary/backup failover policy shared by both bindings.
//! - `mapper`: Raw payload to `LvResult` mapping.
//! - `models`: Request and result data models.
//! - `rest`: REST/JSON validator.
//! - `soap`: SOAP/XML validator.
//! - `xml`: Minimal XML tree used to read SOAP responses.

pub mod config;
pub mod errors;
pub mod failover;
pub mod mapper;
pub mod models;
pub mod rest;
pub mod soap;
pub mod xml;

pub use config::ClientConfig;
pub use errors::LvError;
pub use models::{InformationComponent, LeadRequest, LvResult, PhoneContact, ServiceError};
pub use rest::RestLeadValidator;
pub use soap::SoapLeadValidator;
