use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Unknown record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid {record_type} record data for {name}: {reason}")]
    InvalidRecordData {
        name: String,
        record_type: String,
        reason: String,
    },

    #[error("Configuration error: more than one default view configured for IP {0}")]
    MultipleDefaultViews(IpAddr),

    #[error("CNAME chain for {name} exceeds {limit} hops")]
    CnameChainTooLong { name: String, limit: usize },

    #[error("Could not resolve any records for request {0}")]
    Unresolvable(String),

    #[error("IPAM request failed: {0}")]
    IpamTransport(String),

    #[error("IPAM response could not be decoded: {0}")]
    IpamDecode(String),

    #[error("IPAM request timed out")]
    QueryTimeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Errors caused by one malformed record. They abort resolution for the
    /// zone the record came from; every other error aborts the whole query.
    pub fn is_record_data_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidRecordType(_) | DomainError::InvalidRecordData { .. }
        )
    }
}
