use hickory_proto::rr::{Record, RecordType};
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub client_ip: IpAddr,
}

impl DnsRequest {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType, client_ip: IpAddr) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            client_ip,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupResult {
    #[default]
    Success,
    /// No managed zone visible to the requester contains the name.
    NameError,
    /// The name is the apex of a sub-zone served elsewhere.
    Delegation,
}

/// Sections of a DNS reply plus the classification that frames it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupResponse {
    pub answer: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
    pub result: LookupResult,
}

impl LookupResponse {
    pub fn name_error() -> Self {
        Self {
            result: LookupResult::NameError,
            ..Self::default()
        }
    }

    pub fn is_authoritative(&self) -> bool {
        self.result != LookupResult::Delegation
    }
}
