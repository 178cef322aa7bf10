use crate::DomainError;
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPrefix {
    pub id: Option<i64>,
    pub prefix: Arc<str>,
}

impl AddressPrefix {
    pub fn new(prefix: impl Into<Arc<str>>) -> Self {
        Self {
            id: None,
            prefix: prefix.into(),
        }
    }

    pub fn network(&self) -> Result<IpNetwork, DomainError> {
        self.prefix
            .parse::<IpNetwork>()
            .map_err(|e| DomainError::InvalidCidr(format!("{}: {}", self.prefix, e)))
    }

    /// Family-aware containment: an IPv4 address never matches an IPv6
    /// prefix and vice versa.
    pub fn contains(&self, ip: IpAddr) -> Result<bool, DomainError> {
        Ok(self.network()?.contains(ip))
    }
}

/// A NetBox DNS view: the set of requester prefixes allowed to see the
/// zones it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub id: i64,
    pub name: Arc<str>,
    pub prefixes: Vec<AddressPrefix>,
    pub is_default: bool,
}

impl View {
    pub fn new(id: i64, name: impl Into<Arc<str>>, prefixes: Vec<AddressPrefix>) -> Self {
        Self {
            id,
            name: name.into(),
            prefixes,
            is_default: false,
        }
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Returns true on the first prefix containing `ip`. A malformed prefix
    /// is an error even when an earlier prefix would have matched later on.
    /// IPv4-mapped IPv6 addresses are matched as IPv4.
    pub fn contains_ip(&self, ip: IpAddr) -> Result<bool, DomainError> {
        let ip = ip.to_canonical();
        for prefix in &self.prefixes {
            if prefix.contains(ip)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
