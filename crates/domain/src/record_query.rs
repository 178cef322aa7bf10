use crate::names;
use std::sync::Arc;

/// Owner-name filter of a record lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOwner {
    /// The zone apex, written `@` in NetBox.
    Apex,
    /// An exact fully-qualified name, stored without the trailing dot.
    Fqdn(Arc<str>),
}

/// A record lookup against the IPAM source. Without a zone scope the lookup
/// searches every managed zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub owner: RecordOwner,
    pub types: Vec<Arc<str>>,
    pub zone_id: Option<i64>,
}

impl RecordQuery {
    pub fn apex(zone_id: i64) -> Self {
        Self {
            owner: RecordOwner::Apex,
            types: Vec::new(),
            zone_id: Some(zone_id),
        }
    }

    pub fn fqdn(name: &str) -> Self {
        Self {
            owner: RecordOwner::Fqdn(Arc::from(names::normalize(name))),
            types: Vec::new(),
            zone_id: None,
        }
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| Arc::from(*t)).collect();
        self
    }

    pub fn in_zone(mut self, zone_id: Option<i64>) -> Self {
        self.zone_id = zone_id;
        self
    }

    pub fn accepts_type(&self, mnemonic: &str) -> bool {
        self.types.is_empty() || self.types.iter().any(|t| t.eq_ignore_ascii_case(mnemonic))
    }
}
