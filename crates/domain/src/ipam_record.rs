use std::sync::Arc;

/// The zone a record belongs to, as embedded in NetBox record objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRef {
    pub id: i64,
    pub name: Arc<str>,
}

/// A resource record as stored in NetBox.
///
/// `value` is NetBox-relative: names inside it that do not end in a dot
/// belong to the record's zone and are completed before wire conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpamRecord {
    pub id: i64,
    pub fqdn: Arc<str>,
    pub record_type: Arc<str>,
    pub value: Arc<str>,
    pub ttl: Option<u32>,
    pub zone: Option<ZoneRef>,
}

impl IpamRecord {
    pub fn new(fqdn: &str, record_type: &str, value: &str) -> Self {
        Self {
            id: 0,
            fqdn: Arc::from(fqdn),
            record_type: Arc::from(record_type),
            value: Arc::from(value),
            ttl: None,
            zone: None,
        }
    }

    pub fn with_zone(mut self, id: i64, name: &str) -> Self {
        self.zone = Some(ZoneRef {
            id,
            name: Arc::from(name),
        });
        self
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Name of the owning zone. A nested zone reference without a name
    /// counts as no name at all.
    pub fn zone_name(&self) -> Option<&str> {
        self.zone
            .as_ref()
            .map(|z| z.name.as_ref())
            .filter(|name| !name.is_empty())
    }
}
