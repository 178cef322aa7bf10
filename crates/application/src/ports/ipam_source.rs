use async_trait::async_trait;
use netbox_dns_domain::{DomainError, IpamRecord, RecordQuery, View, Zone};

/// Read access to the IPAM system holding the zone data.
///
/// Every call is an independent read; a transport or decode failure fails
/// the whole call, there is no partial result.
#[async_trait]
pub trait IpamSource: Send + Sync {
    async fn get_zones(&self) -> Result<Vec<Zone>, DomainError>;

    async fn get_view(&self, id: i64) -> Result<View, DomainError>;

    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<IpamRecord>, DomainError>;
}
