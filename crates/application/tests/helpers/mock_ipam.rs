#![allow(dead_code)]

use async_trait::async_trait;
use netbox_dns_application::ports::IpamSource;
use netbox_dns_domain::{
    names, AddressPrefix, DomainError, IpamRecord, RecordOwner, RecordQuery, View, Zone,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory IPAM with NetBox filter semantics.
#[derive(Clone, Default)]
pub struct MockIpamSource {
    zones: Arc<RwLock<Vec<Zone>>>,
    views: Arc<RwLock<HashMap<i64, View>>>,
    records: Arc<RwLock<Vec<IpamRecord>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
    record_queries: Arc<RwLock<Vec<RecordQuery>>>,
    view_calls: Arc<AtomicUsize>,
}

impl MockIpamSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_view(&self, id: i64, name: &str, prefixes: &[&str], is_default: bool) {
        let prefixes = prefixes.iter().map(|p| AddressPrefix::new(*p)).collect();
        let view = View::new(id, name, prefixes).with_default(is_default);
        self.views.write().await.insert(id, view);
    }

    pub async fn add_zone(&self, id: i64, name: &str, view_id: i64) -> Zone {
        let zone = Zone::new(id, name, view_id);
        self.zones.write().await.push(zone.clone());
        zone
    }

    /// `name` is relative to the zone; `@` is the apex.
    pub async fn add_record(&self, zone: &Zone, name: &str, record_type: &str, value: &str) {
        let fqdn = if name == "@" {
            names::to_fqdn(&zone.name)
        } else {
            format!("{}.{}.", name, zone.name)
        };
        let record = IpamRecord::new(&fqdn, record_type, value).with_zone(zone.id, &zone.name);
        self.records.write().await.push(record);
    }

    pub async fn fail_with(&self, error: DomainError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn record_queries(&self) -> Vec<RecordQuery> {
        self.record_queries.read().await.clone()
    }

    pub fn view_calls(&self) -> usize {
        self.view_calls.load(Ordering::Relaxed)
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn owner_matches(record: &IpamRecord, owner: &RecordOwner) -> bool {
    let fqdn = names::normalize(&record.fqdn);
    match owner {
        RecordOwner::Apex => record.zone_name().is_some_and(|z| z == fqdn),
        RecordOwner::Fqdn(name) => fqdn.eq_ignore_ascii_case(name),
    }
}

#[async_trait]
impl IpamSource for MockIpamSource {
    async fn get_zones(&self) -> Result<Vec<Zone>, DomainError> {
        self.check_failure().await?;
        Ok(self.zones.read().await.clone())
    }

    async fn get_view(&self, id: i64) -> Result<View, DomainError> {
        self.check_failure().await?;
        self.view_calls.fetch_add(1, Ordering::Relaxed);
        self.views
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::IpamTransport(format!("view {} not found", id)))
    }

    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<IpamRecord>, DomainError> {
        self.check_failure().await?;
        self.record_queries.write().await.push(query.clone());

        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| query.zone_id.is_none_or(|id| r.zone.as_ref().is_some_and(|z| z.id == id)))
            .filter(|r| owner_matches(r, &query.owner))
            .filter(|r| query.accepts_type(&r.record_type))
            .cloned()
            .collect())
    }
}
