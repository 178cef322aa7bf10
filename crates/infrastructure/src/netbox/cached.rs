use async_trait::async_trait;
use dashmap::DashMap;
use netbox_dns_application::ports::IpamSource;
use netbox_dns_domain::{DomainError, IpamRecord, RecordQuery, View, Zone};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

struct Cached<T> {
    value: T,
    stored_at: Instant,
}

impl<T> Cached<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Read-through cache for the zone list and views. Record lookups always go
/// to the wrapped source.
pub struct CachedIpamSource {
    inner: Arc<dyn IpamSource>,
    ttl: Duration,
    zones: RwLock<Option<Cached<Vec<Zone>>>>,
    views: DashMap<i64, Cached<View>, FxBuildHasher>,
}

impl CachedIpamSource {
    pub fn new(inner: Arc<dyn IpamSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            zones: RwLock::new(None),
            views: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub async fn invalidate(&self) {
        *self.zones.write().await = None;
        self.views.clear();
    }
}

#[async_trait]
impl IpamSource for CachedIpamSource {
    async fn get_zones(&self) -> Result<Vec<Zone>, DomainError> {
        if let Some(cached) = self.zones.read().await.as_ref() {
            if cached.is_fresh(self.ttl) {
                return Ok(cached.value.clone());
            }
        }

        let zones = self.inner.get_zones().await?;
        *self.zones.write().await = Some(Cached::new(zones.clone()));
        Ok(zones)
    }

    async fn get_view(&self, id: i64) -> Result<View, DomainError> {
        if let Some(cached) = self.views.get(&id) {
            if cached.is_fresh(self.ttl) {
                debug!(view_id = id, "View cache HIT");
                return Ok(cached.value.clone());
            }
        }

        let view = self.inner.get_view(id).await?;
        self.views.insert(id, Cached::new(view.clone()));
        Ok(view)
    }

    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<IpamRecord>, DomainError> {
        self.inner.get_records(query).await
    }
}
