use crate::ports::IpamSource;
use netbox_dns_domain::{DomainError, Zone};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Zones visible to one requester for one query name, in IPAM order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMatch {
    pub zones: Vec<Zone>,
    /// Zero-based position in `zones` of the zone whose view is the
    /// requester's default.
    pub default_index: Option<usize>,
}

impl ZoneMatch {
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn is_default(&self, index: usize) -> bool {
        self.default_index == Some(index)
    }
}

pub struct ZoneMatcher {
    ipam: Arc<dyn IpamSource>,
}

impl ZoneMatcher {
    pub fn new(ipam: Arc<dyn IpamSource>) -> Self {
        Self { ipam }
    }

    #[instrument(skip(self))]
    pub async fn match_zones(&self, qname: &str, client_ip: IpAddr) -> Result<ZoneMatch, DomainError> {
        let managed_zones = self.ipam.get_zones().await?;
        let mut matched = ZoneMatch::default();

        for zone in managed_zones {
            let view = self.ipam.get_view(zone.view_id).await?;

            if !view.contains_ip(client_ip)? {
                debug!(view = %view.name, ip = %client_ip, "View prefixes don't match request IP");
                continue;
            }
            debug!(view = %view.name, ip = %client_ip, "View prefixes match request IP");

            if !zone.contains_name(qname) {
                continue;
            }

            if view.is_default {
                if matched.default_index.is_some() {
                    error!(ip = %client_ip, "More than one default view configured");
                    return Err(DomainError::MultipleDefaultViews(client_ip));
                }
                matched.default_index = Some(matched.zones.len());
            }
            matched.zones.push(zone);
        }

        Ok(matched)
    }
}
