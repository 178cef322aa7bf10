use super::record_converter::{target_name, RecordConverter};
use crate::ports::IpamSource;
use hickory_proto::rr::{Record, RecordType};
use netbox_dns_domain::{names, DomainError, RecordQuery, Zone};
use std::sync::Arc;
use tracing::debug;

/// Address types worth fetching as glue for a query of `qtype`: the query's
/// own family for A/AAAA, both families otherwise.
pub fn glue_types(qtype: RecordType) -> &'static [&'static str] {
    match qtype {
        RecordType::A => &["A"],
        RecordType::AAAA => &["AAAA"],
        _ => &["A", "AAAA"],
    }
}

/// Fetches address records for the names that NS, CNAME, MX and SRV
/// records point at.
pub struct GlueResolver {
    ipam: Arc<dyn IpamSource>,
}

impl GlueResolver {
    pub fn new(ipam: Arc<dyn IpamSource>) -> Self {
        Self { ipam }
    }

    /// One lookup per referencing record, in input order. Targets referenced
    /// twice are looked up twice. Without a `zone` the lookup spans every
    /// managed zone.
    pub async fn resolve(
        &self,
        records: &[Record],
        zone: Option<&Zone>,
        types: &[&str],
    ) -> Result<Vec<Record>, DomainError> {
        let mut glue = Vec::new();

        for record in records {
            let Some(target) = target_name(record) else {
                continue;
            };
            let target = target.to_string();
            let query = RecordQuery::fqdn(names::normalize(&target))
                .with_types(types)
                .in_zone(zone.map(|z| z.id));

            let found = self.ipam.get_records(&query).await?;
            debug!(target = %target, found = found.len(), scoped = zone.is_some(), "Glue lookup");

            glue.extend(RecordConverter::to_records(&found, zone)?);
        }

        Ok(glue)
    }
}
