use super::glue_resolver::{glue_types, GlueResolver};
use super::record_converter::{target_name, RecordConverter};
use crate::lookup::{LookupResponse, LookupResult};
use crate::ports::IpamSource;
use hickory_proto::rr::{Name, Record, RecordType};
use netbox_dns_domain::{names, DomainError, RecordQuery, Zone};
use std::sync::Arc;
use tracing::{debug, warn};

/// Follow-up lookups allowed while chasing a CNAME chain.
pub const MAX_CNAME_HOPS: usize = 20;

/// Per-zone resolution strategies. Each returns `Ok(None)` when it has
/// nothing to say, so the caller can move on to the next strategy.
pub struct RecordResolver {
    ipam: Arc<dyn IpamSource>,
    glue: GlueResolver,
}

impl RecordResolver {
    pub fn new(ipam: Arc<dyn IpamSource>) -> Self {
        Self {
            glue: GlueResolver::new(Arc::clone(&ipam)),
            ipam,
        }
    }

    /// SOA and NS queries for the zone apex. Any other type is a no-op.
    pub async fn resolve_origin(
        &self,
        qtype: RecordType,
        zone: &Zone,
    ) -> Result<Option<LookupResponse>, DomainError> {
        let types: &[&str] = match qtype {
            RecordType::SOA => &["SOA", "NS"],
            RecordType::NS => &["NS"],
            _ => return Ok(None),
        };

        let records = self
            .ipam
            .get_records(&RecordQuery::apex(zone.id).with_types(types))
            .await?;
        let records = RecordConverter::to_records(&records, Some(zone))?;

        let soa = filter_by_type(&records, RecordType::SOA);
        let ns = filter_by_type(&records, RecordType::NS);

        let mut additional = self.glue.resolve(&ns, Some(zone), glue_types(qtype)).await?;
        if additional.is_empty() {
            // name servers hosted in another managed zone
            additional = self.glue.resolve(&ns, None, glue_types(qtype)).await?;
        }

        let (answer, authority) = match qtype {
            RecordType::NS => (ns, Vec::new()),
            _ => (soa, ns),
        };

        Ok(Some(LookupResponse {
            answer,
            authority,
            additional,
            result: LookupResult::Success,
        }))
    }

    /// Exact lookup of `qname`, following CNAME chains inside the zone.
    pub async fn resolve_direct(
        &self,
        qname: &str,
        qtype: RecordType,
        zone: &Zone,
    ) -> Result<Option<LookupResponse>, DomainError> {
        let qtype_str = qtype.to_string();
        let mut types = vec![qtype_str.as_str()];
        if matches!(qtype, RecordType::A | RecordType::AAAA) {
            types.push("CNAME");
        }

        let mut answer = self.lookup_exact(qname, &types, zone).await?;
        let mut pending = cname_targets(&answer);
        let mut hops = 0;

        while !pending.is_empty() {
            if hops == MAX_CNAME_HOPS {
                warn!(name = %qname, zone = %zone.name, "CNAME chain too long");
                return Err(DomainError::CnameChainTooLong {
                    name: names::normalize(qname).to_string(),
                    limit: MAX_CNAME_HOPS,
                });
            }
            hops += 1;

            let mut next = Vec::new();
            for target in &pending {
                let found = self.lookup_exact(&target.to_string(), &types, zone).await?;
                next.extend(cname_targets(&found));
                answer.extend(found);
            }
            pending = next;
        }

        if answer.is_empty() {
            return Ok(None);
        }
        if hops > 0 {
            debug!(name = %qname, hops, "Followed CNAME chain");
        }

        // Targets already answered by the chain need no glue.
        let unresolved: Vec<Record> = answer
            .iter()
            .filter(|r| target_name(r).is_some_and(|t| !answer.iter().any(|a| a.name() == t)))
            .cloned()
            .collect();
        let mut additional = self.glue.resolve(&unresolved, Some(zone), glue_types(qtype)).await?;

        let has_cname = answer.iter().any(|r| r.record_type() == RecordType::CNAME);
        if has_cname && qtype != RecordType::CNAME {
            answer.append(&mut additional);
        }

        Ok(Some(LookupResponse {
            answer,
            authority: Vec::new(),
            additional,
            result: LookupResult::Success,
        }))
    }

    /// NS records at `qname` itself mark the apex of a delegated sub-zone.
    pub async fn resolve_delegate(
        &self,
        qname: &str,
        qtype: RecordType,
        zone: &Zone,
    ) -> Result<Option<LookupResponse>, DomainError> {
        let authority = self.lookup_exact(qname, &["NS"], zone).await?;
        if authority.is_empty() {
            return Ok(None);
        }

        // delegated servers usually live outside the parent zone
        let additional = self.glue.resolve(&authority, None, glue_types(qtype)).await?;

        Ok(Some(LookupResponse {
            answer: Vec::new(),
            authority,
            additional,
            result: LookupResult::Delegation,
        }))
    }

    async fn lookup_exact(
        &self,
        name: &str,
        types: &[&str],
        zone: &Zone,
    ) -> Result<Vec<Record>, DomainError> {
        let query = RecordQuery::fqdn(name)
            .with_types(types)
            .in_zone(Some(zone.id));
        let records = self.ipam.get_records(&query).await?;
        RecordConverter::to_records(&records, Some(zone))
    }
}

fn filter_by_type(records: &[Record], record_type: RecordType) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.record_type() == record_type)
        .cloned()
        .collect()
}

fn cname_targets(records: &[Record]) -> Vec<Name> {
    records
        .iter()
        .filter(|r| r.record_type() == RecordType::CNAME)
        .filter_map(target_name)
        .cloned()
        .collect()
}
