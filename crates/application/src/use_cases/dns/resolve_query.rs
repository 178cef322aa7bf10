use crate::lookup::{DnsRequest, LookupResponse};
use crate::ports::IpamSource;
use crate::services::{RecordResolver, ZoneMatcher};
use netbox_dns_domain::{DomainError, Zone};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Answers one query from the zones visible to the requester.
///
/// Zones are tried in IPAM order. The first answer from the requester's
/// default view wins outright; otherwise the answer from the last zone that
/// produced one is used.
pub struct ResolveQueryUseCase {
    zone_matcher: ZoneMatcher,
    records: RecordResolver,
}

impl ResolveQueryUseCase {
    pub fn new(ipam: Arc<dyn IpamSource>) -> Self {
        Self {
            zone_matcher: ZoneMatcher::new(Arc::clone(&ipam)),
            records: RecordResolver::new(ipam),
        }
    }

    #[instrument(skip(self, request), fields(domain = %request.domain, record_type = %request.record_type, client = %request.client_ip))]
    pub async fn execute(&self, request: &DnsRequest) -> Result<LookupResponse, DomainError> {
        let matched = self
            .zone_matcher
            .match_zones(&request.domain, request.client_ip)
            .await?;

        if matched.is_empty() {
            debug!("No managed zone matches");
            return Ok(LookupResponse::name_error());
        }

        let mut fallback = None;

        for (index, zone) in matched.zones.iter().enumerate() {
            let response = match self.resolve_in_zone(request, zone).await {
                Ok(Some(response)) => response,
                Ok(None) => continue,
                Err(e) if e.is_record_data_error() => {
                    debug!(zone = %zone.name, error = %e, "Skipping zone with unusable record data");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if matched.is_default(index) {
                debug!(zone = %zone.name, "Answered from default view");
                return Ok(response);
            }
            fallback = Some(response);
        }

        fallback.ok_or_else(|| {
            error!("No matching zone produced an answer");
            DomainError::Unresolvable(request.domain.to_string())
        })
    }

    async fn resolve_in_zone(
        &self,
        request: &DnsRequest,
        zone: &Zone,
    ) -> Result<Option<LookupResponse>, DomainError> {
        let qname = request.domain.as_ref();
        let qtype = request.record_type;

        if !zone.is_origin(qname) {
            if let Some(response) = self.records.resolve_direct(qname, qtype, zone).await? {
                return Ok(Some(response));
            }
            return self.records.resolve_delegate(qname, qtype, zone).await;
        }

        if let Some(response) = self.records.resolve_origin(qtype, zone).await? {
            return Ok(Some(response));
        }
        if let Some(response) = self.records.resolve_direct(qname, qtype, zone).await? {
            return Ok(Some(response));
        }

        // The apex NS set belongs to this zone, not to a delegation.
        debug!(zone = %zone.name, record_type = %qtype, "No data at zone apex");
        Ok(Some(LookupResponse::default()))
    }
}
