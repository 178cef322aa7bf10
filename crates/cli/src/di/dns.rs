use netbox_dns_application::ports::IpamSource;
use netbox_dns_application::use_cases::ResolveQueryUseCase;
use netbox_dns_domain::Config;
use netbox_dns_infrastructure::dns::DnsServerHandler;
use netbox_dns_infrastructure::netbox::{CachedIpamSource, NetboxClient};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        info!(url = %config.netbox.url, timeout_secs = config.netbox.timeout_secs, "Initializing NetBox client");

        let ipam = Self::build_ipam_source(config)?;
        let use_case = Arc::new(ResolveQueryUseCase::new(ipam));

        info!(zones = ?config.dns.zones, fallthrough = config.dns.fallthrough.enabled, "DNS handler configured");
        let handler = DnsServerHandler::new(use_case, config.dns.clone(), shutdown);

        Ok(Self { handler })
    }

    fn build_ipam_source(config: &Config) -> anyhow::Result<Arc<dyn IpamSource>> {
        let client: Arc<dyn IpamSource> = Arc::new(NetboxClient::new(&config.netbox)?);

        if !config.cache.enabled {
            return Ok(client);
        }

        info!(ttl_secs = config.cache.ttl_secs, "Zone and view cache enabled");
        Ok(Arc::new(CachedIpamSource::new(
            client,
            Duration::from_secs(config.cache.ttl_secs),
        )))
    }
}
