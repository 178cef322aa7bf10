use super::dto::{Page, RecordDto, ViewDto, ZoneDto};
use async_trait::async_trait;
use netbox_dns_application::ports::IpamSource;
use netbox_dns_domain::config::NetboxConfig;
use netbox_dns_domain::{names, DomainError, IpamRecord, RecordOwner, RecordQuery, View, Zone};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// `IpamSource` backed by the NetBox DNS plugin REST API.
pub struct NetboxClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl NetboxClient {
    pub fn new(config: &NetboxConfig) -> Result<Self, DomainError> {
        let base_url = parse_base_url(&config.url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        match config.resolved_token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Token {}", token))
                    .map_err(|e| DomainError::ConfigError(format!("Invalid NetBox token: {}", e)))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => warn!("No NetBox token configured, requests are anonymous"),
        }

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        self.base_url
            .join(path)
            .map_err(|e| DomainError::ConfigError(format!("Invalid NetBox path '{}': {}", path, e)))
    }

    fn list_endpoint(&self, path: &str) -> Result<Url, DomainError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut()
            .append_pair("limit", &self.page_size.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, DomainError> {
        debug!(url = %url, "NetBox request");

        let response = self.http.get(url.clone()).send().await.map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::IpamTransport(format!(
                "GET {} returned {}",
                url.path(),
                status
            )));
        }

        let body = response.bytes().await.map_err(map_http_error)?;
        serde_json::from_slice(&body)
            .map_err(|e| DomainError::IpamDecode(format!("{}: {}", url.path(), e)))
    }

    /// Follows `next` links until the listing is exhausted.
    async fn get_all<T: DeserializeOwned>(&self, first: Url) -> Result<Vec<T>, DomainError> {
        let mut items = Vec::new();
        let mut url = Some(first);

        while let Some(current) = url {
            let page: Page<T> = self.get_json(current).await?;
            items.extend(page.results);

            url = page
                .next
                .map(|next| {
                    Url::parse(&next)
                        .map_err(|e| DomainError::IpamDecode(format!("Invalid next link '{}': {}", next, e)))
                })
                .transpose()?;
        }

        Ok(items)
    }
}

#[async_trait]
impl IpamSource for NetboxClient {
    async fn get_zones(&self) -> Result<Vec<Zone>, DomainError> {
        let url = self.list_endpoint("zones/")?;
        let zones: Vec<ZoneDto> = self.get_all(url).await?;
        debug!(count = zones.len(), "Fetched managed zones");
        Ok(zones.into_iter().map(Zone::from).collect())
    }

    async fn get_view(&self, id: i64) -> Result<View, DomainError> {
        let url = self.endpoint(&format!("views/{}/", id))?;
        let view: ViewDto = self.get_json(url).await?;
        Ok(view.into())
    }

    async fn get_records(&self, query: &RecordQuery) -> Result<Vec<IpamRecord>, DomainError> {
        let mut url = self.list_endpoint("records/")?;
        {
            let mut pairs = url.query_pairs_mut();
            match &query.owner {
                RecordOwner::Apex => pairs.append_pair("name", "@"),
                RecordOwner::Fqdn(name) => pairs.append_pair("fqdn", &names::to_fqdn(name)),
            };
            if let Some(zone_id) = query.zone_id {
                pairs.append_pair("zone_id", &zone_id.to_string());
            }
            for record_type in &query.types {
                pairs.append_pair("type", record_type);
            }
        }

        let records: Vec<RecordDto> = self.get_all(url).await?;
        Ok(records
            .into_iter()
            .filter(RecordDto::is_active)
            .map(IpamRecord::from)
            .collect())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, DomainError> {
    let mut url = Url::parse(raw)
        .map_err(|e| DomainError::ConfigError(format!("Invalid NetBox URL '{}': {}", raw, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn map_http_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::QueryTimeout
    } else if e.is_decode() {
        DomainError::IpamDecode(e.to_string())
    } else {
        DomainError::IpamTransport(e.to_string())
    }
}
