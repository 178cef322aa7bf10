//! Wire shapes of the NetBox DNS plugin REST API.

use netbox_dns_domain::{AddressPrefix, IpamRecord, View, Zone, ZoneRef};
use serde::Deserialize;
use std::sync::Arc;

/// One page of a NetBox list endpoint. The advertised `count` is ignored;
/// paging stops when `next` is absent.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    /// Absolute URL of the following page.
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct NestedRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ZoneDto {
    pub id: i64,
    pub name: String,
    pub view: NestedRef,
    #[serde(default)]
    pub default_ttl: Option<u32>,
}

impl From<ZoneDto> for Zone {
    fn from(dto: ZoneDto) -> Self {
        let zone = Zone::new(dto.id, &dto.name, dto.view.id);
        match dto.default_ttl {
            Some(ttl) => zone.with_default_ttl(ttl),
            None => zone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PrefixDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub prefixes: Vec<PrefixDto>,
    #[serde(default, alias = "default")]
    pub default_view: bool,
}

impl From<ViewDto> for View {
    fn from(dto: ViewDto) -> Self {
        let prefixes = dto
            .prefixes
            .into_iter()
            .map(|p| AddressPrefix {
                id: p.id,
                prefix: Arc::from(p.prefix),
            })
            .collect();
        View::new(dto.id, dto.name, prefixes).with_default(dto.default_view)
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordDto {
    pub id: i64,
    pub fqdn: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub zone: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RecordDto {
    /// Records without a status predate the field and are served.
    pub fn is_active(&self) -> bool {
        self.status.as_deref().is_none_or(|s| s == "active")
    }
}

impl From<RecordDto> for IpamRecord {
    fn from(dto: RecordDto) -> Self {
        IpamRecord {
            id: dto.id,
            fqdn: Arc::from(dto.fqdn),
            record_type: Arc::from(dto.record_type),
            value: Arc::from(dto.value),
            ttl: dto.ttl,
            zone: dto.zone.map(|z| ZoneRef {
                id: z.id,
                name: Arc::from(z.name.unwrap_or_default()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_decodes_default_flag_and_prefixes() {
        let json = r#"{
            "id": 3,
            "name": "internal",
            "default_view": true,
            "prefixes": [{"id": 7, "prefix": "10.0.0.0/8", "display": "10.0.0.0/8"}]
        }"#;

        let view: View = serde_json::from_str::<ViewDto>(json).unwrap().into();

        assert!(view.is_default);
        assert_eq!(view.prefixes.len(), 1);
        assert_eq!(view.prefixes[0].id, Some(7));
        assert_eq!(view.prefixes[0].prefix.as_ref(), "10.0.0.0/8");
    }

    #[test]
    fn test_view_without_prefixes() {
        let view: View = serde_json::from_str::<ViewDto>(r#"{"id": 1, "name": "empty"}"#)
            .unwrap()
            .into();

        assert!(!view.is_default);
        assert!(view.prefixes.is_empty());
    }

    #[test]
    fn test_zone_takes_nested_view_id() {
        let json = r#"{"id": 12, "name": "example.com", "view": {"id": 3, "name": "internal"}, "default_ttl": 600, "status": "active"}"#;

        let zone: Zone = serde_json::from_str::<ZoneDto>(json).unwrap().into();

        assert_eq!(zone.view_id, 3);
        assert_eq!(zone.default_ttl, Some(600));
        assert_eq!(zone.name.as_ref(), "example.com");
    }

    #[test]
    fn test_record_decodes_type_and_zone() {
        let json = r#"{
            "id": 99,
            "name": "www",
            "fqdn": "www.example.com.",
            "type": "A",
            "value": "192.0.2.10",
            "ttl": null,
            "status": "active",
            "zone": {"id": 12, "name": "example.com"}
        }"#;

        let dto: RecordDto = serde_json::from_str(json).unwrap();
        assert!(dto.is_active());

        let record: IpamRecord = dto.into();
        assert_eq!(record.record_type.as_ref(), "A");
        assert_eq!(record.ttl, None);
        assert_eq!(record.zone_name(), Some("example.com"));
    }

    #[test]
    fn test_record_zone_without_name() {
        let json = r#"{"id": 2, "fqdn": "www.example.com.", "type": "CNAME", "value": "host", "zone": {"id": 12}}"#;

        let record: IpamRecord = serde_json::from_str::<RecordDto>(json).unwrap().into();

        assert_eq!(record.zone.as_ref().map(|z| z.id), Some(12));
        assert_eq!(record.zone_name(), None);
    }

    #[test]
    fn test_inactive_record() {
        let json = r#"{"id": 1, "fqdn": "old.example.com.", "type": "A", "value": "192.0.2.1", "status": "inactive"}"#;

        let dto: RecordDto = serde_json::from_str(json).unwrap();

        assert!(!dto.is_active());
    }
}
