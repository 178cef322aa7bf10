mod helpers;

use helpers::{summarize, MockIpamSource};
use hickory_proto::rr::RecordType;
use netbox_dns_application::services::{glue_types, GlueResolver, RecordConverter};
use netbox_dns_domain::{IpamRecord, RecordOwner, Zone};
use std::sync::Arc;

async fn seeded() -> (MockIpamSource, Zone, Zone) {
    let ipam = MockIpamSource::new();
    ipam.add_view(1, "all", &["0.0.0.0/0"], false).await;
    let com = ipam.add_zone(10, "example.com", 1).await;
    let net = ipam.add_zone(20, "example.net", 1).await;

    ipam.add_record(&com, "ns1", "A", "192.0.2.1").await;
    ipam.add_record(&com, "ns1", "AAAA", "2001:db8::1").await;
    ipam.add_record(&com, "mail", "A", "192.0.2.25").await;
    ipam.add_record(&net, "ns2", "A", "198.51.100.2").await;
    (ipam, com, net)
}

fn converted(zone: &Zone, fqdn: &str, rtype: &str, value: &str) -> hickory_proto::rr::Record {
    let record = IpamRecord::new(fqdn, rtype, value).with_zone(zone.id, &zone.name);
    RecordConverter::to_record(&record, Some(zone)).unwrap()
}

#[test]
fn test_glue_types_follow_query_family() {
    assert_eq!(glue_types(RecordType::A), &["A"]);
    assert_eq!(glue_types(RecordType::AAAA), &["AAAA"]);
    assert_eq!(glue_types(RecordType::NS), &["A", "AAAA"]);
    assert_eq!(glue_types(RecordType::MX), &["A", "AAAA"]);
}

#[tokio::test]
async fn test_scoped_glue_for_ns_target() {
    let (ipam, com, _) = seeded().await;
    let resolver = GlueResolver::new(Arc::new(ipam.clone()));
    let ns = converted(&com, "example.com.", "NS", "ns1");

    let glue = resolver
        .resolve(&[ns], Some(&com), &["A", "AAAA"])
        .await
        .unwrap();

    assert_eq!(
        summarize(&glue),
        vec![
            ("ns1.example.com.".to_string(), "192.0.2.1".to_string()),
            ("ns1.example.com.".to_string(), "2001:db8::1".to_string()),
        ]
    );

    let queries = ipam.record_queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].owner, RecordOwner::Fqdn("ns1.example.com".into()));
    assert_eq!(queries[0].zone_id, Some(10));
}

#[tokio::test]
async fn test_type_filter_limits_glue() {
    let (ipam, com, _) = seeded().await;
    let resolver = GlueResolver::new(Arc::new(ipam));
    let ns = converted(&com, "example.com.", "NS", "ns1");

    let glue = resolver.resolve(&[ns], Some(&com), &["AAAA"]).await.unwrap();

    assert_eq!(glue.len(), 1);
    assert_eq!(glue[0].record_type(), RecordType::AAAA);
}

#[tokio::test]
async fn test_scoped_glue_misses_other_zone() {
    let (ipam, com, _) = seeded().await;
    let resolver = GlueResolver::new(Arc::new(ipam));
    let ns = converted(&com, "example.com.", "NS", "ns2.example.net.");

    let scoped = resolver
        .resolve(std::slice::from_ref(&ns), Some(&com), &["A"])
        .await
        .unwrap();
    let unscoped = resolver.resolve(&[ns], None, &["A"]).await.unwrap();

    assert!(scoped.is_empty());
    assert_eq!(
        summarize(&unscoped),
        vec![("ns2.example.net.".to_string(), "198.51.100.2".to_string())]
    );
}

#[tokio::test]
async fn test_repeated_targets_are_looked_up_each_time() {
    let (ipam, com, _) = seeded().await;
    let resolver = GlueResolver::new(Arc::new(ipam.clone()));
    let records = vec![
        converted(&com, "example.com.", "MX", "10 mail"),
        converted(&com, "example.com.", "MX", "20 mail"),
    ];

    let glue = resolver.resolve(&records, Some(&com), &["A"]).await.unwrap();

    assert_eq!(glue.len(), 2);
    assert_eq!(ipam.record_queries().await.len(), 2);
}

#[tokio::test]
async fn test_records_without_target_are_skipped() {
    let (ipam, com, _) = seeded().await;
    let resolver = GlueResolver::new(Arc::new(ipam.clone()));
    let records = vec![
        converted(&com, "host.example.com.", "A", "192.0.2.50"),
        converted(&com, "example.com.", "TXT", "v=spf1 -all"),
    ];

    let glue = resolver.resolve(&records, Some(&com), &["A"]).await.unwrap();

    assert!(glue.is_empty());
    assert!(ipam.record_queries().await.is_empty());
}
