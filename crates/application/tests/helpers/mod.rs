#![allow(dead_code)]

mod mock_ipam;

pub use mock_ipam::MockIpamSource;

use hickory_proto::rr::Record;
use std::net::IpAddr;

pub const CLIENT_IP: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(10, 1, 2, 3));

/// Owner name and presentation-format rdata of each record, in order.
pub fn summarize(records: &[Record]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.name().to_string(), r.data().to_string()))
        .collect()
}

