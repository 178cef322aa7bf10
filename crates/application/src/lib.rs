//! NetBox DNS Application Layer
//!
//! The resolution engine: matches a query against the zones visible to the
//! requester and assembles answer, authority and additional sections from
//! records fetched through the [`ports::IpamSource`] port.
pub mod lookup;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use lookup::{DnsRequest, LookupResponse, LookupResult};
