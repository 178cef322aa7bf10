mod ipam_source;

pub use ipam_source::IpamSource;
