mod cached;
mod client;
pub mod dto;

pub use cached::CachedIpamSource;
pub use client::NetboxClient;
