pub mod cache;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod netbox;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use dns::{DnsConfig, FallthroughConfig};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use netbox::NetboxConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
