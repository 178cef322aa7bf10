use serde::{Deserialize, Serialize};

/// Read-through cache for NetBox zone and view metadata. Records are never
/// cached.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    30
}
