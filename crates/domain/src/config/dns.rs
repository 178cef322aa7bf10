use crate::names;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Zones this server answers for. Queries outside them skip the NetBox
    /// lookup entirely and take the fall-through path.
    #[serde(default = "default_zones")]
    pub zones: Vec<String>,

    #[serde(default)]
    pub fallthrough: FallthroughConfig,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            zones: default_zones(),
            fallthrough: FallthroughConfig::default(),
        }
    }
}

impl DnsConfig {
    /// Longest configured zone containing `qname`, if any.
    pub fn responding_zone(&self, qname: &str) -> Option<&str> {
        self.zones
            .iter()
            .filter(|zone| names::is_subdomain(qname, zone))
            .max_by_key(|zone| names::normalize(zone).len())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FallthroughConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Restricts fall-through to names within these zones. Empty means
    /// every name.
    #[serde(default)]
    pub zones: Vec<String>,
}

impl FallthroughConfig {
    pub fn through(&self, qname: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.zones.is_empty() || self.zones.iter().any(|zone| names::is_subdomain(qname, zone))
    }
}

fn default_zones() -> Vec<String> {
    vec![".".to_string()]
}
