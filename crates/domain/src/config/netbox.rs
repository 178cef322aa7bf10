use serde::{Deserialize, Serialize};

pub const TOKEN_ENV_VAR: &str = "NETBOX_TOKEN";

/// Connection settings for the NetBox DNS plugin API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetboxConfig {
    /// Base URL of the plugin API, e.g.
    /// `https://netbox.example.com/api/plugins/netbox-dns/`.
    #[serde(default)]
    pub url: String,

    /// API token. Falls back to `NETBOX_TOKEN` when unset.
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for NetboxConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: None,
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl NetboxConfig {
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()))
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_page_size() -> u32 {
    1000
}
