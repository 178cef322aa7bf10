use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::netbox::NetboxConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "netbox-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/netbox-dns/config.toml";

/// Main configuration structure for NetBox DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// NetBox API connection
    #[serde(default)]
    pub netbox: NetboxConfig,

    /// Served zones and fall-through policy
    #[serde(default)]
    pub dns: DnsConfig,

    /// Zone/view metadata cache
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. netbox-dns.toml in current directory
    /// 3. /etc/netbox-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(url) = overrides.netbox_url {
            self.netbox.url = url;
        }
        if let Some(token) = overrides.netbox_token {
            self.netbox.token = Some(token);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.netbox.url.is_empty() {
            return Err(ConfigError::Validation(
                "No NetBox URL configured".to_string(),
            ));
        }

        let url = url::Url::parse(&self.netbox.url).map_err(|e| {
            ConfigError::Validation(format!("Invalid NetBox URL '{}': {}", self.netbox.url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "NetBox URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.netbox.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "NetBox timeout cannot be 0".to_string(),
            ));
        }

        if self.dns.zones.iter().any(|z| z.is_empty()) {
            return Err(ConfigError::Validation(
                "Served zone names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub netbox_url: Option<String>,
    pub netbox_token: Option<String>,
    pub log_level: Option<String>,
}
