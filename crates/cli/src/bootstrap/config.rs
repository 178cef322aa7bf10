use netbox_dns_domain::{CliOverrides, Config};

/// Runs before logging is initialized, so problems are returned rather than
/// logged.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
