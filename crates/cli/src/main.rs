use clap::Parser;
use netbox_dns_domain::CliOverrides;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "netbox-dns")]
#[command(version)]
#[command(about = "NetBox DNS - authoritative DNS server backed by NetBox IPAM")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// NetBox DNS plugin API URL
    #[arg(long, value_name = "URL")]
    netbox_url: Option<String>,

    /// NetBox API token
    #[arg(long, value_name = "TOKEN")]
    netbox_token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        netbox_url: cli.netbox_url,
        netbox_token: cli.netbox_token,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting NetBox DNS v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let services = di::DnsServices::new(&config, shutdown.clone())?;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let tcp_timeout = Duration::from_secs(config.server.tcp_timeout_secs);
    let mut dns_server = tokio::spawn(server::start_dns_server(
        dns_addr,
        services.handler,
        tcp_timeout,
        shutdown.clone(),
    ));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received");
            shutdown.cancel();
            dns_server.await??;
        }
        result = &mut dns_server => result??,
    }

    info!("Server shutdown complete");
    Ok(())
}
