use std::path::PathBuf;

use clap::Parser;

use aimux_common::GlobalConfigPatch;

#[derive(Parser)]
#[command(name = "aimux", about = "Multi-provider AI model proxy")]
pub(crate) struct Cli {
    /// Path to a JSON config file.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    #[arg(long)]
    pub(crate) host: Option<String>,
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Outbound proxy for upstream egress (http, https or socks5 URL).
    #[arg(long)]
    pub(crate) proxy: Option<String>,
    /// Log each dispatched request at debug level.
    #[arg(long)]
    pub(crate) request_log: bool,
}

impl Cli {
    /// CLI flags as a config patch; wins over the config file.
    pub(crate) fn patch(&self) -> GlobalConfigPatch {
        GlobalConfigPatch {
            host: self.host.clone(),
            port: self.port,
            proxy_url: self.proxy.clone(),
            request_log: self.request_log.then_some(true),
        }
    }
}
