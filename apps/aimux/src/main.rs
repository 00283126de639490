mod cli;
mod usage_sink;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aimux_common::GlobalConfig;
use aimux_provider_core::registry::{builtin, global_model_registry};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = cli::Cli::parse();
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read(path)
                .with_context(|| format!("read config file {}", path.display()))?;
            serde_json::from_slice::<GlobalConfig>(&raw)
                .with_context(|| format!("parse config file {}", path.display()))?
        }
        None => GlobalConfig::default(),
    };
    cli.patch().apply_to(&mut config);
    config
        .upstream_timeouts
        .resolve()
        .context("invalid upstream timeout configuration")?;

    register_configured_providers(&config);
    aimux_provider_core::register_plugin(Arc::new(usage_sink::LogUsagePlugin));

    let config = Arc::new(config);
    let state = aimux_router::ProxyState::new(config.clone());
    let app = aimux_router::proxy_router(state);

    let bind = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn register_configured_providers(config: &GlobalConfig) {
    let registry = global_model_registry();
    for provider in &config.providers {
        match builtin::models_for_provider(&provider.name) {
            Some(models) => {
                tracing::debug!(provider = %provider.name, models = models.len(), "registering builtin models");
                registry.register_client(
                    &format!("config-{}", provider.name),
                    &provider.name,
                    models,
                );
            }
            None => {
                tracing::warn!(provider = %provider.name, "no builtin model table for provider, nothing registered");
            }
        }
    }
}
