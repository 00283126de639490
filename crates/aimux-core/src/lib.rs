//! Request pipeline core: the thinking adaptation engine, the shared
//! proxy-aware upstream HTTP client, and the per-provider executor shell.

pub mod adapt;
pub mod executor;
pub mod upstream_client;

pub use adapt::{
    apply_thinking, apply_thinking_with_meta, apply_thinking_with_usage, requested_variant,
};
pub use executor::{ProviderProfile, UpstreamExecutor, executors_from_config, profile};
pub use upstream_client::{classify_timeout, proxy_aware_client};
