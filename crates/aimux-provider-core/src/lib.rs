//! Core provider abstractions for aimux.
//!
//! This crate intentionally does **not** depend on axum or any concrete HTTP
//! client. It holds the model capability registry, the usage-reporting path,
//! the executor trait, and the shared error surface; a higher layer performs
//! IO.

pub mod errors;
pub mod executor;
pub mod registry;
pub mod usage;

pub use errors::{AdaptError, ExecuteError, TimeoutKind};
pub use executor::{Auth, ByteStream, ExecOptions, ExecRequest, ExecResponse, ProviderExecutor};
pub use registry::{ModelInfo, ModelRegistry, ThinkingSupport, global_model_registry};
pub use usage::{Detail, Record, UsagePlugin, UsageReporter, register_plugin};
