//! Per-request usage reporting.
//!
//! Executors create one [`UsageReporter`] per request and publish it exactly
//! once on the terminal outcome. Publication fans out to registered plugins
//! over bounded channels and never blocks the request path: a plugin that
//! cannot keep up loses records instead of stalling requests.

use std::sync::{Arc, OnceLock, RwLock};

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::mpsc;

/// One published usage record.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub provider: String,
    pub model: String,
    /// The variant the client requested.
    pub variant_origin: String,
    /// The variant the proxy resolved after capability negotiation.
    pub variant: String,
    pub failed: bool,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_tokens: i64,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Token counts attached at publish time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detail {
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_tokens: i64,
}

pub trait UsagePlugin: Send + Sync {
    fn handle_usage(&self, record: Record);
}

const PLUGIN_QUEUE_CAPACITY: usize = 64;

fn plugin_senders() -> &'static RwLock<Vec<mpsc::Sender<Record>>> {
    static SENDERS: OnceLock<RwLock<Vec<mpsc::Sender<Record>>>> = OnceLock::new();
    SENDERS.get_or_init(|| RwLock::new(Vec::new()))
}

/// Registers a usage plugin process-wide. Requires a tokio runtime: each
/// plugin gets a drain task feeding it off a bounded queue.
pub fn register_plugin(plugin: Arc<dyn UsagePlugin>) {
    let (tx, mut rx) = mpsc::channel::<Record>(PLUGIN_QUEUE_CAPACITY);
    tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            plugin.handle_usage(record);
        }
    });
    if let Ok(mut senders) = plugin_senders().write() {
        senders.push(tx);
    }
}

fn publish_record(record: Record) {
    let senders = match plugin_senders().read() {
        Ok(senders) => senders.clone(),
        Err(_) => return,
    };
    for sender in senders {
        if sender.try_send(record.clone()).is_err() {
            tracing::debug!(
                provider = %record.provider,
                model = %record.model,
                "usage plugin queue full, dropping record"
            );
        }
    }
}

/// Mutable per-request usage accumulator.
///
/// Callers that re-enter the adaptation path for follow-up requests (e.g.
/// web-search expansion) pass `None` instead of a reporter; "no reporter" is
/// distinct from "reporter with empty variant", so an earlier reporter's
/// captured variant is never cleared by a follow-up.
#[derive(Debug)]
pub struct UsageReporter {
    provider: String,
    model: String,
    variant_origin: String,
    variant: String,
    failed: bool,
}

impl UsageReporter {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            variant_origin: String::new(),
            variant: String::new(),
            failed: false,
        }
    }

    pub fn set_thinking_variant(&mut self, origin: &str, resolved: &str) {
        self.variant_origin = origin.trim().to_ascii_lowercase();
        self.variant = resolved.trim().to_ascii_lowercase();
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn variant_origin(&self) -> &str {
        &self.variant_origin
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Publishes the record to every registered plugin. Non-blocking; slow
    /// plugins drop records.
    pub fn publish(&self, detail: Detail) {
        publish_record(Record {
            provider: self.provider.clone(),
            model: self.model.clone(),
            variant_origin: self.variant_origin.clone(),
            variant: self.variant.clone(),
            failed: self.failed,
            input_tokens: detail.input_tokens,
            output_tokens: detail.output_tokens,
            total_tokens: detail.total_tokens,
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        });
    }
}
