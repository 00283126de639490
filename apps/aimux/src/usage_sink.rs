use aimux_provider_core::{Record, UsagePlugin};

/// Best-effort terminal sink for usage records.
///
/// Prints one JSON line per record to stderr, keeping stdout clean for
/// potential streaming output.
pub(crate) struct LogUsagePlugin;

impl UsagePlugin for LogUsagePlugin {
    fn handle_usage(&self, record: Record) {
        // Never panic in a sink.
        match serde_json::to_string(&record) {
            Ok(line) => eprintln!("{line}"),
            Err(err) => eprintln!("{{\"event\":\"usage_serialize_error\",\"error\":\"{err}\"}}"),
        }
    }
}
