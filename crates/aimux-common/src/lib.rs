use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid timeout value for {field}: negative values are not allowed")]
    InvalidTimeout { field: &'static str, value: i64 },
}

/// Default upstream timeout values (in seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_RESPONSE_HEADER_TIMEOUT_SECONDS: u64 = 30;

/// Upstream HTTP request timeout configuration.
///
/// These timeouts apply to every executor acquiring a client from the shared
/// proxy-aware factory. `0` means "no explicit timeout"; negative values are
/// rejected at resolve time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamTimeouts {
    /// Timeout for establishing the TCP connection and TLS handshake.
    #[serde(rename = "connect-timeout-seconds", default)]
    pub connect_timeout_seconds: i64,

    /// Timeout for waiting on response headers after the request is sent.
    /// This is the knob that keeps requests from hanging for minutes when an
    /// upstream goes unresponsive.
    #[serde(rename = "response-header-timeout-seconds", default)]
    pub response_header_timeout_seconds: i64,
}

impl UpstreamTimeouts {
    /// Returns `(connect, response_header)` in seconds with defaults applied.
    ///
    /// `0` in either field selects the default; negative values are invalid.
    pub fn resolve(&self) -> Result<(u64, u64), ConfigError> {
        if self.connect_timeout_seconds < 0 {
            return Err(ConfigError::InvalidTimeout {
                field: "connect-timeout-seconds",
                value: self.connect_timeout_seconds,
            });
        }
        if self.response_header_timeout_seconds < 0 {
            return Err(ConfigError::InvalidTimeout {
                field: "response-header-timeout-seconds",
                value: self.response_header_timeout_seconds,
            });
        }
        let connect = if self.connect_timeout_seconds > 0 {
            self.connect_timeout_seconds as u64
        } else {
            DEFAULT_CONNECT_TIMEOUT_SECONDS
        };
        let response_header = if self.response_header_timeout_seconds > 0 {
            self.response_header_timeout_seconds as u64
        } else {
            DEFAULT_RESPONSE_HEADER_TIMEOUT_SECONDS
        };
        Ok((connect, response_header))
    }
}

/// Per-provider credential entry the executors draw from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAuthConfig {
    pub name: String,
    #[serde(rename = "api-key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Optional outbound proxy overriding the global one for this provider.
    #[serde(rename = "proxy-url", skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Optional endpoint override (testing, regional gateways).
    #[serde(rename = "base-url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Final, merged global configuration used by the running process.
///
/// Merge order: CLI > config file > built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub host: String,
    pub port: u16,
    /// Optional outbound proxy (for upstream egress).
    #[serde(rename = "proxy-url", skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Enables detailed request logging.
    #[serde(rename = "request-log", default)]
    pub request_log: bool,
    #[serde(rename = "upstream-timeouts", default)]
    pub upstream_timeouts: UpstreamTimeouts,
    #[serde(default)]
    pub providers: Vec<ProviderAuthConfig>,
}

impl GlobalConfig {
    pub fn provider(&self, name: &str) -> Option<&ProviderAuthConfig> {
        self.providers.iter().find(|p| p.name == name)
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8317,
            proxy_url: None,
            request_log: false,
            upstream_timeouts: UpstreamTimeouts::default(),
            providers: Vec::new(),
        }
    }
}

/// Optional layer used when merging global config sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfigPatch {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub proxy_url: Option<String>,
    pub request_log: Option<bool>,
}

impl GlobalConfigPatch {
    pub fn overlay(&mut self, other: GlobalConfigPatch) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.proxy_url.is_some() {
            self.proxy_url = other.proxy_url;
        }
        if other.request_log.is_some() {
            self.request_log = other.request_log;
        }
    }

    pub fn apply_to(self, config: &mut GlobalConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(proxy_url) = self.proxy_url {
            config.proxy_url = Some(proxy_url);
        }
        if let Some(request_log) = self.request_log {
            config.request_log = request_log;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_defaults() {
        let (connect, header) = UpstreamTimeouts::default().resolve().unwrap();
        assert_eq!(connect, DEFAULT_CONNECT_TIMEOUT_SECONDS);
        assert_eq!(header, DEFAULT_RESPONSE_HEADER_TIMEOUT_SECONDS);
    }

    #[test]
    fn timeouts_custom_values() {
        let timeouts = UpstreamTimeouts {
            connect_timeout_seconds: 15,
            response_header_timeout_seconds: 45,
        };
        assert_eq!(timeouts.resolve().unwrap(), (15, 45));
    }

    #[test]
    fn timeouts_partial_config_keeps_other_default() {
        let timeouts = UpstreamTimeouts {
            connect_timeout_seconds: 20,
            response_header_timeout_seconds: 0,
        };
        assert_eq!(
            timeouts.resolve().unwrap(),
            (20, DEFAULT_RESPONSE_HEADER_TIMEOUT_SECONDS)
        );

        let timeouts = UpstreamTimeouts {
            connect_timeout_seconds: 0,
            response_header_timeout_seconds: 60,
        };
        assert_eq!(
            timeouts.resolve().unwrap(),
            (DEFAULT_CONNECT_TIMEOUT_SECONDS, 60)
        );
    }

    #[test]
    fn timeouts_negative_connect_rejected() {
        let timeouts = UpstreamTimeouts {
            connect_timeout_seconds: -5,
            response_header_timeout_seconds: 30,
        };
        match timeouts.resolve() {
            Err(ConfigError::InvalidTimeout { field, value }) => {
                assert_eq!(field, "connect-timeout-seconds");
                assert_eq!(value, -5);
            }
            other => panic!("expected invalid timeout error, got {other:?}"),
        }
    }

    #[test]
    fn timeouts_negative_response_header_rejected() {
        let timeouts = UpstreamTimeouts {
            connect_timeout_seconds: 10,
            response_header_timeout_seconds: -10,
        };
        match timeouts.resolve() {
            Err(ConfigError::InvalidTimeout { field, value }) => {
                assert_eq!(field, "response-header-timeout-seconds");
                assert_eq!(value, -10);
            }
            other => panic!("expected invalid timeout error, got {other:?}"),
        }
    }

    #[test]
    fn timeouts_connect_checked_first() {
        let timeouts = UpstreamTimeouts {
            connect_timeout_seconds: -1,
            response_header_timeout_seconds: -2,
        };
        match timeouts.resolve() {
            Err(ConfigError::InvalidTimeout { field, .. }) => {
                assert_eq!(field, "connect-timeout-seconds");
            }
            other => panic!("expected invalid timeout error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_timeout_error_message() {
        let err = ConfigError::InvalidTimeout {
            field: "test-field",
            value: -42,
        };
        assert_eq!(
            err.to_string(),
            "invalid timeout value for test-field: negative values are not allowed"
        );
    }

    #[test]
    fn patch_overlay_last_writer_wins() {
        let mut base = GlobalConfigPatch {
            host: Some("0.0.0.0".to_string()),
            port: Some(8000),
            proxy_url: None,
            request_log: Some(false),
        };
        base.overlay(GlobalConfigPatch {
            host: None,
            port: Some(9000),
            proxy_url: Some("socks5://localhost:1080".to_string()),
            request_log: None,
        });

        let mut config = GlobalConfig::default();
        base.apply_to(&mut config);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.proxy_url.as_deref(), Some("socks5://localhost:1080"));
        assert!(!config.request_log);
    }
}
