//! The per-provider executor shell.
//!
//! One generic executor composes the adaptation engine, the shared upstream
//! client, the timeout classifier, and the usage reporter; the static
//! profile table supplies everything provider-specific it needs.

mod profiles;
mod stream;
mod usage;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use aimux_common::GlobalConfig;
use aimux_provider_core::{
    Auth, ByteStream, Detail, ExecOptions, ExecRequest, ExecResponse, ExecuteError,
    ProviderExecutor, TimeoutKind, UsageReporter,
};
use aimux_transform::{Format, parse_suffix, translate::normalize_codex_response};

use crate::adapt::apply_thinking_with_usage;
use crate::upstream_client::{map_send_error, proxy_aware_client};

pub use profiles::{AuthStyle, PROFILES, ProviderProfile, profile};

pub struct UpstreamExecutor {
    profile: &'static ProviderProfile,
    config: Arc<GlobalConfig>,
    client_override: Option<Arc<wreq::Client>>,
}

impl UpstreamExecutor {
    pub fn new(profile: &'static ProviderProfile, config: Arc<GlobalConfig>) -> Self {
        Self {
            profile,
            config,
            client_override: None,
        }
    }

    pub fn for_provider(key: &str, config: Arc<GlobalConfig>) -> Option<Self> {
        profile(key).map(|profile| Self::new(profile, config))
    }

    /// Installs a caller-supplied client. It is used only when neither the
    /// auth nor the global config selects a proxy; an explicit proxy always
    /// wins.
    pub fn with_client(mut self, client: Arc<wreq::Client>) -> Self {
        self.client_override = Some(client);
        self
    }

    fn client(&self, auth: &Auth) -> Result<Arc<wreq::Client>, ExecuteError> {
        let proxied = has_proxy(auth.proxy_url.as_deref())
            || has_proxy(self.config.proxy_url.as_deref());
        if !proxied {
            if let Some(client) = &self.client_override {
                return Ok(client.clone());
            }
        }
        proxy_aware_client(&self.config, Some(auth))
    }

    fn api_key<'a>(&self, auth: &'a Auth) -> Result<&'a str, ExecuteError> {
        auth.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ExecuteError::MissingCredential { field: "api_key" })
    }

    fn endpoint_url(&self, auth: &Auth, model: &str, stream: bool) -> String {
        let template = auth.base_url.as_deref().unwrap_or(self.profile.endpoint);
        let action = if stream {
            "streamGenerateContent?alt=sse"
        } else {
            "generateContent"
        };
        template.replace("{model}", model).replace("{action}", action)
    }

    fn idle_timeout(&self) -> Duration {
        let (_, response_header) = self
            .config
            .upstream_timeouts
            .resolve()
            .unwrap_or((
                aimux_common::DEFAULT_CONNECT_TIMEOUT_SECONDS,
                aimux_common::DEFAULT_RESPONSE_HEADER_TIMEOUT_SECONDS,
            ));
        Duration::from_secs(response_header.max(1))
    }

    async fn send_request(
        &self,
        auth: &Auth,
        body: Bytes,
        model: &str,
        stream: bool,
        timeout: Option<Duration>,
    ) -> Result<wreq::Response, ExecuteError> {
        let key = self.api_key(auth)?;
        let client = self.client(auth)?;
        let url = self.endpoint_url(auth, model, stream);

        let mut builder = client
            .request(wreq::Method::POST, &url)
            .header("content-type", "application/json");
        builder = match self.profile.auth_style {
            AuthStyle::Bearer => builder.header("authorization", format!("Bearer {key}")),
            AuthStyle::XApiKey => builder
                .header("x-api-key", key)
                .header("anthropic-version", "2023-06-01"),
            AuthStyle::XGoogApiKey => builder.header("x-goog-api-key", key),
        };
        builder = builder.body(body);

        let started = Instant::now();
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, builder.send()).await {
                Ok(sent) => sent.map_err(map_send_error),
                Err(_) => Err(ExecuteError::Timeout {
                    kind: TimeoutKind::Unknown,
                    message: format!("request deadline of {limit:?} exceeded"),
                }),
            },
            None => builder.send().await.map_err(map_send_error),
        };

        result.map_err(|err| {
            if let ExecuteError::Timeout { kind, .. } = &err {
                log_timeout_event(self.profile.key, *kind, started.elapsed(), &err);
            }
            err
        })
    }

    async fn execute_with_reporter(
        &self,
        auth: &Auth,
        req: &ExecRequest,
        opts: ExecOptions,
        reporter: &mut UsageReporter,
        model_name: &str,
    ) -> Result<ExecResponse, ExecuteError> {
        let adapted = apply_thinking_with_usage(
            &req.payload,
            &req.model,
            opts.source_format,
            self.profile.target_format,
            self.profile.key,
            Some(reporter),
        )?;
        let request_value = serde_json::from_slice::<Value>(&adapted).unwrap_or(Value::Null);

        let response = self
            .send_request(auth, Bytes::from(adapted), model_name, false, opts.timeout)
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_send_error)?;
        if !(200..300).contains(&status) {
            return Err(ExecuteError::Http { status, body });
        }

        let body = if self.profile.target_format == Format::Codex {
            match normalize_codex_response(&request_value, &body) {
                Some(normalized) => Bytes::from(normalized),
                None => body,
            }
        } else {
            body
        };
        let usage = usage::usage_from_body(self.profile.target_format, &body);
        Ok(ExecResponse { body, usage })
    }
}

#[async_trait]
impl ProviderExecutor for UpstreamExecutor {
    fn provider(&self) -> &str {
        self.profile.key
    }

    async fn execute(
        &self,
        auth: &Auth,
        req: ExecRequest,
        opts: ExecOptions,
    ) -> Result<ExecResponse, ExecuteError> {
        let parsed = parse_suffix(&req.model);
        let mut reporter = UsageReporter::new(self.profile.key, parsed.model_name.clone());
        match self
            .execute_with_reporter(auth, &req, opts, &mut reporter, &parsed.model_name)
            .await
        {
            Ok(response) => {
                reporter.publish(response.usage.unwrap_or_default());
                Ok(response)
            }
            Err(err) => {
                reporter.mark_failed();
                reporter.publish(Detail::default());
                Err(err)
            }
        }
    }

    async fn execute_stream(
        &self,
        auth: &Auth,
        req: ExecRequest,
        opts: ExecOptions,
    ) -> Result<ByteStream, ExecuteError> {
        let parsed = parse_suffix(&req.model);
        let mut reporter = UsageReporter::new(self.profile.key, parsed.model_name.clone());

        let bootstrap = async {
            let adapted = apply_thinking_with_usage(
                &req.payload,
                &req.model,
                opts.source_format,
                self.profile.target_format,
                self.profile.key,
                Some(&mut reporter),
            )?;
            let (body, request_value) = match serde_json::from_slice::<Value>(&adapted) {
                Ok(mut value) => {
                    mark_streaming(self.profile.target_format, &mut value);
                    let body = serde_json::to_vec(&value).unwrap_or(adapted);
                    (body, value)
                }
                Err(_) => (adapted, Value::Null),
            };

            let response = self
                .send_request(auth, Bytes::from(body), &parsed.model_name, true, opts.timeout)
                .await?;
            let status = response.status().as_u16();
            if !(200..300).contains(&status) {
                let body = response.bytes().await.unwrap_or_default();
                return Err(ExecuteError::Http { status, body });
            }
            Ok((response, request_value))
        };

        match bootstrap.await {
            Ok((response, request_value)) => Ok(stream::relay(
                response,
                self.profile.target_format,
                request_value,
                reporter,
                self.idle_timeout(),
            )),
            Err(err) => {
                reporter.mark_failed();
                reporter.publish(Detail::default());
                Err(err)
            }
        }
    }
}

fn has_proxy(value: Option<&str>) -> bool {
    value.map(str::trim).filter(|v| !v.is_empty()).is_some()
}

/// The Gemini surfaces select streaming through the URL action; everything
/// else flags it in the payload.
fn mark_streaming(target: Format, payload: &mut Value) {
    match target {
        Format::Gemini | Format::GeminiCli | Format::Antigravity => {}
        _ => {
            if let Some(object) = payload.as_object_mut() {
                object.insert("stream".to_string(), Value::Bool(true));
            }
        }
    }
}

fn log_timeout_event(provider: &str, kind: TimeoutKind, elapsed: Duration, err: &ExecuteError) {
    tracing::warn!(
        provider,
        timeout_type = kind.as_str(),
        elapsed = ?elapsed,
        error = %err,
        "upstream request timeout"
    );
}

/// One executor per known provider profile, keyed by provider.
pub fn executors_from_config(
    config: &Arc<GlobalConfig>,
) -> HashMap<String, Arc<dyn ProviderExecutor>> {
    PROFILES
        .iter()
        .map(|profile| {
            let executor: Arc<dyn ProviderExecutor> =
                Arc::new(UpstreamExecutor::new(profile, config.clone()));
            (profile.key.to_string(), executor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_table_covers_every_provider_key() {
        for key in crate::adapt::KNOWN_PROVIDERS {
            assert!(profile(key).is_some(), "missing profile for {key}");
        }
        assert!(profile("smalltalk").is_none());
    }

    #[test]
    fn gemini_endpoints_substitute_model_and_action() {
        let config = Arc::new(GlobalConfig::default());
        let exec = UpstreamExecutor::for_provider("gemini", config).unwrap();
        let auth = Auth::default();
        assert_eq!(
            exec.endpoint_url(&auth, "gemini-2.5-flash", false),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(
            exec.endpoint_url(&auth, "gemini-2.5-flash", true)
                .ends_with(":streamGenerateContent?alt=sse")
        );
    }

    #[test]
    fn client_override_yields_to_explicit_proxy() {
        let config = Arc::new(GlobalConfig::default());
        let exec = UpstreamExecutor::for_provider("openai", config)
            .unwrap()
            .with_client(Arc::new(wreq::Client::builder().build().unwrap()));
        let override_client = exec.client_override.clone().unwrap();

        let direct = exec.client(&Auth::default()).unwrap();
        assert!(Arc::ptr_eq(&direct, &override_client));

        let proxied_auth = Auth {
            proxy_url: Some("http://127.0.0.1:3128".to_string()),
            ..Auth::default()
        };
        let proxied = exec.client(&proxied_auth).unwrap();
        assert!(!Arc::ptr_eq(&proxied, &override_client));
    }

    #[test]
    fn base_url_overrides_endpoint_template() {
        let config = Arc::new(GlobalConfig::default());
        let exec = UpstreamExecutor::for_provider("openai", config).unwrap();
        let auth = Auth {
            base_url: Some("http://127.0.0.1:9999/v1/chat/completions".to_string()),
            ..Auth::default()
        };
        assert_eq!(
            exec.endpoint_url(&auth, "gpt-5", false),
            "http://127.0.0.1:9999/v1/chat/completions"
        );
    }
}
