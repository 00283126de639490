//! Inbound HTTP surface: one route per public wire format, dispatching to
//! the provider executors through the model registry.

mod classify;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use bytes::Bytes;
use futures_util::StreamExt;
use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;

use aimux_common::GlobalConfig;
use aimux_core::executors_from_config;
use aimux_provider_core::registry::global_model_registry;
use aimux_provider_core::{
    Auth, ExecOptions, ExecRequest, ExecuteError, ProviderExecutor,
};
use aimux_transform::{Format, parse_suffix};

use classify::{InboundRequest, split_gemini_action};

#[derive(Clone)]
pub struct ProxyState {
    config: Arc<GlobalConfig>,
    executors: Arc<HashMap<String, Arc<dyn ProviderExecutor>>>,
}

impl ProxyState {
    pub fn new(config: Arc<GlobalConfig>) -> Self {
        let executors = Arc::new(executors_from_config(&config));
        Self { config, executors }
    }
}

pub fn proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/v1/responses", post(responses))
        .route("/v1/messages", post(messages))
        .route("/v1beta/models/{model_action}", post(gemini_generate))
        .route("/v1/models", get(list_models))
        .with_state(state)
}

async fn chat_completions(State(state): State<ProxyState>, body: Bytes) -> Response {
    dispatch_body(state, Format::OpenAI, body).await
}

async fn responses(State(state): State<ProxyState>, body: Bytes) -> Response {
    dispatch_body(state, Format::Codex, body).await
}

async fn messages(State(state): State<ProxyState>, body: Bytes) -> Response {
    dispatch_body(state, Format::Claude, body).await
}

async fn gemini_generate(
    State(state): State<ProxyState>,
    Path(model_action): Path<String>,
    body: Bytes,
) -> Response {
    let Some((model, stream)) = split_gemini_action(&model_action) else {
        return error_response(StatusCode::NOT_FOUND, "unknown gemini action");
    };
    dispatch(
        state,
        InboundRequest {
            source_format: Format::Gemini,
            model,
            stream,
            payload: body,
        },
    )
    .await
}

async fn list_models(State(_state): State<ProxyState>) -> Response {
    let data: Vec<_> = global_model_registry()
        .models()
        .into_iter()
        .map(|model| json!({ "id": model.id, "object": "model" }))
        .collect();
    axum::Json(json!({ "object": "list", "data": data })).into_response()
}

async fn dispatch_body(state: ProxyState, source_format: Format, body: Bytes) -> Response {
    match classify::from_body(source_format, body) {
        Ok(inbound) => dispatch(state, inbound).await,
        Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
    }
}

async fn dispatch(state: ProxyState, inbound: InboundRequest) -> Response {
    let base_model = parse_suffix(&inbound.model).model_name;
    let Some((provider, _)) = global_model_registry().lookup_provider(&base_model) else {
        return error_response(
            StatusCode::NOT_FOUND,
            &format!("model {base_model} is not served by any provider"),
        );
    };
    let Some(executor) = state.executors.get(&provider).cloned() else {
        return error_response(
            StatusCode::BAD_GATEWAY,
            &format!("no executor for provider {provider}"),
        );
    };
    if state.config.request_log {
        tracing::debug!(
            provider = %provider,
            model = %inbound.model,
            stream = inbound.stream,
            format = inbound.source_format.as_str(),
            "dispatching request"
        );
    }

    let auth = auth_for_provider(&state.config, &provider);
    let request = ExecRequest {
        model: inbound.model,
        payload: inbound.payload,
    };
    let opts = ExecOptions::new(inbound.source_format);

    if inbound.stream {
        match executor.execute_stream(&auth, request, opts).await {
            Ok(rx) => {
                let stream = ReceiverStream::new(rx).map(Ok::<_, std::io::Error>);
                Response::builder()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, "text/event-stream")
                    .header(header::CACHE_CONTROL, "no-cache")
                    .body(Body::from_stream(stream))
                    .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
            Err(err) => execute_error_response(err),
        }
    } else {
        match executor.execute(&auth, request, opts).await {
            Ok(response) => Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(response.body))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
            Err(err) => execute_error_response(err),
        }
    }
}

fn auth_for_provider(config: &GlobalConfig, provider: &str) -> Auth {
    let entry = config.provider(provider);
    Auth {
        provider: provider.to_string(),
        api_key: entry.and_then(|entry| entry.api_key.clone()),
        proxy_url: entry.and_then(|entry| entry.proxy_url.clone()),
        base_url: entry.and_then(|entry| entry.base_url.clone()),
        attributes: HashMap::new(),
    }
}

fn execute_error_response(err: ExecuteError) -> Response {
    match err {
        ExecuteError::Adapt(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        ExecuteError::MissingCredential { .. } => {
            error_response(StatusCode::BAD_GATEWAY, &err_text(&err))
        }
        ExecuteError::Timeout { .. } => {
            error_response(StatusCode::GATEWAY_TIMEOUT, &err_text(&err))
        }
        ExecuteError::Transport { .. } => error_response(StatusCode::BAD_GATEWAY, &err_text(&err)),
        // Upstream errors pass through with their status and body.
        ExecuteError::Http { status, body } => Response::builder()
            .status(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response()),
    }
}

fn err_text(err: &ExecuteError) -> String {
    err.to_string()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": { "message": message, "type": error_type(status) }
    });
    (status, axum::Json(body)).into_response()
}

fn error_type(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "invalid_request_error",
        StatusCode::NOT_FOUND => "not_found_error",
        StatusCode::GATEWAY_TIMEOUT => "timeout_error",
        _ => "upstream_error",
    }
}
