//! HTTP API gateway for Callsheet.
//!
//! Exposes the relay endpoints: health check, chat, document analysis,
//! and a context-preview debugging route. Built on Axum.
//!
//! Error policy: upstream provider failures map to HTTP responses that
//! preserve the original status code where one exists, so clients see
//! the same code the LLM API returned. Context building never fails a
//! request — a missing or malformed bundle degrades to an all-empty
//! context.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use callsheet_core::error::ProviderError;
use callsheet_core::message::Message;
use callsheet_core::provider::{Provider, ProviderRequest};
use callsheet_core::records::RecordBundle;
use callsheet_context::build_user_context;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub config: callsheet_config::AppConfig,
    pub provider: Arc<dyn Provider>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.gateway.allowed_origins);

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/chat", post(chat_handler))
        .route("/v1/documents/analyze", post(analyze_handler))
        .route("/v1/context/preview", post(context_preview_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: callsheet_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr = format!("{host}:{port}");

    let router = callsheet_providers::router::build_from_config(&config);
    let provider = router
        .default()
        .expect("No default provider configured — set an API key");

    let state = Arc::new(GatewayState { config, provider });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS: permissive by default (the bundle comes from a browser client);
/// restricted to exact origins when configured.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    if allowed_origins.is_empty() {
        layer.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatRequest {
    /// The user's message.
    message: String,
    /// Prior conversation turns, oldest first.
    #[serde(default)]
    history: Vec<HistoryMessage>,
    /// The user's business records; absent means no context enrichment.
    #[serde(default)]
    bundle: Option<RecordBundle>,
    /// Override the configured model.
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct HistoryMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<UsageDto>,
}

#[derive(Serialize)]
struct UsageDto {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    /// The document text to analyze.
    document: String,
    /// Optional question to answer about the document.
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    bundle: Option<RecordBundle>,
}

#[derive(Deserialize)]
struct ContextPreviewRequest {
    #[serde(default)]
    bundle: Option<RecordBundle>,
}

#[derive(Serialize)]
struct ContextPreviewResponse {
    context: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        history_len = payload.history.len(),
        has_bundle = payload.bundle.is_some(),
        "v1/chat request"
    );

    let system = build_user_context(payload.bundle.as_ref());

    let mut messages: Vec<Message> = payload
        .history
        .iter()
        .map(|h| match h.role.as_str() {
            "assistant" => Message::assistant(&h.content),
            _ => Message::user(&h.content),
        })
        .collect();
    messages.push(Message::user(&payload.message));

    relay(&state, system, messages, payload.model).await
}

async fn analyze_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        document_len = payload.document.len(),
        has_bundle = payload.bundle.is_some(),
        "v1/documents/analyze request"
    );

    let system = build_user_context(payload.bundle.as_ref());
    let prompt = analysis_prompt(&payload.document, payload.question.as_deref());

    relay(&state, system, vec![Message::user(prompt)], None).await
}

async fn context_preview_handler(
    State(_state): State<SharedState>,
    Json(payload): Json<ContextPreviewRequest>,
) -> Json<ContextPreviewResponse> {
    Json(ContextPreviewResponse {
        context: build_user_context(payload.bundle.as_ref()),
    })
}

/// Forward one assembled request to the provider and map the result.
async fn relay(
    state: &GatewayState,
    system: String,
    messages: Vec<Message>,
    model_override: Option<String>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = ProviderRequest {
        model: model_override.unwrap_or_else(|| state.config.default_model.clone()),
        messages,
        system: Some(system),
        temperature: state.config.default_temperature,
        max_tokens: Some(state.config.default_max_tokens),
    };

    match state.provider.complete(request).await {
        Ok(response) => Ok(Json(ChatResponse {
            response: response.message.content,
            model: response.model,
            usage: response.usage.map(|u| UsageDto {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })),
        Err(err) => {
            error!(error = %err, "Provider request failed");
            Err(provider_error_response(err))
        }
    }
}

/// Wrap a document in the analysis prompt template.
fn analysis_prompt(document: &str, question: Option<&str>) -> String {
    match question {
        Some(q) => format!(
            "Analyze the following document and answer the question below.\n\n\
             DOCUMENT:\n{document}\n\nQUESTION:\n{q}"
        ),
        None => format!(
            "Analyze the following document and summarize its key points, \
             obligations, and any dates or amounts it mentions.\n\n\
             DOCUMENT:\n{document}"
        ),
    }
}

/// Map a provider error to an HTTP response, preserving the upstream
/// status code where one exists.
fn provider_error_response(err: ProviderError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        ProviderError::ApiError { status_code, .. } => {
            StatusCode::from_u16(*status_code).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ProviderError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        ProviderError::AuthenticationFailed(_) => StatusCode::BAD_GATEWAY,
        ProviderError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        ProviderError::Timeout(_) | ProviderError::Network(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use callsheet_core::provider::{ProviderResponse, Usage};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Echoes the last user message back; records nothing.
    struct EchoProvider;

    #[async_trait::async_trait]
    impl Provider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(ProviderResponse {
                message: Message::assistant(format!("echo: {last}")),
                usage: Some(Usage {
                    prompt_tokens: 1,
                    completion_tokens: 1,
                    total_tokens: 2,
                }),
                model: request.model,
            })
        }
    }

    /// Always fails with the given upstream status.
    struct FailingProvider(u16);

    #[async_trait::async_trait]
    impl Provider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::ApiError {
                status_code: self.0,
                message: "upstream said no".into(),
            })
        }
    }

    fn test_app(provider: Arc<dyn Provider>) -> Router {
        let state = Arc::new(GatewayState {
            config: callsheet_config::AppConfig::default(),
            provider,
        });
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = test_app(Arc::new(EchoProvider));
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_relays_to_provider() {
        let app = test_app(Arc::new(EchoProvider));
        let req = Request::builder()
            .method("POST")
            .uri("/v1/chat")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message": "hello"}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["response"], "echo: hello");
        assert_eq!(json["usage"]["total_tokens"], 2);
    }

    #[tokio::test]
    async fn upstream_status_code_passes_through() {
        let app = test_app(Arc::new(FailingProvider(503)));
        let req = Request::builder()
            .method("POST")
            .uri("/v1/chat")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message": "hello"}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("upstream said no"));
    }

    #[tokio::test]
    async fn context_preview_needs_no_upstream() {
        let app = test_app(Arc::new(FailingProvider(500)));
        let req = Request::builder()
            .method("POST")
            .uri("/v1/context/preview")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"bundle": {"jobs": [{"clientName": "Acme", "rate": 2500}]}}"#,
            ))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let context = json["context"].as_str().unwrap();
        assert!(context.contains("JOBS DATA:"));
        assert!(context.contains("- Client: Acme"));
        assert!(context.contains("Total income: 2500.00"));
    }

    #[tokio::test]
    async fn context_preview_handles_missing_bundle() {
        let app = test_app(Arc::new(EchoProvider));
        let req = Request::builder()
            .method("POST")
            .uri("/v1/context/preview")
            .header("content-type", "application/json")
            .body(Body::from(r#"{}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let context = json["context"].as_str().unwrap();
        assert!(context.contains("No jobs found."));
        assert!(context.contains("No upcoming events."));
    }

    #[test]
    fn analysis_prompt_includes_question() {
        let prompt = analysis_prompt("contract text", Some("What is the fee?"));
        assert!(prompt.contains("contract text"));
        assert!(prompt.contains("What is the fee?"));
    }
}
