//! JSON HTTP API for content generation and analytics.
//!
//! Every request (except `GET /health`) passes through the rate-limit
//! middleware before reaching a handler; allowed responses carry
//! `X-RateLimit-*` quota headers and rejections return a structured 429
//! with `retry_after_seconds`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/generate` | Generate and score content (cached) |
//! | `GET`  | `/content/{id}` | Full content record |
//! | `GET`  | `/content/{id}/sentiment` | Sentiment label + confidence |
//! | `GET`  | `/content/{id}/analysis` | Full analysis report |
//! | `POST` | `/content/compare` | Compare two or more content pieces |
//! | `POST` | `/campaigns` | Create a campaign |
//! | `GET`  | `/campaigns` | List campaigns |
//! | `GET`  | `/campaigns/{id}` | Fetch a campaign |
//! | `DELETE` | `/campaigns/{id}` | Delete a campaign |
//! | `GET`  | `/campaigns/{id}/analytics` | Aggregated campaign scores |
//! | `GET`  | `/cache/stats` | Cache statistics |
//! | `POST` | `/cache/clear` | Empty the cache (counters persist) |
//! | `GET`  | `/health` | Health check (rate-limit exempt) |
//!
//! # Error Contract
//!
//! All error responses share one envelope:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "prompt must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `rate_limited`
//! (429), `generation_failed` (500), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser
//! dashboards calling the API cross-origin.

use axum::{
    extract::{ConnectInfo, Path, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::analysis::{compare_records, content_report};
use crate::cache::ContentCache;
use crate::config::Config;
use crate::generate::generate_content;
use crate::limiter::{Decision, RateLimiter};
use crate::models::{Campaign, CampaignAnalytics, CampaignCreateRequest, ContentScoreSummary, GenerationRequest};
use crate::provider::{create_provider, ContentProvider};
use crate::sentiment::analyze_sentiment;
use crate::store::{ContentStore, MemoryStore};

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor. Cache, limiter, store, and provider are the
/// process-wide service objects; everything clones cheaply through `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<ContentCache>,
    pub limiter: Arc<RateLimiter>,
    pub store: Arc<dyn ContentStore>,
    pub provider: Arc<dyn ContentProvider>,
}

impl AppState {
    /// Build the standard state from configuration: in-memory store,
    /// template provider, and freshly constructed cache/limiter.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = create_provider(&config.provider)?;
        Ok(Self {
            config: Arc::new(config.clone()),
            cache: Arc::new(ContentCache::new(
                config.cache.ttl_seconds,
                config.cache.max_size,
            )),
            limiter: Arc::new(RateLimiter::new(
                config.rate_limit.per_minute,
                config.rate_limit.per_hour,
            )),
            store: Arc::new(MemoryStore::new()),
            provider,
        })
    }
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and serves until
/// the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    println!("Copysmith server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Assemble the router with CORS and the rate-limit middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate", post(handle_generate))
        .route("/content/{id}", get(handle_get_content))
        .route("/content/{id}/sentiment", get(handle_get_sentiment))
        .route("/content/{id}/analysis", get(handle_get_analysis))
        .route("/content/compare", post(handle_compare))
        .route("/campaigns", post(handle_create_campaign))
        .route("/campaigns", get(handle_list_campaigns))
        .route("/campaigns/{id}", get(handle_get_campaign))
        .route("/campaigns/{id}", delete(handle_delete_campaign))
        .route("/campaigns/{id}/analytics", get(handle_campaign_analytics))
        .route("/cache/stats", get(handle_cache_stats))
        .route("/cache/clear", post(handle_cache_clear))
        .route("/health", get(handle_health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .with_state(state)
}

// ============ Rate-limit middleware ============

/// Applies the dual-window rate limiter to every request except
/// `GET /health`. Allowed responses get quota headers; rejections return
/// a structured 429 before the handler runs.
async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let caller = addr.ip().to_string();

    let quota = match state.limiter.allow(&caller) {
        Decision::Allowed(quota) => quota,
        Decision::Rejected {
            retry_after_seconds,
            message,
        } => {
            let body = serde_json::json!({
                "error": {
                    "code": "rate_limited",
                    "message": message,
                    "retry_after_seconds": retry_after_seconds,
                }
            });
            let mut response =
                (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            response.headers_mut().insert(
                "Retry-After",
                HeaderValue::from(retry_after_seconds.max(0) as u64),
            );
            return response;
        }
    };

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit-Minute", HeaderValue::from(quota.minute_limit));
    headers.insert(
        "X-RateLimit-Remaining-Minute",
        HeaderValue::from(quota.remaining_minute),
    );
    headers.insert("X-RateLimit-Limit-Hour", HeaderValue::from(quota.hour_limit));
    headers.insert(
        "X-RateLimit-Remaining-Hour",
        HeaderValue::from(quota.remaining_hour),
    );
    response
}

// ============ Error response ============

/// JSON error envelope shared by all endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable
/// message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 error for provider/generation failures.
fn generation_failed(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "generation_failed".to_string(),
        message: message.into(),
    }
}

/// Constructs a generic 500 error.
fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ POST /generate ============

/// Handler for `POST /generate`.
///
/// Validates the request, runs the generation pipeline, and returns the
/// scored record with a `from_cache` indicator. `201 Created` on success.
async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    request.validate().map_err(|e| bad_request(e.to_string()))?;

    let outcome = generate_content(
        &request,
        &state.cache,
        state.store.as_ref(),
        state.provider.as_ref(),
        &state.config.scoring,
    )
    .await
    .map_err(|e| generation_failed(format!("{:#}", e)))?;

    let record = &outcome.record;
    let body = serde_json::json!({
        "id": record.id,
        "content": record.content,
        "created_at": record.created_at,
        "quality_score": record.quality_score,
        "seo_score": record.seo_score,
        "sentiment": record.sentiment,
        "confidence": record.confidence,
        "from_cache": outcome.from_cache,
        "cache_age_seconds": outcome.cache_age_seconds,
    });

    Ok((StatusCode::CREATED, Json(body)))
}

// ============ GET /content/{id} ============

/// Handler for `GET /content/{id}`. Returns the full stored record.
async fn handle_get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = fetch_content(&state, &id).await?;
    Ok(Json(serde_json::to_value(record).map_err(|e| internal(e.to_string()))?))
}

// ============ GET /content/{id}/sentiment ============

/// Handler for `GET /content/{id}/sentiment`.
///
/// Recomputes sentiment from the stored text; scoring is deterministic so
/// this always matches the values recorded at generation time.
async fn handle_get_sentiment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = fetch_content(&state, &id).await?;
    let report = analyze_sentiment(&record.content);
    Ok(Json(serde_json::json!({
        "sentiment": report.sentiment,
        "confidence": report.confidence,
    })))
}

// ============ GET /content/{id}/analysis ============

/// Handler for `GET /content/{id}/analysis`.
///
/// Runs the full analyzer pipeline over the stored text and attaches
/// content metadata to the report.
async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = fetch_content(&state, &id).await?;
    let report = content_report(&record.content, &record.keywords, &state.config.scoring);

    let preview: String = record.content.chars().take(100).collect();
    let preview = if record.content.chars().count() > 100 {
        format!("{}...", preview)
    } else {
        preview
    };

    let mut body = serde_json::to_value(report).map_err(|e| internal(e.to_string()))?;
    if let Some(map) = body.as_object_mut() {
        map.insert("content_id".to_string(), serde_json::json!(record.id));
        map.insert("content_preview".to_string(), serde_json::json!(preview));
        map.insert("created_at".to_string(), serde_json::json!(record.created_at));
    }

    Ok(Json(body))
}

// ============ POST /content/compare ============

/// Handler for `POST /content/compare`.
///
/// Accepts a JSON array of content ids (at least two), re-scores each
/// record, and reports per-record summaries plus the best performers.
async fn handle_compare(
    State(state): State<AppState>,
    Json(content_ids): Json<Vec<String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    if content_ids.len() < 2 {
        return Err(bad_request("at least 2 content IDs required for comparison"));
    }

    let records = state
        .store
        .get_contents(&content_ids)
        .await
        .map_err(|e| internal(e.to_string()))?;

    let comparison = compare_records(&records, &state.config.scoring)
        .ok_or_else(|| not_found("none of the provided content IDs exist"))?;

    Ok(Json(
        serde_json::to_value(comparison).map_err(|e| internal(e.to_string()))?,
    ))
}

// ============ Campaigns ============

/// Handler for `POST /campaigns`.
async fn handle_create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CampaignCreateRequest>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    request.validate().map_err(|e| bad_request(e.to_string()))?;

    let campaign = Campaign {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        description: request.description,
        content_ids: request.content_ids,
        created_at: Utc::now(),
        target_audience: request.target_audience,
    };

    state
        .store
        .insert_campaign(&campaign)
        .await
        .map_err(|e| internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Handler for `GET /campaigns`.
async fn handle_list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    let campaigns = state
        .store
        .list_campaigns()
        .await
        .map_err(|e| internal(e.to_string()))?;
    Ok(Json(campaigns))
}

/// Handler for `GET /campaigns/{id}`.
async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, AppError> {
    let campaign = state
        .store
        .get_campaign(&id)
        .await
        .map_err(|e| internal(e.to_string()))?
        .ok_or_else(|| not_found(format!("campaign '{}' not found", id)))?;
    Ok(Json(campaign))
}

/// Handler for `DELETE /campaigns/{id}`.
async fn handle_delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state
        .store
        .delete_campaign(&id)
        .await
        .map_err(|e| internal(e.to_string()))?;
    if !deleted {
        return Err(not_found(format!("campaign '{}' not found", id)));
    }
    Ok(Json(serde_json::json!({ "message": "Campaign deleted successfully" })))
}

/// Handler for `GET /campaigns/{id}/analytics`.
///
/// Aggregates quality/SEO scores over the campaign's content records.
/// Records referenced by the campaign but missing from the store are
/// skipped rather than failing the whole response.
async fn handle_campaign_analytics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CampaignAnalytics>, AppError> {
    let campaign = state
        .store
        .get_campaign(&id)
        .await
        .map_err(|e| internal(e.to_string()))?
        .ok_or_else(|| not_found(format!("campaign '{}' not found", id)))?;

    let records = state
        .store
        .get_contents(&campaign.content_ids)
        .await
        .map_err(|e| internal(e.to_string()))?;

    let summaries: Vec<ContentScoreSummary> = records
        .iter()
        .map(|r| ContentScoreSummary {
            content_id: r.id.clone(),
            quality_score: r.quality_score,
            seo_score: r.seo_score,
            sentiment: r.sentiment,
        })
        .collect();

    let denom = summaries.len().max(1) as f64;
    let average_quality_score =
        summaries.iter().map(|s| s.quality_score).sum::<f64>() / denom;
    let average_seo_score = summaries.iter().map(|s| s.seo_score).sum::<f64>() / denom;

    Ok(Json(CampaignAnalytics {
        campaign_id: campaign.id,
        campaign_name: campaign.name,
        total_content_pieces: campaign.content_ids.len(),
        average_quality_score,
        average_seo_score,
        content_analytics: summaries,
    }))
}

// ============ Cache admin ============

/// Handler for `GET /cache/stats`.
async fn handle_cache_stats(State(state): State<AppState>) -> Json<crate::cache::CacheStats> {
    Json(state.cache.stats())
}

/// Handler for `POST /cache/clear`.
///
/// Empties cached entries. Hit/miss counters are lifetime metrics and
/// survive the clear.
async fn handle_cache_clear(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.cache.clear();
    Json(serde_json::json!({ "message": "Cache cleared successfully" }))
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`. Exempt from rate limiting so load
/// balancers never see a 429 here.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ Helpers ============

async fn fetch_content(
    state: &AppState,
    id: &str,
) -> Result<crate::models::ContentRecord, AppError> {
    state
        .store
        .get_content(id)
        .await
        .map_err(|e| internal(e.to_string()))?
        .ok_or_else(|| not_found(format!("content '{}' not found", id)))
}
