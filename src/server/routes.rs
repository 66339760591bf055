//! HTTP routes: color lookup, mentions listing, platform listing.

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::color::default_color;
use crate::platform::SocialPlatform;
use crate::scan::{scan, strip_markup, Mention, ScanResult};

/// Shared request state: the platform registry, the default platform,
/// and the optional API key. Built once at startup, immutable after.
#[derive(Clone)]
pub struct AppState {
    platforms: Arc<Vec<Arc<dyn SocialPlatform>>>,
    active_platform: Option<String>,
    api_key: Option<String>,
}

impl AppState {
    /// The first registered platform becomes the active default.
    pub fn new(platforms: Vec<Arc<dyn SocialPlatform>>, api_key: Option<String>) -> Self {
        let active_platform = platforms.first().map(|p| p.name().to_string());
        Self {
            platforms: Arc::new(platforms),
            active_platform,
            api_key,
        }
    }

    fn available(&self) -> Vec<&'static str> {
        self.platforms.iter().map(|p| p.name()).collect()
    }

    fn resolve(&self, requested: Option<&str>) -> Option<Arc<dyn SocialPlatform>> {
        let name = requested.or(self.active_platform.as_deref())?;
        self.platforms.iter().find(|p| p.name() == name).cloned()
    }
}

#[derive(Deserialize)]
struct PlatformQuery {
    platform: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    10
}

type ApiFailure = (StatusCode, Json<Value>);

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/color", get(get_color))
        .route("/mentions", get(get_mentions))
        .route("/platforms", get(list_platforms))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/v1", api)
        // Permissive CORS: the LED controller calls from anywhere.
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// When an API key is configured, /api/v1/* requires a matching
/// X-API-Key header. Header only: query parameters can end up in
/// request logs. No configured key means open access.
async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());
    if provided != Some(expected) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized",
                "message": "Valid API key required. Provide via X-API-Key header.",
            })),
        )
            .into_response();
    }

    next.run(request).await
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to glowd",
        "version": env!("CARGO_PKG_VERSION"),
        "available_platforms": state.available(),
        "active_platform": state.active_platform,
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "glowd"}))
}

fn resolve_platform(
    state: &AppState,
    query: &PlatformQuery,
) -> Result<Arc<dyn SocialPlatform>, ApiFailure> {
    state.resolve(query.platform.as_deref()).ok_or_else(|| {
        let requested = query
            .platform
            .clone()
            .or_else(|| state.active_platform.clone())
            .unwrap_or_else(|| "none".to_string());
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Platform \"{requested}\" not available"),
                "available_platforms": state.available(),
            })),
        )
    })
}

fn fetch_failure(platform: &'static str, err: crate::platform::PlatformError) -> ApiFailure {
    error!(platform, error = %err, "mention fetch failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": err.to_string(), "platform": platform})),
    )
}

/// The endpoint the LED controller polls: latest mentioned color and
/// effect, or the default white when nothing matches.
async fn get_color(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<Value>, ApiFailure> {
    let platform = resolve_platform(&state, &query)?;
    let name = platform.name();

    let mentions = platform
        .get_latest_mentions(query.limit)
        .await
        .map_err(|e| fetch_failure(name, e))?;

    let body = match scan(mentions, query.limit) {
        ScanResult::Found {
            color,
            effect,
            mention,
        } => json!({
            "color": color,
            "effect": effect,
            "mention": mention,
            "platform": name,
        }),
        ScanResult::NoMentions => json!({
            "color": default_color(),
            "effect": null,
            "message": "No mentions found",
            "platform": name,
        }),
        ScanResult::NoColorFound { mentions_checked } => json!({
            "color": default_color(),
            "effect": null,
            "message": "No color found in recent mentions",
            "mentions_checked": mentions_checked,
            "platform": name,
        }),
    };

    Ok(Json(body))
}

/// Recent mentions with markup stripped, no color extraction.
async fn get_mentions(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<Value>, ApiFailure> {
    let platform = resolve_platform(&state, &query)?;
    let name = platform.name();

    let mentions = platform
        .get_latest_mentions(query.limit)
        .await
        .map_err(|e| fetch_failure(name, e))?;

    let cleaned: Vec<Mention> = mentions
        .into_iter()
        .map(|mut m| {
            m.text = strip_markup(&m.text);
            m
        })
        .collect();
    let count = cleaned.len();

    Ok(Json(json!({
        "mentions": cleaned,
        "count": count,
        "platform": name,
    })))
}

async fn list_platforms(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "available_platforms": state.available(),
        "active_platform": state.active_platform,
    }))
}
