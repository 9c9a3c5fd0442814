//! HTTP routes of the MSX bridge
//!
//! Every endpoint is a thin shim over [`MenuService`]: the core
//! computes, the handlers serialize verbatim. CORS is wide open —
//! MSX frontends load the menu JSON cross-origin from TVs.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use kinovod_core::{render_error_menu, Menu, MenuItem, MenuService};

use crate::catalog::{self, EntryKind};

/// Shared state behind every handler
pub struct AppState {
    pub service: MenuService,
    pub public_base: String,
}

/// Build the router with all endpoints
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/msx/videos.json", get(videos))
        .route("/msx/refresh", get(refresh))
        .route("/msx/search", get(search))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// `GET /msx/videos.json` — the menu for the fixed target
///
/// Always 200 with a renderable menu (sentinel included) on the normal
/// path; 500 with the error menu only when the pipeline itself fails.
async fn videos(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.menu().await {
        Ok(menu) => (StatusCode::OK, Json(menu)),
        Err(e) => {
            tracing::error!(error = %e, "menu computation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(render_error_menu(&e.to_string())),
            )
        }
    }
}

/// `GET /msx/refresh` — invalidate the cache and recompute now
async fn refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.refresh().await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Кэш обновлён",
                "videos_found": outcome.videos_found,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "refresh failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    input: Option<String>,
}

/// `GET /msx/search?input=...` — static catalog lookup
async fn search(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> Json<Menu> {
    let input = params.input.unwrap_or_default();
    Json(search_menu(&input, &state.public_base))
}

/// `GET /health` — liveness probe
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "cache_populated": state.service.is_cached().await,
    }))
}

/// Build the search-result menu for a query
fn search_menu(input: &str, public_base: &str) -> Menu {
    let hits = catalog::search(input);
    let items: Vec<MenuItem> = hits
        .iter()
        .map(|entry| {
            let action = match entry.kind {
                EntryKind::Movie => format!("content:{}/msx/videos.json", public_base),
                EntryKind::Info => format!("info:{}", entry.note),
            };
            MenuItem {
                title: entry.title.to_string(),
                player_label: entry.title.to_string(),
                action,
                icon: match entry.kind {
                    EntryKind::Movie => "movie".to_string(),
                    EntryKind::Info => "info".to_string(),
                },
            }
        })
        .collect();

    Menu {
        kind: "pages".to_string(),
        headline: format!("Каталог ({} записей)", items.len()),
        template: None,
        items,
    }
}
