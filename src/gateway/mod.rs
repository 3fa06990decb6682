//! HTTP gateway
//!
//! Order routes sit behind [`jwt_auth_middleware`]; health and docs are public.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use anyhow::Context;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::jwt_auth_middleware;
use state::AppState;

/// Assemble the full router for `state`
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Private Routes (bearer token required)
    // ==========================================================================
    let order_routes = Router::new()
        .route("/api/v1/orders", get(handlers::list_orders))
        .route("/api/v1/orders/{order_id}", get(handlers::get_order))
        .route(
            "/api/v1/orders/{order_id}/status",
            post(handlers::update_order_status),
        )
        .route("/api/v1/orders/{order_id}/cancel", post(handlers::cancel_order));

    // [SECURITY] Legacy diagnostics only compiled with the 'legacy-tokens' feature.
    #[cfg(feature = "legacy-tokens")]
    let order_routes = order_routes.route(
        "/api/v1/legacy/inspect",
        post(handlers::inspect_legacy_token),
    );

    let private_routes =
        order_routes.route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .merge(private_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::api_doc()))
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}; is the port already in use?"))?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);
    #[cfg(feature = "legacy-tokens")]
    tracing::warn!("legacy-tokens feature enabled: /api/v1/legacy/inspect is mounted");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
