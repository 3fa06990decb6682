//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    OrderActionData, OrderDetailView, OrderItemView, OrderListView, OrderSummaryView, OrderView,
    UpdateStatusRequest,
};
use crate::orders::{OrderStatus, StatusBadge};

/// Bearer token security scheme (HS256, one hour lifetime)
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from `storefront_orders --issue-token`. Example: Bearer eyJhbGciOiJIUzI1NiJ9...",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Orders API",
        version = "1.0.0",
        description = "Order history, status updates and cancellation for storefront customers.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::list_orders,
        crate::gateway::handlers::get_order,
        crate::gateway::handlers::update_order_status,
        crate::gateway::handlers::cancel_order,
    ),
    components(
        schemas(
            HealthResponse,
            OrderStatus,
            StatusBadge,
            OrderView,
            OrderSummaryView,
            OrderListView,
            OrderItemView,
            OrderDetailView,
            OrderActionData,
            UpdateStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Orders", description = "Caller's orders (auth required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

#[cfg(feature = "legacy-tokens")]
#[derive(OpenApi)]
#[openapi(
    paths(crate::gateway::handlers::inspect_legacy_token),
    components(schemas(
        crate::gateway::handlers::LegacyInspectRequest,
        crate::gateway::handlers::LegacyInspectData,
    )),
    tags((name = "Diagnostics", description = "Legacy token inspection (never authorizes)"))
)]
struct LegacyApiDoc;

/// Full document for the enabled feature set
pub fn api_doc() -> utoipa::openapi::OpenApi {
    #[allow(unused_mut)]
    let mut doc = ApiDoc::openapi();
    #[cfg(feature = "legacy-tokens")]
    doc.merge(LegacyApiDoc::openapi());
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = api_doc();
        assert_eq!(spec.info.title, "Storefront Orders API");
        assert_eq!(spec.info.version, "1.0.0");
        assert!(spec.to_json().is_ok());
    }

    #[test]
    fn test_order_endpoints_registered() {
        let paths = api_doc().paths;
        assert!(paths.paths.contains_key("/api/v1/health"));
        assert!(paths.paths.contains_key("/api/v1/orders"));
        assert!(paths.paths.contains_key("/api/v1/orders/{order_id}"));
        assert!(paths.paths.contains_key("/api/v1/orders/{order_id}/status"));
        assert!(paths.paths.contains_key("/api/v1/orders/{order_id}/cancel"));
        assert_eq!(
            paths.paths.contains_key("/api/v1/legacy/inspect"),
            cfg!(feature = "legacy-tokens")
        );
    }

    #[test]
    fn test_security_scheme_registered() {
        let components = api_doc().components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
