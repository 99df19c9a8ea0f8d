//! REST surface: the embedded test page, the health endpoint, and
//! router composition.
//!
//! Everything here is a display-only collaborator around the feed; the
//! protocol itself lives in `ws/`.

pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the REST surface.
#[cfg(feature = "swagger-ui")]
#[derive(OpenApi)]
#[openapi(
    paths(handlers::system::health_handler),
    components(schemas(handlers::system::HealthResponse))
)]
struct ApiDoc;

/// Builds the complete REST router.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router =
        router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    router
}
