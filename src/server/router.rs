use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, discord},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "chromeboard", description = "Discord dashboard API"),
    tags(
        (name = "auth", description = "Discord OAuth login and session info"),
        (name = "discord", description = "Session-gated Discord actions")
    )
)]
struct ApiDoc;

/// Builds every route with the state applied.
///
/// Session, CORS, tracing and rate limiting layers are added by the caller.
pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_session))
        .routes(routes!(discord::create_structure))
        .routes(routes!(discord::assign_role))
        .routes(routes!(discord::play))
        .routes(routes!(discord::get_roles))
        .routes(routes!(discord::get_actions))
        .split_for_parts();

    router
        .route("/", get(health))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
