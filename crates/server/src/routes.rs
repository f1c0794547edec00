use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod dishes;
pub mod menus;
pub mod submenus;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: catalog resources, health and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let menus = Router::new()
        .route("/menus", get(menus::list).post(menus::create))
        .route("/menus/", get(menus::list).post(menus::create))
        .route("/menus/:menu_id", get(menus::get).patch(menus::update).delete(menus::delete));

    let submenus = Router::new()
        .route("/menus/:menu_id/submenus", get(submenus::list).post(submenus::create))
        .route(
            "/menus/:menu_id/submenus/:submenu_id",
            get(submenus::get).patch(submenus::update).delete(submenus::delete),
        );

    let dishes = Router::new()
        .route("/menus/:menu_id/submenus/:submenu_id/dishes", get(dishes::list).post(dishes::create))
        .route(
            "/menus/:menu_id/submenus/:submenu_id/dishes/:dish_id",
            get(dishes::get).patch(dishes::update).delete(dishes::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(menus)
        .merge(submenus)
        .merge(dishes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
