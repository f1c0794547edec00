use axum::{extract::State, http::StatusCode, Json};
use common::types::Deleted;
use service::catalog::domain::{MenuInput, MenuPatch, MenuWithCounts};
use service::pagination::Pagination;
use tracing::info;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/menus/", tag = "menus",
    params(crate::openapi::PaginationParams),
    responses((status = 200, description = "Menus with submenu and dish counts", body = [crate::openapi::MenuDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<MenuWithCounts>>, JsonApiError> {
    let menus = state.catalog.list_menus(page).await?;
    info!(count = menus.len(), "list menus");
    Ok(Json(menus))
}

#[utoipa::path(
    post, path = "/menus/", tag = "menus",
    request_body = crate::openapi::MenuInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MenuDoc),
        (status = 400, description = "Title already taken"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<MenuInput>,
) -> Result<(StatusCode, Json<MenuWithCounts>), JsonApiError> {
    let menu = state.catalog.create_menu(input).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

#[utoipa::path(
    get, path = "/menus/{menu_id}", tag = "menus",
    params(("menu_id" = Uuid, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::MenuDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(menu_id): ApiPath<Uuid>,
) -> Result<Json<MenuWithCounts>, JsonApiError> {
    Ok(Json(state.catalog.get_menu(menu_id).await?))
}

#[utoipa::path(
    patch, path = "/menus/{menu_id}", tag = "menus",
    params(("menu_id" = Uuid, Path, description = "Menu ID")),
    request_body = crate::openapi::MenuPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MenuDoc),
        (status = 400, description = "Title already taken"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(menu_id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<MenuPatch>,
) -> Result<Json<MenuWithCounts>, JsonApiError> {
    Ok(Json(state.catalog.update_menu(menu_id, patch).await?))
}

#[utoipa::path(
    delete, path = "/menus/{menu_id}", tag = "menus",
    params(("menu_id" = Uuid, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Deleted with all submenus and dishes"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(menu_id): ApiPath<Uuid>,
) -> Result<Json<Deleted>, JsonApiError> {
    state.catalog.delete_menu(menu_id).await?;
    Ok(Json(Deleted::new("menu")))
}
