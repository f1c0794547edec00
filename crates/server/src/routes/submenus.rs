use axum::{extract::State, http::StatusCode, Json};
use common::types::Deleted;
use service::catalog::domain::{SubmenuInput, SubmenuPatch, SubmenuWithDishCount};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/menus/{menu_id}/submenus", tag = "submenus",
    params(("menu_id" = Uuid, Path, description = "Menu ID"), crate::openapi::PaginationParams),
    responses(
        (status = 200, description = "Submenus with dish counts", body = [crate::openapi::SubmenuDoc]),
        (status = 404, description = "Menu not found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiPath(menu_id): ApiPath<Uuid>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<SubmenuWithDishCount>>, JsonApiError> {
    Ok(Json(state.catalog.list_submenus(menu_id, page).await?))
}

#[utoipa::path(
    post, path = "/menus/{menu_id}/submenus", tag = "submenus",
    params(("menu_id" = Uuid, Path, description = "Menu ID")),
    request_body = crate::openapi::SubmenuInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SubmenuDoc),
        (status = 404, description = "Menu not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiPath(menu_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<SubmenuInput>,
) -> Result<(StatusCode, Json<SubmenuWithDishCount>), JsonApiError> {
    let submenu = state.catalog.create_submenu(menu_id, input).await?;
    Ok((StatusCode::CREATED, Json(submenu)))
}

#[utoipa::path(
    get, path = "/menus/{menu_id}/submenus/{submenu_id}", tag = "submenus",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SubmenuDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<SubmenuWithDishCount>, JsonApiError> {
    Ok(Json(state.catalog.get_submenu(menu_id, submenu_id).await?))
}

#[utoipa::path(
    patch, path = "/menus/{menu_id}/submenus/{submenu_id}", tag = "submenus",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID")
    ),
    request_body = crate::openapi::SubmenuPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SubmenuDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(patch): ApiJson<SubmenuPatch>,
) -> Result<Json<SubmenuWithDishCount>, JsonApiError> {
    Ok(Json(state.catalog.update_submenu(menu_id, submenu_id, patch).await?))
}

#[utoipa::path(
    delete, path = "/menus/{menu_id}/submenus/{submenu_id}", tag = "submenus",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID")
    ),
    responses(
        (status = 200, description = "Deleted with all dishes"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Deleted>, JsonApiError> {
    state.catalog.delete_submenu(menu_id, submenu_id).await?;
    Ok(Json(Deleted::new("submenu")))
}
