use axum::{extract::State, http::StatusCode, Json};
use common::types::Deleted;
use service::catalog::domain::{Dish, DishInput, DishPatch};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/menus/{menu_id}/submenus/{submenu_id}/dishes", tag = "dishes",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID"),
        crate::openapi::PaginationParams
    ),
    responses(
        (status = 200, description = "Dishes of the submenu", body = [crate::openapi::DishDoc]),
        (status = 404, description = "Menu or submenu not found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<Dish>>, JsonApiError> {
    Ok(Json(state.catalog.list_dishes(menu_id, submenu_id, page).await?))
}

#[utoipa::path(
    post, path = "/menus/{menu_id}/submenus/{submenu_id}/dishes", tag = "dishes",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID")
    ),
    request_body = crate::openapi::DishInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DishDoc),
        (status = 400, description = "Dish with this name already exists in the submenu"),
        (status = 404, description = "Menu or submenu not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(input): ApiJson<DishInput>,
) -> Result<(StatusCode, Json<Dish>), JsonApiError> {
    let dish = state.catalog.create_dish(menu_id, submenu_id, input).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

#[utoipa::path(
    get, path = "/menus/{menu_id}/submenus/{submenu_id}/dishes/{dish_id}", tag = "dishes",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID"),
        ("dish_id" = Uuid, Path, description = "Dish ID")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DishDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id, dish_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Dish>, JsonApiError> {
    Ok(Json(state.catalog.get_dish(menu_id, submenu_id, dish_id).await?))
}

#[utoipa::path(
    patch, path = "/menus/{menu_id}/submenus/{submenu_id}/dishes/{dish_id}", tag = "dishes",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID"),
        ("dish_id" = Uuid, Path, description = "Dish ID")
    ),
    request_body = crate::openapi::DishPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DishDoc),
        (status = 400, description = "Dish with this name already exists in the submenu"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id, dish_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    ApiJson(patch): ApiJson<DishPatch>,
) -> Result<Json<Dish>, JsonApiError> {
    Ok(Json(state.catalog.update_dish(menu_id, submenu_id, dish_id, patch).await?))
}

#[utoipa::path(
    delete, path = "/menus/{menu_id}/submenus/{submenu_id}/dishes/{dish_id}", tag = "dishes",
    params(
        ("menu_id" = Uuid, Path, description = "Menu ID"),
        ("submenu_id" = Uuid, Path, description = "Submenu ID"),
        ("dish_id" = Uuid, Path, description = "Dish ID")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath((menu_id, submenu_id, dish_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Deleted>, JsonApiError> {
    state.catalog.delete_dish(menu_id, submenu_id, dish_id).await?;
    Ok(Json(Deleted::new("dish")))
}
