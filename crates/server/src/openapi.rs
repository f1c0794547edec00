use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Rows to skip, default 0
    pub skip: Option<u64>,
    /// Page size, default and maximum 100
    pub limit: Option<u64>,
}

#[derive(ToSchema)]
pub struct MenuInputDoc { pub title: String, pub description: String }

#[derive(ToSchema)]
pub struct MenuPatchDoc { pub title: Option<String>, pub description: Option<String> }

#[derive(ToSchema)]
pub struct MenuDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub submenus_count: u64,
    pub dishes_count: u64,
}

#[derive(ToSchema)]
pub struct SubmenuInputDoc { pub title: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct SubmenuPatchDoc { pub title: Option<String>, pub description: Option<String> }

#[derive(ToSchema)]
pub struct SubmenuDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub menu_id: Uuid,
    pub dishes_count: u64,
}

#[derive(ToSchema)]
pub struct DishInputDoc {
    pub title: String,
    pub description: String,
    /// Decimal with at most two fractional digits, as number or string
    #[schema(example = "12.50")]
    pub price: String,
}

#[derive(ToSchema)]
pub struct DishPatchDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
}

#[derive(ToSchema)]
pub struct DishDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(example = "12.50")]
    pub price: String,
    pub submenu_id: Uuid,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::menus::list,
        crate::routes::menus::create,
        crate::routes::menus::get,
        crate::routes::menus::update,
        crate::routes::menus::delete,
        crate::routes::submenus::list,
        crate::routes::submenus::create,
        crate::routes::submenus::get,
        crate::routes::submenus::update,
        crate::routes::submenus::delete,
        crate::routes::dishes::list,
        crate::routes::dishes::create,
        crate::routes::dishes::get,
        crate::routes::dishes::update,
        crate::routes::dishes::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MenuInputDoc,
            MenuPatchDoc,
            MenuDoc,
            SubmenuInputDoc,
            SubmenuPatchDoc,
            SubmenuDoc,
            DishInputDoc,
            DishPatchDoc,
            DishDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "menus"),
        (name = "submenus"),
        (name = "dishes")
    )
)]
pub struct ApiDoc;
