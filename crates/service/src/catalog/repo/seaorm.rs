use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use models::{dish, menu, submenu};

use crate::catalog::aggregate::SubmenuTally;
use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository. The pool hands out a connection per statement
/// (or per transaction for cascading deletes) and takes it back on every
/// exit path, errors included.
#[derive(Clone)]
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn tallies(&self, filter: sea_orm::sea_query::SimpleExpr) -> Result<Vec<SubmenuTally>, ServiceError> {
        let rows: Vec<(Uuid, Uuid, i64)> = submenu::Entity::find()
            .select_only()
            .column(submenu::Column::Id)
            .column(submenu::Column::MenuId)
            .column_as(Expr::col((dish::Entity, dish::Column::Id)).count(), "dishes")
            .join(JoinType::LeftJoin, submenu::Relation::Dish.def())
            .filter(filter)
            .group_by(submenu::Column::Id)
            .group_by(submenu::Column::MenuId)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(submenu_id, menu_id, dishes)| SubmenuTally { submenu_id, menu_id, dishes: dishes.max(0) as u64 })
            .collect())
    }
}

#[async_trait::async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_menus(&self, offset: u64, limit: u64) -> Result<Vec<menu::Model>, ServiceError> {
        let rows = menu::Entity::find()
            .order_by_asc(menu::Column::CreatedAt)
            .order_by_asc(menu::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn get_menu(&self, id: Uuid) -> Result<Option<menu::Model>, ServiceError> {
        Ok(menu::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_menu(&self, title: &str, description: &str) -> Result<menu::Model, ServiceError> {
        Ok(menu::create(&self.db, title, description).await?)
    }

    async fn update_menu(&self, id: Uuid, title: Option<&str>, description: Option<&str>) -> Result<Option<menu::Model>, ServiceError> {
        Ok(menu::update(&self.db, id, title, description).await?)
    }

    async fn delete_menu(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(menu::delete_cascade(&self.db, id).await?)
    }

    async fn list_submenus(&self, menu_id: Uuid, offset: u64, limit: u64) -> Result<Vec<submenu::Model>, ServiceError> {
        let rows = submenu::Entity::find()
            .filter(submenu::Column::MenuId.eq(menu_id))
            .order_by_asc(submenu::Column::CreatedAt)
            .order_by_asc(submenu::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn get_submenu(&self, menu_id: Uuid, id: Uuid) -> Result<Option<submenu::Model>, ServiceError> {
        let found = submenu::Entity::find_by_id(id)
            .filter(submenu::Column::MenuId.eq(menu_id))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn create_submenu(&self, menu_id: Uuid, title: &str, description: &str) -> Result<submenu::Model, ServiceError> {
        Ok(submenu::create(&self.db, menu_id, title, description).await?)
    }

    async fn update_submenu(&self, id: Uuid, title: Option<&str>, description: Option<&str>) -> Result<Option<submenu::Model>, ServiceError> {
        Ok(submenu::update(&self.db, id, title, description).await?)
    }

    async fn delete_submenu(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(submenu::delete_cascade(&self.db, id).await?)
    }

    async fn list_dishes(&self, submenu_id: Uuid, offset: u64, limit: u64) -> Result<Vec<dish::Model>, ServiceError> {
        let rows = dish::Entity::find()
            .filter(dish::Column::SubmenuId.eq(submenu_id))
            .order_by_asc(dish::Column::CreatedAt)
            .order_by_asc(dish::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn get_dish(&self, submenu_id: Uuid, id: Uuid) -> Result<Option<dish::Model>, ServiceError> {
        let found = dish::Entity::find_by_id(id)
            .filter(dish::Column::SubmenuId.eq(submenu_id))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn find_dish_by_title(&self, submenu_id: Uuid, title: &str) -> Result<Option<dish::Model>, ServiceError> {
        let found = dish::Entity::find()
            .filter(dish::Column::SubmenuId.eq(submenu_id))
            .filter(dish::Column::Title.eq(title))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn create_dish(&self, submenu_id: Uuid, title: &str, description: &str, price: Decimal) -> Result<dish::Model, ServiceError> {
        Ok(dish::create(&self.db, submenu_id, title, description, price).await?)
    }

    async fn update_dish(&self, id: Uuid, title: Option<&str>, description: Option<&str>, price: Option<Decimal>) -> Result<Option<dish::Model>, ServiceError> {
        Ok(dish::update(&self.db, id, title, description, price).await?)
    }

    async fn delete_dish(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(dish::delete(&self.db, id).await?)
    }

    async fn tallies_by_menu(&self, menu_ids: &[Uuid]) -> Result<Vec<SubmenuTally>, ServiceError> {
        if menu_ids.is_empty() { return Ok(vec![]); }
        self.tallies(submenu::Column::MenuId.is_in(menu_ids.iter().copied())).await
    }

    async fn tallies_by_submenu(&self, submenu_ids: &[Uuid]) -> Result<Vec<SubmenuTally>, ServiceError> {
        if submenu_ids.is_empty() { return Ok(vec![]); }
        self.tallies(submenu::Column::Id.is_in(submenu_ids.iter().copied())).await
    }
}
