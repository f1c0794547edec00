use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{dish, menu};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submenu")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub menu_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Menu, Dish }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Menu => Entity::belongs_to(menu::Entity)
                .from(Column::MenuId)
                .to(menu::Column::Id)
                .into(),
            Relation::Dish => Entity::has_many(dish::Entity).into(),
        }
    }
}

impl Related<menu::Entity> for Entity {
    fn to() -> RelationDef { Relation::Menu.def() }
}

impl Related<dish::Entity> for Entity {
    fn to() -> RelationDef { Relation::Dish.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, menu_id: Uuid, title: &str, description: &str) -> Result<Model, ModelError> {
    errors::validate_title(title)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        menu_id: Set(menu_id),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db)
        .await
        .map_err(|e| ModelError::from_insert(e, "submenu already exists", "menu"))
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Model>, ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    if let Some(t) = title { errors::validate_title(t)?; am.title = Set(t.to_string()); }
    if let Some(d) = description { am.description = Set(d.to_string()); }
    Ok(Some(am.update(db).await?))
}

/// Delete a submenu and its dishes atomically.
pub async fn delete_cascade(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let txn = db.begin().await?;
    dish::Entity::delete_many()
        .filter(dish::Column::SubmenuId.eq(id))
        .exec(&txn)
        .await?;
    let res = Entity::delete_by_id(id).exec(&txn).await?;
    if res.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(false);
    }
    txn.commit().await?;
    Ok(true)
}
