use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, QueryFilter, QuerySelect, Set, TransactionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{dish, submenu};

const TITLE_TAKEN: &str = "menu with this title already exists";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Submenu }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Submenu => Entity::has_many(submenu::Entity).into(),
        }
    }
}

impl Related<submenu::Entity> for Entity {
    fn to() -> RelationDef { Relation::Submenu.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, title: &str, description: &str) -> Result<Model, ModelError> {
    errors::validate_title(title)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, TITLE_TAKEN))
}

/// Field-level merge: `None` leaves the column untouched.
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
    let updated = am.update(db).await.map_err(|e| ModelError::from_db(e, TITLE_TAKEN))?;
    Ok(Some(updated))
}

/// Delete a menu with its submenus and their dishes in one transaction.
/// Returns false (and rolls back) when the menu does not exist.
pub async fn delete_cascade(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let txn = db.begin().await?;
    let submenu_ids: Vec<Uuid> = submenu::Entity::find()
        .select_only()
        .column(submenu::Column::Id)
        .filter(submenu::Column::MenuId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;
    if !submenu_ids.is_empty() {
        dish::Entity::delete_many()
            .filter(dish::Column::SubmenuId.is_in(submenu_ids))
            .exec(&txn)
            .await?;
    }
    submenu::Entity::delete_many()
        .filter(submenu::Column::MenuId.eq(id))
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
