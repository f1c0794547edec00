use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::submenu;

const TITLE_TAKEN: &str = "Dish with this name already exists in the submenu";

/// `NUMERIC(10, 2)`: at most 8 integer digits.
const MAX_PRICE_INTEGER_DIGITS: u32 = 8;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dish")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub submenu_id: Uuid,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Submenu }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Submenu => Entity::belongs_to(submenu::Entity)
                .from(Column::SubmenuId)
                .to(submenu::Column::Id)
                .into(),
        }
    }
}

impl Related<submenu::Entity> for Entity {
    fn to() -> RelationDef { Relation::Submenu.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Validate a price and pin it to exactly two decimal places.
pub fn normalize_price(price: Decimal) -> Result<Decimal, ModelError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(ModelError::Validation("price must have at most 2 decimal places".into()));
    }
    if price.trunc() >= Decimal::from(10u64.pow(MAX_PRICE_INTEGER_DIGITS)) {
        return Err(ModelError::Validation("price must have at most 10 digits".into()));
    }
    let mut fixed = price;
    fixed.rescale(2);
    Ok(fixed)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    submenu_id: Uuid,
    title: &str,
    description: &str,
    price: Decimal,
) -> Result<Model, ModelError> {
    errors::validate_title(title)?;
    let price = normalize_price(price)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        submenu_id: Set(submenu_id),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        price: Set(price),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_insert(e, TITLE_TAKEN, "submenu"))
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    price: Option<Decimal>,
) -> Result<Option<Model>, ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    if let Some(t) = title { errors::validate_title(t)?; am.title = Set(t.to_string()); }
    if let Some(d) = description { am.description = Set(d.to_string()); }
    if let Some(p) = price { am.price = Set(normalize_price(p)?); }
    let updated = am.update(db).await.map_err(|e| ModelError::from_db(e, TITLE_TAKEN))?;
    Ok(Some(updated))
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal { Decimal::from_str(s).unwrap() }

    #[test]
    fn price_is_pinned_to_two_places() {
        assert_eq!(normalize_price(dec("12.5")).unwrap().to_string(), "12.50");
        assert_eq!(normalize_price(dec("7")).unwrap().to_string(), "7.00");
        assert_eq!(normalize_price(dec("3.100")).unwrap().to_string(), "3.10");
    }

    #[test]
    fn price_rejects_extra_precision_and_overflow() {
        assert!(normalize_price(dec("1.005")).is_err());
        assert!(normalize_price(dec("-1.00")).is_err());
        assert!(normalize_price(dec("100000000.00")).is_err());
        assert!(normalize_price(dec("99999999.99")).is_ok());
    }
}
