use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

use super::setup_test_db;
use crate::errors::ModelError;
use crate::{dish, menu, submenu};

#[tokio::test]
async fn test_menu_crud_and_partial_update() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let title = format!("menu_{}", Uuid::new_v4());
    let created = menu::create(&db, &title, "first").await?;
    assert_eq!(created.title, title);

    // Only description supplied: title stays
    let updated = menu::update(&db, created.id, None, Some("second")).await?.unwrap();
    assert_eq!(updated.title, title);
    assert_eq!(updated.description, "second");

    let missing = menu::update(&db, Uuid::new_v4(), Some("x"), None).await?;
    assert!(missing.is_none());

    assert!(menu::delete_cascade(&db, created.id).await?);
    assert!(menu::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_menu_title_is_unique() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let title = format!("dup_menu_{}", Uuid::new_v4());
    let first = menu::create(&db, &title, "a").await?;
    let second = menu::create(&db, &title, "b").await;
    assert!(matches!(second, Err(ModelError::Conflict(_))));

    menu::delete_cascade(&db, first.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_dish_title_unique_per_submenu() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let m = menu::create(&db, &format!("dish_scope_{}", Uuid::new_v4()), "d").await?;
    let s1 = submenu::create(&db, m.id, "Soups", "hot").await?;
    let s2 = submenu::create(&db, m.id, "Salads", "cold").await?;

    let price = Decimal::from_str("10.5")?;
    let d = dish::create(&db, s1.id, "Borscht", "beet", price).await?;
    assert_eq!(d.price.to_string(), "10.50");

    let dup = dish::create(&db, s1.id, "Borscht", "again", price).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    // Same title in another submenu is fine
    dish::create(&db, s2.id, "Borscht", "cold one", price).await?;

    menu::delete_cascade(&db, m.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_insert_under_missing_parent_is_not_found() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let orphan = submenu::create(&db, Uuid::new_v4(), "Soups", "hot").await;
    assert!(matches!(&orphan, Err(ModelError::NotFound(m)) if m == "menu not found"));

    let price = Decimal::from_str("1")?;
    let orphan = dish::create(&db, Uuid::new_v4(), "Tea", "", price).await;
    assert!(matches!(&orphan, Err(ModelError::NotFound(m)) if m == "submenu not found"));
    Ok(())
}
