use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use models::{dish, menu, submenu};

use super::aggregate::SubmenuTally;
use crate::errors::ServiceError;

/// Persistence abstraction for the menu → submenu → dish hierarchy.
///
/// Lookups of children are scoped by their parent id, so a row that exists
/// under another parent reads as missing. Deletes return `false` when nothing
/// was removed; cascading deletes are atomic.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_menus(&self, offset: u64, limit: u64) -> Result<Vec<menu::Model>, ServiceError>;
    async fn get_menu(&self, id: Uuid) -> Result<Option<menu::Model>, ServiceError>;
    async fn create_menu(&self, title: &str, description: &str) -> Result<menu::Model, ServiceError>;
    async fn update_menu(&self, id: Uuid, title: Option<&str>, description: Option<&str>) -> Result<Option<menu::Model>, ServiceError>;
    async fn delete_menu(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn list_submenus(&self, menu_id: Uuid, offset: u64, limit: u64) -> Result<Vec<submenu::Model>, ServiceError>;
    async fn get_submenu(&self, menu_id: Uuid, id: Uuid) -> Result<Option<submenu::Model>, ServiceError>;
    async fn create_submenu(&self, menu_id: Uuid, title: &str, description: &str) -> Result<submenu::Model, ServiceError>;
    async fn update_submenu(&self, id: Uuid, title: Option<&str>, description: Option<&str>) -> Result<Option<submenu::Model>, ServiceError>;
    async fn delete_submenu(&self, id: Uuid) -> Result<bool, ServiceError>;

    async fn list_dishes(&self, submenu_id: Uuid, offset: u64, limit: u64) -> Result<Vec<dish::Model>, ServiceError>;
    async fn get_dish(&self, submenu_id: Uuid, id: Uuid) -> Result<Option<dish::Model>, ServiceError>;
    async fn find_dish_by_title(&self, submenu_id: Uuid, title: &str) -> Result<Option<dish::Model>, ServiceError>;
    async fn create_dish(&self, submenu_id: Uuid, title: &str, description: &str, price: Decimal) -> Result<dish::Model, ServiceError>;
    async fn update_dish(&self, id: Uuid, title: Option<&str>, description: Option<&str>, price: Option<Decimal>) -> Result<Option<dish::Model>, ServiceError>;
    async fn delete_dish(&self, id: Uuid) -> Result<bool, ServiceError>;

    /// One tally per submenu owned by any of `menu_ids`.
    async fn tallies_by_menu(&self, menu_ids: &[Uuid]) -> Result<Vec<SubmenuTally>, ServiceError>;
    /// One tally per existing submenu in `submenu_ids`.
    async fn tallies_by_submenu(&self, submenu_ids: &[Uuid]) -> Result<Vec<SubmenuTally>, ServiceError>;
}

/// In-memory repository for tests and local runs without Postgres.
/// Mirrors the store's constraints: unique menu titles, unique dish titles
/// per submenu, and cascading deletes.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    struct Tables {
        menus: Vec<menu::Model>,
        submenus: Vec<submenu::Model>,
        dishes: Vec<dish::Model>,
    }

    #[derive(Default)]
    pub struct MockCatalogRepository {
        tables: Mutex<Tables>,
    }

    fn page<T: Clone>(rows: impl Iterator<Item = T>, offset: u64, limit: u64) -> Vec<T> {
        rows.skip(offset as usize).take(limit as usize).collect()
    }

    fn conflict(msg: &str) -> ServiceError { ServiceError::Conflict(msg.to_string()) }

    impl MockCatalogRepository {
        fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
            // a poisoned lock only means another test panicked mid-write
            self.tables.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn list_menus(&self, offset: u64, limit: u64) -> Result<Vec<menu::Model>, ServiceError> {
            let t = self.lock();
            Ok(page(t.menus.iter().cloned(), offset, limit))
        }

        async fn get_menu(&self, id: Uuid) -> Result<Option<menu::Model>, ServiceError> {
            Ok(self.lock().menus.iter().find(|m| m.id == id).cloned())
        }

        async fn create_menu(&self, title: &str, description: &str) -> Result<menu::Model, ServiceError> {
            models::errors::validate_title(title)?;
            let mut t = self.lock();
            if t.menus.iter().any(|m| m.title == title) {
                return Err(conflict("menu with this title already exists"));
            }
            let m = menu::Model {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: description.to_string(),
                created_at: Utc::now().into(),
            };
            t.menus.push(m.clone());
            Ok(m)
        }

        async fn update_menu(&self, id: Uuid, title: Option<&str>, description: Option<&str>) -> Result<Option<menu::Model>, ServiceError> {
            if let Some(title) = title { models::errors::validate_title(title)?; }
            let mut t = self.lock();
            if let Some(title) = title {
                if t.menus.iter().any(|m| m.id != id && m.title == title) {
                    return Err(conflict("menu with this title already exists"));
                }
            }
            let Some(m) = t.menus.iter_mut().find(|m| m.id == id) else { return Ok(None) };
            if let Some(title) = title { m.title = title.to_string(); }
            if let Some(d) = description { m.description = d.to_string(); }
            Ok(Some(m.clone()))
        }

        async fn delete_menu(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut t = self.lock();
            let before = t.menus.len();
            t.menus.retain(|m| m.id != id);
            if t.menus.len() == before {
                return Ok(false);
            }
            let owned: Vec<Uuid> = t.submenus.iter().filter(|s| s.menu_id == id).map(|s| s.id).collect();
            t.dishes.retain(|d| !owned.contains(&d.submenu_id));
            t.submenus.retain(|s| s.menu_id != id);
            Ok(true)
        }

        async fn list_submenus(&self, menu_id: Uuid, offset: u64, limit: u64) -> Result<Vec<submenu::Model>, ServiceError> {
            let t = self.lock();
            Ok(page(t.submenus.iter().filter(|s| s.menu_id == menu_id).cloned(), offset, limit))
        }

        async fn get_submenu(&self, menu_id: Uuid, id: Uuid) -> Result<Option<submenu::Model>, ServiceError> {
            Ok(self.lock().submenus.iter().find(|s| s.id == id && s.menu_id == menu_id).cloned())
        }

        async fn create_submenu(&self, menu_id: Uuid, title: &str, description: &str) -> Result<submenu::Model, ServiceError> {
            models::errors::validate_title(title)?;
            let mut t = self.lock();
            if !t.menus.iter().any(|m| m.id == menu_id) {
                return Err(ServiceError::not_found("menu"));
            }
            let s = submenu::Model {
                id: Uuid::new_v4(),
                menu_id,
                title: title.to_string(),
                description: description.to_string(),
                created_at: Utc::now().into(),
            };
            t.submenus.push(s.clone());
            Ok(s)
        }

        async fn update_submenu(&self, id: Uuid, title: Option<&str>, description: Option<&str>) -> Result<Option<submenu::Model>, ServiceError> {
            if let Some(title) = title { models::errors::validate_title(title)?; }
            let mut t = self.lock();
            let Some(s) = t.submenus.iter_mut().find(|s| s.id == id) else { return Ok(None) };
            if let Some(title) = title { s.title = title.to_string(); }
            if let Some(d) = description { s.description = d.to_string(); }
            Ok(Some(s.clone()))
        }

        async fn delete_submenu(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut t = self.lock();
            let before = t.submenus.len();
            t.submenus.retain(|s| s.id != id);
            if t.submenus.len() == before {
                return Ok(false);
            }
            t.dishes.retain(|d| d.submenu_id != id);
            Ok(true)
        }

        async fn list_dishes(&self, submenu_id: Uuid, offset: u64, limit: u64) -> Result<Vec<dish::Model>, ServiceError> {
            let t = self.lock();
            Ok(page(t.dishes.iter().filter(|d| d.submenu_id == submenu_id).cloned(), offset, limit))
        }

        async fn get_dish(&self, submenu_id: Uuid, id: Uuid) -> Result<Option<dish::Model>, ServiceError> {
            Ok(self.lock().dishes.iter().find(|d| d.id == id && d.submenu_id == submenu_id).cloned())
        }

        async fn find_dish_by_title(&self, submenu_id: Uuid, title: &str) -> Result<Option<dish::Model>, ServiceError> {
            Ok(self.lock().dishes.iter().find(|d| d.submenu_id == submenu_id && d.title == title).cloned())
        }

        async fn create_dish(&self, submenu_id: Uuid, title: &str, description: &str, price: Decimal) -> Result<dish::Model, ServiceError> {
            models::errors::validate_title(title)?;
            let price = dish::normalize_price(price)?;
            let mut t = self.lock();
            if !t.submenus.iter().any(|s| s.id == submenu_id) {
                return Err(ServiceError::not_found("submenu"));
            }
            if t.dishes.iter().any(|d| d.submenu_id == submenu_id && d.title == title) {
                return Err(conflict("Dish with this name already exists in the submenu"));
            }
            let d = dish::Model {
                id: Uuid::new_v4(),
                submenu_id,
                title: title.to_string(),
                description: description.to_string(),
                price,
                created_at: Utc::now().into(),
            };
            t.dishes.push(d.clone());
            Ok(d)
        }

        async fn update_dish(&self, id: Uuid, title: Option<&str>, description: Option<&str>, price: Option<Decimal>) -> Result<Option<dish::Model>, ServiceError> {
            if let Some(title) = title { models::errors::validate_title(title)?; }
            let price = price.map(dish::normalize_price).transpose()?;
            let mut t = self.lock();
            let Some(submenu_id) = t.dishes.iter().find(|d| d.id == id).map(|d| d.submenu_id) else { return Ok(None) };
            if let Some(title) = title {
                if t.dishes.iter().any(|d| d.id != id && d.submenu_id == submenu_id && d.title == title) {
                    return Err(conflict("Dish with this name already exists in the submenu"));
                }
            }
            let Some(d) = t.dishes.iter_mut().find(|d| d.id == id) else { return Ok(None) };
            if let Some(title) = title { d.title = title.to_string(); }
            if let Some(desc) = description { d.description = desc.to_string(); }
            if let Some(p) = price { d.price = p; }
            Ok(Some(d.clone()))
        }

        async fn delete_dish(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut t = self.lock();
            let before = t.dishes.len();
            t.dishes.retain(|d| d.id != id);
            Ok(t.dishes.len() < before)
        }

        async fn tallies_by_menu(&self, menu_ids: &[Uuid]) -> Result<Vec<SubmenuTally>, ServiceError> {
            let t = self.lock();
            Ok(t.submenus
                .iter()
                .filter(|s| menu_ids.contains(&s.menu_id))
                .map(|s| SubmenuTally {
                    submenu_id: s.id,
                    menu_id: s.menu_id,
                    dishes: t.dishes.iter().filter(|d| d.submenu_id == s.id).count() as u64,
                })
                .collect())
        }

        async fn tallies_by_submenu(&self, submenu_ids: &[Uuid]) -> Result<Vec<SubmenuTally>, ServiceError> {
            let t = self.lock();
            Ok(t.submenus
                .iter()
                .filter(|s| submenu_ids.contains(&s.id))
                .map(|s| SubmenuTally {
                    submenu_id: s.id,
                    menu_id: s.menu_id,
                    dishes: t.dishes.iter().filter(|d| d.submenu_id == s.id).count() as u64,
                })
                .collect())
        }
    }
}
