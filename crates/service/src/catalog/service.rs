use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::{menu, submenu};

use super::aggregate::{self, dish_counts, menu_counts};
use super::domain::{
    Dish, DishInput, DishPatch, MenuInput, MenuPatch, MenuWithCounts, SubmenuInput, SubmenuPatch,
    SubmenuWithDishCount,
};
use super::repository::CatalogRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

const DISH_TITLE_TAKEN: &str = "Dish with this name already exists in the submenu";

/// Catalog business service independent of web framework.
///
/// Every nested operation validates the whole ancestor chain named in the
/// path: a submenu is only reachable under its own menu and a dish only
/// under its own submenu.
pub struct CatalogService<R: CatalogRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CatalogRepository + ?Sized> Clone for CatalogService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn require_menu(&self, menu_id: Uuid) -> Result<menu::Model, ServiceError> {
        self.repo.get_menu(menu_id).await?.ok_or_else(|| ServiceError::not_found("menu"))
    }

    async fn require_submenu(&self, menu_id: Uuid, submenu_id: Uuid) -> Result<submenu::Model, ServiceError> {
        self.require_menu(menu_id).await?;
        self.repo
            .get_submenu(menu_id, submenu_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("submenu"))
    }

    async fn menu_with_counts(&self, m: menu::Model) -> Result<MenuWithCounts, ServiceError> {
        let tallies = self.repo.tallies_by_menu(&[m.id]).await?;
        Ok(aggregate::menu_view(m, &menu_counts(&tallies)))
    }

    async fn submenu_with_count(&self, s: submenu::Model) -> Result<SubmenuWithDishCount, ServiceError> {
        let tallies = self.repo.tallies_by_submenu(&[s.id]).await?;
        Ok(aggregate::submenu_view(s, &dish_counts(&tallies)))
    }

    // ---- menus ----

    pub async fn list_menus(&self, page: Pagination) -> Result<Vec<MenuWithCounts>, ServiceError> {
        let (offset, limit) = page.normalize();
        let menus = self.repo.list_menus(offset, limit).await?;
        let ids: Vec<Uuid> = menus.iter().map(|m| m.id).collect();
        let counts = menu_counts(&self.repo.tallies_by_menu(&ids).await?);
        Ok(menus.into_iter().map(|m| aggregate::menu_view(m, &counts)).collect())
    }

    pub async fn get_menu(&self, menu_id: Uuid) -> Result<MenuWithCounts, ServiceError> {
        let m = self.require_menu(menu_id).await?;
        self.menu_with_counts(m).await
    }

    /// Create a menu; a taken title is a `Conflict`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::catalog::{CatalogService, domain::MenuInput, repository::mock::MockCatalogRepository};
    /// let svc = CatalogService::new(Arc::new(MockCatalogRepository::default()));
    /// let input = MenuInput { title: "Lunch".into(), description: "d".into() };
    /// let menu = tokio_test::block_on(svc.create_menu(input)).unwrap();
    /// assert_eq!(menu.submenus_count, 0);
    /// assert_eq!(menu.dishes_count, 0);
    /// ```
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_menu(&self, input: MenuInput) -> Result<MenuWithCounts, ServiceError> {
        let m = self.repo.create_menu(&input.title, &input.description).await?;
        info!(menu_id = %m.id, "menu_created");
        Ok(aggregate::menu_view(m, &Default::default()))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_menu(&self, menu_id: Uuid, patch: MenuPatch) -> Result<MenuWithCounts, ServiceError> {
        let m = self
            .repo
            .update_menu(menu_id, patch.title.as_deref(), patch.description.as_deref())
            .await?
            .ok_or_else(|| ServiceError::not_found("menu"))?;
        info!(menu_id = %m.id, "menu_updated");
        self.menu_with_counts(m).await
    }

    #[instrument(skip(self))]
    pub async fn delete_menu(&self, menu_id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete_menu(menu_id).await? {
            return Err(ServiceError::not_found("menu"));
        }
        info!(%menu_id, "menu_deleted");
        Ok(())
    }

    // ---- submenus ----

    pub async fn list_submenus(&self, menu_id: Uuid, page: Pagination) -> Result<Vec<SubmenuWithDishCount>, ServiceError> {
        self.require_menu(menu_id).await?;
        let (offset, limit) = page.normalize();
        let submenus = self.repo.list_submenus(menu_id, offset, limit).await?;
        let counts = dish_counts(&self.repo.tallies_by_menu(&[menu_id]).await?);
        Ok(submenus.into_iter().map(|s| aggregate::submenu_view(s, &counts)).collect())
    }

    pub async fn get_submenu(&self, menu_id: Uuid, submenu_id: Uuid) -> Result<SubmenuWithDishCount, ServiceError> {
        let s = self.require_submenu(menu_id, submenu_id).await?;
        self.submenu_with_count(s).await
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_submenu(&self, menu_id: Uuid, input: SubmenuInput) -> Result<SubmenuWithDishCount, ServiceError> {
        self.require_menu(menu_id).await?;
        let s = self.repo.create_submenu(menu_id, &input.title, &input.description).await?;
        info!(submenu_id = %s.id, %menu_id, "submenu_created");
        Ok(aggregate::submenu_view(s, &Default::default()))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_submenu(&self, menu_id: Uuid, submenu_id: Uuid, patch: SubmenuPatch) -> Result<SubmenuWithDishCount, ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        let s = self
            .repo
            .update_submenu(submenu_id, patch.title.as_deref(), patch.description.as_deref())
            .await?
            .ok_or_else(|| ServiceError::not_found("submenu"))?;
        info!(submenu_id = %s.id, "submenu_updated");
        self.submenu_with_count(s).await
    }

    #[instrument(skip(self))]
    pub async fn delete_submenu(&self, menu_id: Uuid, submenu_id: Uuid) -> Result<(), ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        if !self.repo.delete_submenu(submenu_id).await? {
            return Err(ServiceError::not_found("submenu"));
        }
        info!(%submenu_id, "submenu_deleted");
        Ok(())
    }

    // ---- dishes ----

    pub async fn list_dishes(&self, menu_id: Uuid, submenu_id: Uuid, page: Pagination) -> Result<Vec<Dish>, ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        let (offset, limit) = page.normalize();
        let rows = self.repo.list_dishes(submenu_id, offset, limit).await?;
        Ok(rows.into_iter().map(Dish::from).collect())
    }

    pub async fn get_dish(&self, menu_id: Uuid, submenu_id: Uuid, dish_id: Uuid) -> Result<Dish, ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        self.repo
            .get_dish(submenu_id, dish_id)
            .await?
            .map(Dish::from)
            .ok_or_else(|| ServiceError::not_found("dish"))
    }

    /// Create a dish. A title already used inside the same submenu is a
    /// `Conflict`; the unique index on `(submenu_id, title)` catches the
    /// concurrent case the lookup cannot.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_dish(&self, menu_id: Uuid, submenu_id: Uuid, input: DishInput) -> Result<Dish, ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        if let Some(existing) = self.repo.find_dish_by_title(submenu_id, &input.title).await? {
            debug!(dish_id = %existing.id, "dish title taken");
            return Err(ServiceError::Conflict(DISH_TITLE_TAKEN.into()));
        }
        let d = self
            .repo
            .create_dish(submenu_id, &input.title, &input.description, input.price)
            .await?;
        info!(dish_id = %d.id, %submenu_id, "dish_created");
        Ok(Dish::from(d))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_dish(&self, menu_id: Uuid, submenu_id: Uuid, dish_id: Uuid, patch: DishPatch) -> Result<Dish, ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        let current = self
            .repo
            .get_dish(submenu_id, dish_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("dish"))?;
        if let Some(title) = patch.title.as_deref().filter(|t| *t != current.title) {
            if self.repo.find_dish_by_title(submenu_id, title).await?.is_some() {
                return Err(ServiceError::Conflict(DISH_TITLE_TAKEN.into()));
            }
        }
        let d = self
            .repo
            .update_dish(dish_id, patch.title.as_deref(), patch.description.as_deref(), patch.price)
            .await?
            .ok_or_else(|| ServiceError::not_found("dish"))?;
        info!(dish_id = %d.id, "dish_updated");
        Ok(Dish::from(d))
    }

    #[instrument(skip(self))]
    pub async fn delete_dish(&self, menu_id: Uuid, submenu_id: Uuid, dish_id: Uuid) -> Result<(), ServiceError> {
        self.require_submenu(menu_id, submenu_id).await?;
        if self.repo.get_dish(submenu_id, dish_id).await?.is_none() || !self.repo.delete_dish(dish_id).await? {
            return Err(ServiceError::not_found("dish"));
        }
        info!(%dish_id, "dish_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, mock_service, seaorm_service};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn unique(prefix: &str) -> String { format!("{}_{}", prefix, Uuid::new_v4()) }

    fn menu_input(title: &str) -> MenuInput {
        MenuInput { title: title.into(), description: "d".into() }
    }

    fn dish_input(title: &str, price: &str) -> DishInput {
        DishInput { title: title.into(), description: "tasty".into(), price: Decimal::from_str(price).unwrap() }
    }

    async fn lunch_scenario<R: CatalogRepository + ?Sized>(svc: &CatalogService<R>) -> anyhow::Result<()> {
        let menu = svc.create_menu(MenuInput { title: unique("Lunch"), description: "d".into() }).await?;
        let read = svc.get_menu(menu.id).await?;
        assert_eq!((read.submenus_count, read.dishes_count), (0, 0));

        let sub = svc.create_submenu(menu.id, SubmenuInput { title: "Soups".into(), description: "hot".into() }).await?;
        assert_eq!(svc.get_menu(menu.id).await?.submenus_count, 1);

        let d1 = svc.create_dish(menu.id, sub.id, dish_input("Borscht", "12.5")).await?;
        let d2 = svc.create_dish(menu.id, sub.id, dish_input("Ukha", "9.99")).await?;
        assert_eq!(d1.price.to_string(), "12.50");
        assert_eq!(svc.get_submenu(menu.id, sub.id).await?.dishes_count, 2);
        assert_eq!(svc.get_menu(menu.id).await?.dishes_count, 2);

        svc.delete_submenu(menu.id, sub.id).await?;
        let after = svc.get_menu(menu.id).await?;
        assert_eq!((after.submenus_count, after.dishes_count), (0, 0));
        for d in [d1.id, d2.id] {
            assert!(matches!(svc.get_dish(menu.id, sub.id, d).await, Err(ServiceError::NotFound(_))));
        }

        svc.delete_menu(menu.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn lunch_scenario_in_memory() -> anyhow::Result<()> {
        lunch_scenario(&mock_service()).await
    }

    #[tokio::test]
    async fn lunch_scenario_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        lunch_scenario(&seaorm_service(db)).await
    }

    async fn counts_follow_every_mutation<R: CatalogRepository + ?Sized>(svc: &CatalogService<R>) -> anyhow::Result<()> {
        let menu = svc.create_menu(menu_input(&unique("Dinner"))).await?;
        let mut submenus = vec![];
        for (i, n) in [3usize, 0, 2].iter().enumerate() {
            let s = svc.create_submenu(menu.id, SubmenuInput { title: format!("s{}", i), description: String::new() }).await?;
            for j in 0..*n {
                svc.create_dish(menu.id, s.id, dish_input(&format!("d{}", j), "1")).await?;
            }
            submenus.push(s.id);
        }

        let listed = svc.list_submenus(menu.id, Pagination::default()).await?;
        let per_submenu: Vec<u64> = listed.iter().map(|s| s.dishes_count).collect();
        assert_eq!(per_submenu, vec![3, 0, 2]);
        let m = svc.get_menu(menu.id).await?;
        assert_eq!(m.submenus_count, 3);
        assert_eq!(m.dishes_count, per_submenu.iter().sum::<u64>());

        let dishes = svc.list_dishes(menu.id, submenus[0], Pagination::default()).await?;
        svc.delete_dish(menu.id, submenus[0], dishes[0].id).await?;
        let m = svc.get_menu(menu.id).await?;
        assert_eq!((m.submenus_count, m.dishes_count), (3, 4));

        svc.delete_menu(menu.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn counts_in_memory() -> anyhow::Result<()> {
        counts_follow_every_mutation(&mock_service()).await
    }

    #[tokio::test]
    async fn counts_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        counts_follow_every_mutation(&seaorm_service(db)).await
    }

    #[tokio::test]
    async fn duplicate_menu_title_conflicts() -> anyhow::Result<()> {
        let svc = mock_service();
        svc.create_menu(menu_input("Lunch")).await?;
        let dup = svc.create_menu(menu_input("Lunch")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let other = svc.create_menu(menu_input("Dinner")).await?;
        let renamed = svc.update_menu(other.id, MenuPatch { title: Some("Lunch".into()), description: None }).await;
        assert!(matches!(renamed, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn dish_title_unique_only_within_submenu() -> anyhow::Result<()> {
        let svc = mock_service();
        let m = svc.create_menu(menu_input("Lunch")).await?;
        let a = svc.create_submenu(m.id, SubmenuInput { title: "A".into(), description: String::new() }).await?;
        let b = svc.create_submenu(m.id, SubmenuInput { title: "B".into(), description: String::new() }).await?;

        svc.create_dish(m.id, a.id, dish_input("Tea", "2")).await?;
        let dup = svc.create_dish(m.id, a.id, dish_input("Tea", "3")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.list_dishes(m.id, a.id, Pagination::default()).await?.len(), 1);

        svc.create_dish(m.id, b.id, dish_input("Tea", "2")).await?;

        // Renaming onto a sibling's title conflicts too
        let coffee = svc.create_dish(m.id, a.id, dish_input("Coffee", "3")).await?;
        let clash = svc
            .update_dish(m.id, a.id, coffee.id, DishPatch { title: Some("Tea".into()), ..Default::default() })
            .await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() -> anyhow::Result<()> {
        let svc = mock_service();
        let m = svc.create_menu(menu_input("Lunch")).await?;
        let updated = svc.update_menu(m.id, MenuPatch { title: None, description: Some("new".into()) }).await?;
        assert_eq!(updated.title, "Lunch");
        assert_eq!(updated.description, "new");

        let s = svc.create_submenu(m.id, SubmenuInput { title: "Soups".into(), description: "hot".into() }).await?;
        let d = svc.create_dish(m.id, s.id, dish_input("Borscht", "10")).await?;
        let d2 = svc
            .update_dish(m.id, s.id, d.id, DishPatch { price: Some(Decimal::from_str("11.5")?), ..Default::default() })
            .await?;
        assert_eq!(d2.title, "Borscht");
        assert_eq!(d2.description, "tasty");
        assert_eq!(d2.price.to_string(), "11.50");

        let s2 = svc
            .update_submenu(m.id, s.id, SubmenuPatch { description: Some("cold".into()), ..Default::default() })
            .await?;
        assert_eq!(s2.title, "Soups");
        assert_eq!(s2.description, "cold");
        assert_eq!(s2.menu_id, m.id);
        assert_eq!(s2.dishes_count, 1);

        let renamed = svc
            .update_submenu(m.id, s.id, SubmenuPatch { title: Some("Broths".into()), ..Default::default() })
            .await?;
        assert_eq!(renamed.title, "Broths");
        assert_eq!(renamed.description, "cold");

        let missing = svc.update_menu(Uuid::new_v4(), MenuPatch::default()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn parent_chain_is_validated() -> anyhow::Result<()> {
        let svc = mock_service();
        let m1 = svc.create_menu(menu_input("One")).await?;
        let m2 = svc.create_menu(menu_input("Two")).await?;
        let s1 = svc.create_submenu(m1.id, SubmenuInput { title: "S".into(), description: String::new() }).await?;
        let s2 = svc.create_submenu(m1.id, SubmenuInput { title: "T".into(), description: String::new() }).await?;
        let d = svc.create_dish(m1.id, s1.id, dish_input("Tea", "1")).await?;

        // Submenu under the wrong menu
        let err = svc.get_submenu(m2.id, s1.id).await.unwrap_err();
        assert_eq!(err.to_string(), "submenu not found");
        // Dish under the wrong submenu
        let err = svc.get_dish(m1.id, s2.id, d.id).await.unwrap_err();
        assert_eq!(err.to_string(), "dish not found");
        // Missing menu is reported before anything else
        let err = svc.create_submenu(Uuid::new_v4(), SubmenuInput { title: "X".into(), description: String::new() }).await.unwrap_err();
        assert_eq!(err.to_string(), "menu not found");
        let err = svc.create_dish(m1.id, Uuid::new_v4(), dish_input("X", "1")).await.unwrap_err();
        assert_eq!(err.to_string(), "submenu not found");
        // A dish reached through the wrong submenu cannot be deleted
        assert!(matches!(svc.delete_dish(m1.id, s2.id, d.id).await, Err(ServiceError::NotFound(_))));
        assert!(svc.get_dish(m1.id, s1.id, d.id).await.is_ok());
        // A submenu reached through the wrong menu cannot be patched
        let err = svc
            .update_submenu(m2.id, s1.id, SubmenuPatch { title: Some("Moved".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "submenu not found");
        assert_eq!(svc.get_submenu(m1.id, s1.id).await?.title, "S");
        Ok(())
    }

    #[tokio::test]
    async fn deletes_on_missing_are_not_found() -> anyhow::Result<()> {
        let svc = mock_service();
        assert!(matches!(svc.delete_menu(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        let m = svc.create_menu(menu_input("Lunch")).await?;
        assert!(matches!(svc.delete_submenu(m.id, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        let s = svc.create_submenu(m.id, SubmenuInput { title: "S".into(), description: String::new() }).await?;
        assert!(matches!(svc.delete_dish(m.id, s.id, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));

        svc.delete_menu(m.id).await?;
        assert!(matches!(svc.delete_menu(m.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn menu_delete_cascades_to_every_descendant() -> anyhow::Result<()> {
        let svc = mock_service();
        let m = svc.create_menu(menu_input("Lunch")).await?;
        let keep = svc.create_menu(menu_input("Keep")).await?;
        let ks = svc.create_submenu(keep.id, SubmenuInput { title: "K".into(), description: String::new() }).await?;
        svc.create_dish(keep.id, ks.id, dish_input("Kept", "1")).await?;

        let s = svc.create_submenu(m.id, SubmenuInput { title: "S".into(), description: String::new() }).await?;
        let d = svc.create_dish(m.id, s.id, dish_input("Gone", "1")).await?;
        svc.delete_menu(m.id).await?;

        assert!(matches!(svc.get_menu(m.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_submenu(m.id, s.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_dish(m.id, s.id, d.id).await, Err(ServiceError::NotFound(_))));

        let untouched = svc.get_menu(keep.id).await?;
        assert_eq!((untouched.submenus_count, untouched.dishes_count), (1, 1));
        Ok(())
    }

    #[tokio::test]
    async fn list_respects_offset_and_insertion_order() -> anyhow::Result<()> {
        let svc = mock_service();
        for t in ["a", "b", "c", "d"] {
            svc.create_menu(menu_input(t)).await?;
        }
        let page = svc.list_menus(Pagination { skip: 1, limit: 2 }).await?;
        let titles: Vec<&str> = page.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_price_is_a_validation_error() -> anyhow::Result<()> {
        let svc = mock_service();
        let m = svc.create_menu(menu_input("Lunch")).await?;
        let s = svc.create_submenu(m.id, SubmenuInput { title: "S".into(), description: String::new() }).await?;
        let bad = svc.create_dish(m.id, s.id, dish_input("Tea", "1.234")).await;
        assert!(matches!(bad, Err(ServiceError::Validation(_))));
        let blank = svc.create_menu(menu_input("  ")).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn insert_under_vanished_parent_is_not_found() -> anyhow::Result<()> {
        use crate::catalog::repository::mock::MockCatalogRepository;

        let repo = MockCatalogRepository::default();
        let err = repo.create_submenu(Uuid::new_v4(), "S", "").await.unwrap_err();
        assert_eq!(err.to_string(), "menu not found");
        let err = repo
            .create_dish(Uuid::new_v4(), "D", "", Decimal::from_str("1")?)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "submenu not found");
        Ok(())
    }
}
