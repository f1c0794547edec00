#![cfg(test)]
use std::sync::Arc;

use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

use crate::catalog::{repo::seaorm::SeaOrmCatalogRepository, repository::mock::MockCatalogRepository, CatalogService};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn db_config() -> anyhow::Result<configs::DatabaseConfig> {
    let mut cfg = configs::AppConfig::load()?.database;
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.min(1);
    Ok(cfg)
}

/// Fresh connection for the current test's runtime, or `None` to skip.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = db_config().ok()?;
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    let migrated = MIGRATED
        .get_or_init(|| async { migration::Migrator::up(&db, None).await.is_ok() })
        .await;
    (*migrated).then_some(db)
}

pub fn mock_service() -> CatalogService<MockCatalogRepository> {
    CatalogService::new(Arc::new(MockCatalogRepository::default()))
}

pub fn seaorm_service(db: DatabaseConnection) -> CatalogService<SeaOrmCatalogRepository> {
    CatalogService::new(Arc::new(SeaOrmCatalogRepository::new(db)))
}
