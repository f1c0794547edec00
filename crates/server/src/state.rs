use std::sync::Arc;

use service::catalog::{
    repo::seaorm::SeaOrmCatalogRepository,
    repository::{mock::MockCatalogRepository, CatalogRepository},
    CatalogService,
};

/// Shared handler state. The repository is injected here rather than
/// reached through a global, so tests can swap in the in-memory store.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: CatalogService<dyn CatalogRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog: CatalogService::new(repo) }
    }

    pub fn with_database(db: sea_orm::DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmCatalogRepository::new(db)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MockCatalogRepository::default()))
    }
}
