/// Entity create/update/delete against Postgres
pub mod crud_tests;


use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use tokio::sync::OnceCell;

static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Connect and migrate once per process; `None` means the tests should skip.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    let migrated = MIGRATED
        .get_or_init(|| async {
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {}", e);
                    false
                }
            }
        })
        .await;
    (*migrated).then_some(db)
}
