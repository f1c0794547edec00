//! Create `menu` table.
//!
//! Root of the catalog hierarchy; titles are unique across all menus.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Menu::Table)
                    .if_not_exists()
                    .col(uuid(Menu::Id).primary_key())
                    .col(string_len(Menu::Title, 255).unique_key().not_null())
                    .col(text(Menu::Description).not_null())
                    .col(timestamp_with_time_zone(Menu::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Menu::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Menu { Table, Id, Title, Description, CreatedAt }
