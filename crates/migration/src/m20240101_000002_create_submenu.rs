//! Create `submenu` table with FK to `menu`.
//!
//! Rows disappear together with their menu (`ON DELETE CASCADE`).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submenu::Table)
                    .if_not_exists()
                    .col(uuid(Submenu::Id).primary_key())
                    .col(uuid(Submenu::MenuId).not_null())
                    .col(string_len(Submenu::Title, 255).not_null())
                    .col(text(Submenu::Description).not_null())
                    .col(timestamp_with_time_zone(Submenu::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submenu_menu")
                            .from(Submenu::Table, Submenu::MenuId)
                            .to(Menu::Table, Menu::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Submenu::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Submenu { Table, Id, MenuId, Title, Description, CreatedAt }

#[derive(DeriveIden)]
enum Menu { Table, Id }
