use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Submenu: index on menu_id for per-menu listing and counting
        manager
            .create_index(
                Index::create()
                    .name("idx_submenu_menu")
                    .table(Submenu::Table)
                    .col(Submenu::MenuId)
                    .to_owned(),
            )
            .await?;

        // Listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_menu_created_at")
                    .table(Menu::Table)
                    .col(Menu::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_submenu_menu").table(Submenu::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_menu_created_at").table(Menu::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submenu { Table, MenuId }

#[derive(DeriveIden)]
enum Menu { Table, CreatedAt }
