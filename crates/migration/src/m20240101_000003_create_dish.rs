//! Create `dish` table with FK to `submenu`.
//! Price is `NUMERIC(10, 2)`; a dish title is unique inside its submenu.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dish::Table)
                    .if_not_exists()
                    .col(uuid(Dish::Id).primary_key())
                    .col(uuid(Dish::SubmenuId).not_null())
                    .col(string_len(Dish::Title, 255).not_null())
                    .col(text(Dish::Description).not_null())
                    .col(decimal_len(Dish::Price, 10, 2).not_null())
                    .col(timestamp_with_time_zone(Dish::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dish_submenu")
                            .from(Dish::Table, Dish::SubmenuId)
                            .to(Submenu::Table, Submenu::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite unique index: same title allowed only across different submenus
        manager
            .create_index(
                Index::create()
                    .name("uniq_dish_submenu_title")
                    .table(Dish::Table)
                    .col(Dish::SubmenuId)
                    .col(Dish::Title)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Dish::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Dish {
    Table,
    Id,
    SubmenuId,
    Title,
    Description,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submenu { Table, Id }
