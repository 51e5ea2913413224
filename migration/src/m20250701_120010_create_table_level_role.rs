use sea_orm_migration::prelude::*;
use crate::tables::LevelRole;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::create()
                .table(LevelRole::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(LevelRole::GuildId)
                        .big_unsigned()
                        .not_null()
                )
                .col(
                    ColumnDef::new(LevelRole::RoleId)
                        .big_unsigned()
                        .not_null()
                )
                .col(
                    ColumnDef::new(LevelRole::Level)
                        .unsigned()
                        .not_null()
                )
                .primary_key(
                    Index::create()
                        .col(LevelRole::GuildId)
                        .col(LevelRole::RoleId)
                )
                .to_owned();

        manager
            .create_table(table)
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::drop()
                .table(LevelRole::Table)
                .to_owned();

        manager
            .drop_table(table)
            .await
    }
}
