use sea_orm_migration::prelude::*;
use crate::tables::GuildSetting;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::create()
                .table(GuildSetting::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(GuildSetting::GuildId)
                        .big_unsigned()
                        .primary_key()
                        .not_null()
                )
                .col(
                    ColumnDef::new(GuildSetting::MinExp)
                        .unsigned()
                        .default(15)
                        .not_null()
                )
                .col(
                    ColumnDef::new(GuildSetting::MaxExp)
                        .unsigned()
                        .default(25)
                        .not_null()
                )
                .col(
                    ColumnDef::new(GuildSetting::StackLevelRoles)
                        .boolean()
                        .default(false)
                        .not_null()
                )
                .to_owned();

        manager
            .create_table(table)
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::drop()
                .table(GuildSetting::Table)
                .to_owned();

        manager
            .drop_table(table)
            .await
    }
}
