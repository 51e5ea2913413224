use sea_orm_migration::prelude::*;

use crate::tables::GuildSetting;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::alter()
                .table(GuildSetting::Table)
                .add_column(
                    ColumnDef::new(GuildSetting::RevokeRolesOnLevelDown)
                        .boolean()
                        .default(false)
                        .not_null()
                )
                .to_owned();

        manager
            .alter_table(table)
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::alter()
                .table(GuildSetting::Table)
                .drop_column(GuildSetting::RevokeRolesOnLevelDown)
                .to_owned();

        manager
            .alter_table(table)
            .await
    }
}
