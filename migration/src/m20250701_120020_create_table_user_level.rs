use sea_orm_migration::prelude::*;
use crate::tables::UserLevel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::create()
                .table(UserLevel::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(UserLevel::UserId)
                        .big_unsigned()
                        .not_null()
                )
                .col(
                    ColumnDef::new(UserLevel::GuildId)
                        .big_unsigned()
                        .not_null()
                )
                .col(
                    ColumnDef::new(UserLevel::ChannelId)
                        .big_unsigned()
                        .not_null()
                )
                .col(
                    ColumnDef::new(UserLevel::Exp)
                        .big_unsigned()
                        .default(0)
                        .not_null()
                )
                .primary_key(
                    Index::create()
                        .col(UserLevel::UserId)
                        .col(UserLevel::GuildId)
                        .col(UserLevel::ChannelId)
                )
                .to_owned();

        manager
            .create_table(table)
            .await?;

        // ranking queries scan a whole guild
        manager
            .create_index(
                Index::create()
                    .name("idx_user_level_guild_id")
                    .table(UserLevel::Table)
                    .col(UserLevel::GuildId)
                    .to_owned()
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table =
            Table::drop()
                .table(UserLevel::Table)
                .to_owned();

        manager
            .drop_table(table)
            .await
    }
}
