pub use sea_orm_migration::prelude::*;

mod m20250701_120000_create_table_guild_setting;
mod m20250701_120010_create_table_level_role;
mod m20250701_120020_create_table_user_level;
mod m20250712_093000_add_revoke_roles_to_guild_setting;
mod tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250701_120000_create_table_guild_setting::Migration),
            Box::new(m20250701_120010_create_table_level_role::Migration),
            Box::new(m20250701_120020_create_table_user_level::Migration),
            Box::new(m20250712_093000_add_revoke_roles_to_guild_setting::Migration),
        ]
    }
}
