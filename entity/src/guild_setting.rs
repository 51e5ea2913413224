use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_setting")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub guild_id: u64,
	pub min_exp: u32,
	pub max_exp: u32,
	pub stack_level_roles: bool,
	pub revoke_roles_on_level_down: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
