use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "level_role")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub guild_id: u64,
	#[sea_orm(primary_key, auto_increment = false)]
	pub role_id: u64,
	pub level: u32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
