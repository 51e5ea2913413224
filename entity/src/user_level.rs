use sea_orm::entity::prelude::*;

/// Per-channel cumulative experience. Guild totals are the sum over channels.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_level")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub user_id: u64,
	#[sea_orm(primary_key, auto_increment = false)]
	pub guild_id: u64,
	#[sea_orm(primary_key, auto_increment = false)]
	pub channel_id: u64,
	pub exp: u64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
