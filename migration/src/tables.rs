use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum GuildSetting {
	Table,

	// Column
	GuildId,
	MinExp,
	MaxExp,
	StackLevelRoles,
	RevokeRolesOnLevelDown,
}

#[derive(DeriveIden)]
pub enum LevelRole {
	Table,

	// Column
	GuildId,
	RoleId,
	Level,
}

#[derive(DeriveIden)]
pub enum UserLevel {
	Table,

	// Column
	UserId,
	GuildId,
	ChannelId,
	Exp,
}
