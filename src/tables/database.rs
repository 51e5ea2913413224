use entity::{guild_setting, level_role, user_level};
use entity::{GuildSettingBehavior, LevelRoleBehavior, UserLevelBehavior};
use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect};
use serenity::all::{ChannelId, GuildId, RoleId, UserId};
use serenity::async_trait;

use crate::leveling::store::{rank_entries, GuildSetting, ProgressionStore, RankEntry};
use crate::leveling::{LevelRole, Result};

pub struct DatabaseStore {
	db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct ExpTotal {
	id: u64,
	exp: u64,
}

impl DatabaseStore {
	pub fn new(db: DatabaseConnection) -> Self {
		Self { db }
	}

	async fn counters(&self, guild: GuildId, user: UserId, channel: Option<ChannelId>) -> Result<Vec<user_level::Model>> {
		let mut query = UserLevelBehavior::find()
			.filter(user_level::Column::GuildId.eq(guild.get()))
			.filter(user_level::Column::UserId.eq(user.get()));
		if let Some(channel) = channel {
			query = query.filter(user_level::Column::ChannelId.eq(channel.get()));
		}

		Ok(query.all(&self.db).await?)
	}

	/// `SUM(exp)` per `group` column within the guild, ordered by that column.
	async fn totals(
		&self,
		guild: GuildId,
		group: user_level::Column,
		filter: Option<(user_level::Column, u64)>,
	) -> Result<Vec<(u64, u64)>> {
		let mut query = UserLevelBehavior::find()
			.select_only()
			.column_as(group, "id")
			// MySQL sums integers to DECIMAL
			.column_as(Expr::col(user_level::Column::Exp).sum().cast_as(Alias::new("UNSIGNED")), "exp")
			.filter(user_level::Column::GuildId.eq(guild.get()));
		if let Some((column, value)) = filter {
			query = query.filter(column.eq(value));
		}

		let rows = query
			.group_by(group)
			.order_by_asc(group)
			.into_model::<ExpTotal>()
			.all(&self.db)
			.await?;

		Ok(rows.into_iter().map(|v| (v.id, v.exp)).collect())
	}

	async fn upsert_setting(&self, guild: GuildId, setting: &GuildSetting, overwrite: bool) -> Result<()> {
		let row = guild_setting::ActiveModel {
			guild_id: Set(guild.get()),
			min_exp: Set(setting.min_exp),
			max_exp: Set(setting.max_exp),
			stack_level_roles: Set(setting.stack_level_roles),
			revoke_roles_on_level_down: Set(setting.revoke_roles_on_level_down),
		};
		let on_conflict = if overwrite {
			OnConflict::column(guild_setting::Column::GuildId)
				.update_columns([
					guild_setting::Column::MinExp,
					guild_setting::Column::MaxExp,
					guild_setting::Column::StackLevelRoles,
					guild_setting::Column::RevokeRolesOnLevelDown,
				])
				.to_owned()
		} else {
			// keep whatever a concurrent writer stored first
			OnConflict::column(guild_setting::Column::GuildId)
				.update_column(guild_setting::Column::GuildId)
				.to_owned()
		};

		GuildSettingBehavior::insert(row)
			.on_conflict(on_conflict)
			.exec_without_returning(&self.db)
			.await?;

		Ok(())
	}
}

impl From<guild_setting::Model> for GuildSetting {
	fn from(value: guild_setting::Model) -> Self {
		GuildSetting {
			min_exp: value.min_exp,
			max_exp: value.max_exp,
			stack_level_roles: value.stack_level_roles,
			revoke_roles_on_level_down: value.revoke_roles_on_level_down,
		}
	}
}

#[async_trait]
impl ProgressionStore for DatabaseStore {
	async fn cumulative_exp(&self, user: UserId, guild: GuildId, channel: Option<ChannelId>) -> Result<u64> {
		let rows = self.counters(guild, user, channel).await?;

		Ok(rows.iter().fold(0u64, |acc, v| acc.saturating_add(v.exp)))
	}

	async fn add_exp(&self, user: UserId, guild: GuildId, channel: ChannelId, delta: u64) -> Result<()> {
		let row = user_level::ActiveModel {
			user_id: Set(user.get()),
			guild_id: Set(guild.get()),
			channel_id: Set(channel.get()),
			exp: Set(delta),
		};

		UserLevelBehavior::insert(row)
			.on_conflict(
				OnConflict::columns([
					user_level::Column::UserId,
					user_level::Column::GuildId,
					user_level::Column::ChannelId,
				])
				.value(user_level::Column::Exp, Expr::col(user_level::Column::Exp).add(delta))
				.to_owned(),
			)
			.exec_without_returning(&self.db)
			.await?;

		Ok(())
	}

	/// Read then write. Callers hold the actor lock, so nothing else touches
	/// this counter in between.
	async fn remove_exp(&self, user: UserId, guild: GuildId, channel: ChannelId, delta: u64) -> Result<()> {
		let current = UserLevelBehavior::find_by_id((user.get(), guild.get(), channel.get()))
			.one(&self.db)
			.await?;
		let Some(current) = current else {
			return Ok(());
		};

		UserLevelBehavior::update_many()
			.col_expr(user_level::Column::Exp, Expr::value(current.exp.saturating_sub(delta)))
			.filter(user_level::Column::UserId.eq(user.get()))
			.filter(user_level::Column::GuildId.eq(guild.get()))
			.filter(user_level::Column::ChannelId.eq(channel.get()))
			.exec(&self.db)
			.await?;

		Ok(())
	}

	async fn set_exp(&self, user: UserId, guild: GuildId, channel: ChannelId, value: u64) -> Result<()> {
		let row = user_level::ActiveModel {
			user_id: Set(user.get()),
			guild_id: Set(guild.get()),
			channel_id: Set(channel.get()),
			exp: Set(value),
		};

		UserLevelBehavior::insert(row)
			.on_conflict(
				OnConflict::columns([
					user_level::Column::UserId,
					user_level::Column::GuildId,
					user_level::Column::ChannelId,
				])
				.update_column(user_level::Column::Exp)
				.to_owned(),
			)
			.exec_without_returning(&self.db)
			.await?;

		Ok(())
	}

	async fn reset_user(&self, user: UserId, guild: GuildId) -> Result<()> {
		UserLevelBehavior::delete_many()
			.filter(user_level::Column::UserId.eq(user.get()))
			.filter(user_level::Column::GuildId.eq(guild.get()))
			.exec(&self.db)
			.await?;

		Ok(())
	}

	async fn reset_guild(&self, guild: GuildId) -> Result<()> {
		UserLevelBehavior::delete_many()
			.filter(user_level::Column::GuildId.eq(guild.get()))
			.exec(&self.db)
			.await?;

		Ok(())
	}

	async fn guild_setting(&self, guild: GuildId) -> Result<GuildSetting> {
		if let Some(row) = GuildSettingBehavior::find_by_id(guild.get()).one(&self.db).await? {
			return Ok(row.into());
		}

		let setting = GuildSetting::default();
		self.upsert_setting(guild, &setting, false).await?;

		Ok(setting)
	}

	async fn save_guild_setting(&self, guild: GuildId, setting: &GuildSetting) -> Result<()> {
		self.upsert_setting(guild, setting, true).await
	}

	async fn level_roles(&self, guild: GuildId) -> Result<Vec<LevelRole>> {
		let rows = LevelRoleBehavior::find()
			.filter(level_role::Column::GuildId.eq(guild.get()))
			.order_by_asc(level_role::Column::Level)
			.order_by_asc(level_role::Column::RoleId)
			.all(&self.db)
			.await?;

		Ok(rows
			.into_iter()
			.map(|v| LevelRole {
				level: v.level,
				role: RoleId::new(v.role_id),
			})
			.collect())
	}

	async fn put_level_role(&self, guild: GuildId, role: LevelRole) -> Result<()> {
		let row = level_role::ActiveModel {
			guild_id: Set(guild.get()),
			role_id: Set(role.role.get()),
			level: Set(role.level),
		};

		LevelRoleBehavior::insert(row)
			.on_conflict(
				OnConflict::columns([level_role::Column::GuildId, level_role::Column::RoleId])
					.update_column(level_role::Column::Level)
					.to_owned(),
			)
			.exec_without_returning(&self.db)
			.await?;

		Ok(())
	}

	async fn remove_level_role(&self, guild: GuildId, role: RoleId) -> Result<bool> {
		let res = LevelRoleBehavior::delete_many()
			.filter(level_role::Column::GuildId.eq(guild.get()))
			.filter(level_role::Column::RoleId.eq(role.get()))
			.exec(&self.db)
			.await?;

		Ok(res.rows_affected > 0)
	}

	async fn clear_level_roles(&self, guild: GuildId) -> Result<()> {
		LevelRoleBehavior::delete_many()
			.filter(level_role::Column::GuildId.eq(guild.get()))
			.exec(&self.db)
			.await?;

		Ok(())
	}

	async fn ranking(&self, guild: GuildId, channel: Option<ChannelId>) -> Result<Vec<RankEntry<UserId>>> {
		let filter = channel.map(|v| (user_level::Column::ChannelId, v.get()));
		let totals = self.totals(guild, user_level::Column::UserId, filter).await?;

		Ok(rank_entries(totals)
			.into_iter()
			.map(|v| RankEntry {
				key: UserId::new(v.key),
				exp: v.exp,
				rank: v.rank,
			})
			.collect())
	}

	async fn channel_ranking(&self, guild: GuildId, user: Option<UserId>) -> Result<Vec<RankEntry<ChannelId>>> {
		let filter = user.map(|v| (user_level::Column::UserId, v.get()));
		let totals = self.totals(guild, user_level::Column::ChannelId, filter).await?;

		Ok(rank_entries(totals)
			.into_iter()
			.map(|v| RankEntry {
				key: ChannelId::new(v.key),
				exp: v.exp,
				rank: v.rank,
			})
			.collect())
	}
}
