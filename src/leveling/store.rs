//! The progression state store collaborator and the value types it exchanges.

use serenity::all::{ChannelId, GuildId, RoleId, UserId};
use serenity::async_trait;

use super::error::{LevelingError, Result};
use super::rewards::LevelRole;

pub const DEFAULT_MIN_EXP: u32 = 15;
pub const DEFAULT_MAX_EXP: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildSetting {
	pub min_exp: u32,
	pub max_exp: u32,
	pub stack_level_roles: bool,
	pub revoke_roles_on_level_down: bool,
}

impl Default for GuildSetting {
	fn default() -> Self {
		Self {
			min_exp: DEFAULT_MIN_EXP,
			max_exp: DEFAULT_MAX_EXP,
			stack_level_roles: false,
			revoke_roles_on_level_down: false,
		}
	}
}

impl GuildSetting {
	pub fn with_exp_range(self, min_exp: i64, max_exp: i64) -> Result<Self> {
		if min_exp < 0 || max_exp < 0 {
			return Err(LevelingError::InvalidConfiguration(format!(
				"exp range must not be negative: {}..={}",
				min_exp, max_exp
			)));
		}
		if min_exp > max_exp {
			return Err(LevelingError::InvalidConfiguration(format!(
				"min_exp {} is greater than max_exp {}",
				min_exp, max_exp
			)));
		}
		let min_exp = u32::try_from(min_exp).map_err(|e| LevelingError::InvalidConfiguration(e.to_string()))?;
		let max_exp = u32::try_from(max_exp).map_err(|e| LevelingError::InvalidConfiguration(e.to_string()))?;

		Ok(Self { min_exp, max_exp, ..self })
	}
}

/// One row of a leaderboard. Ties share a rank and the next rank skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEntry<K> {
	pub key: K,
	pub exp: u64,
	pub rank: u32,
}

/// Orders `(key, exp)` pairs by descending experience and ranks them like
/// SQL `RANK()`. Equal experience keeps the input order.
pub fn rank_entries<K>(mut totals: Vec<(K, u64)>) -> Vec<RankEntry<K>> {
	totals.sort_by(|a, b| b.1.cmp(&a.1));

	let mut res = Vec::with_capacity(totals.len());
	let mut rank = 0u32;
	let mut previous: Option<u64> = None;
	for (position, (key, exp)) in totals.into_iter().enumerate() {
		if previous != Some(exp) {
			rank = u32::try_from(position + 1).unwrap_or(u32::MAX);
			previous = Some(exp);
		}
		res.push(RankEntry { key, exp, rank });
	}

	res
}

#[async_trait]
pub trait ProgressionStore: Send + Sync {
	/// Experience in one channel, or the guild total when `channel` is `None`.
	/// Absent records count as zero.
	async fn cumulative_exp(&self, user: UserId, guild: GuildId, channel: Option<ChannelId>) -> Result<u64>;

	async fn add_exp(&self, user: UserId, guild: GuildId, channel: ChannelId, delta: u64) -> Result<()>;

	/// Subtracts `delta`, clamping the channel counter at zero.
	async fn remove_exp(&self, user: UserId, guild: GuildId, channel: ChannelId, delta: u64) -> Result<()>;

	async fn set_exp(&self, user: UserId, guild: GuildId, channel: ChannelId, value: u64) -> Result<()>;

	async fn reset_user(&self, user: UserId, guild: GuildId) -> Result<()>;

	async fn reset_guild(&self, guild: GuildId) -> Result<()>;

	/// Returns the defaults when the guild was never configured.
	async fn guild_setting(&self, guild: GuildId) -> Result<GuildSetting>;

	async fn save_guild_setting(&self, guild: GuildId, setting: &GuildSetting) -> Result<()>;

	/// Ascending by level.
	async fn level_roles(&self, guild: GuildId) -> Result<Vec<LevelRole>>;

	/// Maps `role` to `level`, replacing any previous level for that role.
	async fn put_level_role(&self, guild: GuildId, role: LevelRole) -> Result<()>;

	/// Returns whether the role was configured.
	async fn remove_level_role(&self, guild: GuildId, role: RoleId) -> Result<bool>;

	async fn clear_level_roles(&self, guild: GuildId) -> Result<()>;

	/// Members by guild total, or by a single channel's counter.
	async fn ranking(&self, guild: GuildId, channel: Option<ChannelId>) -> Result<Vec<RankEntry<UserId>>>;

	/// Channels by experience, for one member or summed over the guild.
	async fn channel_ranking(&self, guild: GuildId, user: Option<UserId>) -> Result<Vec<RankEntry<ChannelId>>>;
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_setting() {
		let setting = GuildSetting::default();
		assert_eq!((setting.min_exp, setting.max_exp), (15, 25));
		assert!(!setting.stack_level_roles);
		assert!(!setting.revoke_roles_on_level_down);
	}

	#[test]
	fn exp_range_validation() {
		let base = GuildSetting::default();
		assert!(matches!(base.with_exp_range(30, 10), Err(LevelingError::InvalidConfiguration(_))));
		assert!(matches!(base.with_exp_range(-1, 10), Err(LevelingError::InvalidConfiguration(_))));
		assert!(matches!(base.with_exp_range(0, i64::MAX), Err(LevelingError::InvalidConfiguration(_))));

		let updated = base.with_exp_range(5, 5).unwrap();
		assert_eq!((updated.min_exp, updated.max_exp), (5, 5));
		assert_eq!(updated.stack_level_roles, base.stack_level_roles);
	}

	#[test]
	fn ranking_ties_share_rank_and_skip() {
		let ranked = rank_entries(vec![("a", 50), ("b", 120), ("c", 50), ("d", 10), ("e", 120)]);
		let view: Vec<(&str, u64, u32)> = ranked.iter().map(|v| (v.key, v.exp, v.rank)).collect();
		assert_eq!(
			view,
			vec![("b", 120, 1), ("e", 120, 1), ("a", 50, 3), ("c", 50, 3), ("d", 10, 5)]
		);
	}

	#[test]
	fn ranking_empty() {
		assert!(rank_entries::<u64>(Vec::new()).is_empty());
	}
}
