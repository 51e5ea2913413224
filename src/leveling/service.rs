use log::{debug, error, info};
use rand::Rng;
use serenity::all::{ChannelId, GuildId, RoleId, UserId};
use serenity::async_trait;

use super::curve::{level_of, next_level_threshold};
use super::error::{LevelingError, Result};
use super::evaluator::{evaluate, transition, LevelTransition, LevelUpEvent};
use super::guard::{ActorKey, ProgressionGuard};
use super::rewards::{resolve_level_down, resolve_rewards, LevelRole, RoleDelta};
use super::store::{GuildSetting, ProgressionStore};

/// Membership changes on the chat platform. Adding a role the member already
/// has, or removing one they lack, must succeed.
#[async_trait]
pub trait RoleApplier: Send + Sync {
	async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<()>;
	async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankCard {
	pub exp: u64,
	pub level: u32,
	pub remainder: u64,
	pub next: u64,
	pub rank: Option<u32>,
}

pub struct Leveling<S> {
	store: S,
	guard: ProgressionGuard,
}

/// Draws the per-message gain, inclusive on both ends.
pub fn roll_gain(setting: &GuildSetting) -> u64 {
	if setting.min_exp >= setting.max_exp {
		return u64::from(setting.min_exp);
	}
	u64::from(rand::rng().random_range(setting.min_exp..=setting.max_exp))
}

impl<S: ProgressionStore> Leveling<S> {
	pub fn new(store: S) -> Self {
		Self {
			store,
			guard: ProgressionGuard::new(),
		}
	}

	/// Unsynchronized read access for rank and leaderboard views.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// Awards one qualifying message. Store failures abort the award with
	/// nothing granted; role failures are logged and leave the grant in place.
	pub async fn award_message<R: RoleApplier + ?Sized>(
		&self,
		user: UserId,
		guild: GuildId,
		channel: ChannelId,
		roles: &R,
	) -> Result<Option<LevelUpEvent>> {
		let _lock = self.guard.acquire(ActorKey::new(user, guild)).await;

		let setting = self.store.guild_setting(guild).await?;
		let before = self.store.cumulative_exp(user, guild, None).await?;
		let gain = roll_gain(&setting);
		self.store.add_exp(user, guild, channel, gain).await?;
		let after = before.saturating_add(gain);

		debug!("user {} gained {} exp in guild {} ({} -> {})", user, gain, guild, before, after);

		let event = evaluate(before, after);
		if let Some(event) = event {
			info!("user {} level up in guild {}: {} -> {}", user, guild, event.old_level, event.new_level);
			self.apply_transition(user, guild, &setting, LevelTransition::Up(event), roles).await;
		}

		Ok(event)
	}

	/// Admin grant. Crossing a boundary applies rewards like a message would.
	pub async fn grant_exp<R: RoleApplier + ?Sized>(
		&self,
		user: UserId,
		guild: GuildId,
		channel: ChannelId,
		amount: u64,
		roles: &R,
	) -> Result<LevelTransition> {
		let _lock = self.guard.acquire(ActorKey::new(user, guild)).await;

		let setting = self.store.guild_setting(guild).await?;
		let before = self.store.cumulative_exp(user, guild, None).await?;
		self.store.add_exp(user, guild, channel, amount).await?;
		let res = transition(before, before.saturating_add(amount));

		self.apply_transition(user, guild, &setting, res, roles).await;

		Ok(res)
	}

	/// Admin removal from one channel counter, clamped at zero. Rewards are
	/// only retracted when the guild opted into it.
	pub async fn revoke_exp<R: RoleApplier + ?Sized>(
		&self,
		user: UserId,
		guild: GuildId,
		channel: ChannelId,
		amount: u64,
		roles: &R,
	) -> Result<LevelTransition> {
		let _lock = self.guard.acquire(ActorKey::new(user, guild)).await;

		let setting = self.store.guild_setting(guild).await?;
		let before = self.store.cumulative_exp(user, guild, None).await?;
		self.store.remove_exp(user, guild, channel, amount).await?;
		let after = self.store.cumulative_exp(user, guild, None).await?;
		let res = transition(before, after);

		self.apply_transition(user, guild, &setting, res, roles).await;

		Ok(res)
	}

	/// Admin overwrite of one channel counter.
	pub async fn set_exp<R: RoleApplier + ?Sized>(
		&self,
		user: UserId,
		guild: GuildId,
		channel: ChannelId,
		value: u64,
		roles: &R,
	) -> Result<LevelTransition> {
		let _lock = self.guard.acquire(ActorKey::new(user, guild)).await;

		let setting = self.store.guild_setting(guild).await?;
		let before = self.store.cumulative_exp(user, guild, None).await?;
		self.store.set_exp(user, guild, channel, value).await?;
		let after = self.store.cumulative_exp(user, guild, None).await?;
		let res = transition(before, after);

		self.apply_transition(user, guild, &setting, res, roles).await;

		Ok(res)
	}

	pub async fn reset_user<R: RoleApplier + ?Sized>(&self, user: UserId, guild: GuildId, roles: &R) -> Result<LevelTransition> {
		let _lock = self.guard.acquire(ActorKey::new(user, guild)).await;

		let setting = self.store.guild_setting(guild).await?;
		let before = self.store.cumulative_exp(user, guild, None).await?;
		self.store.reset_user(user, guild).await?;
		let res = transition(before, 0);

		self.apply_transition(user, guild, &setting, res, roles).await;

		Ok(res)
	}

	/// Wipes every counter of the guild once in-flight member updates have
	/// finished. Reward roles are left untouched.
	pub async fn reset_guild(&self, guild: GuildId) -> Result<()> {
		let _lock = self.guard.acquire_guild(guild).await;

		self.store.reset_guild(guild).await
	}

	pub async fn update_exp_range(&self, guild: GuildId, min_exp: i64, max_exp: i64) -> Result<GuildSetting> {
		let _lock = self.guard.acquire_guild(guild).await;

		let setting = self.store.guild_setting(guild).await?.with_exp_range(min_exp, max_exp)?;
		self.store.save_guild_setting(guild, &setting).await?;

		Ok(setting)
	}

	pub async fn set_stack_policy(&self, guild: GuildId, stack: bool) -> Result<GuildSetting> {
		let _lock = self.guard.acquire_guild(guild).await;

		let setting = GuildSetting {
			stack_level_roles: stack,
			..self.store.guild_setting(guild).await?
		};
		self.store.save_guild_setting(guild, &setting).await?;

		Ok(setting)
	}

	pub async fn set_level_down_policy(&self, guild: GuildId, revoke: bool) -> Result<GuildSetting> {
		let _lock = self.guard.acquire_guild(guild).await;

		let setting = GuildSetting {
			revoke_roles_on_level_down: revoke,
			..self.store.guild_setting(guild).await?
		};
		self.store.save_guild_setting(guild, &setting).await?;

		Ok(setting)
	}

	pub async fn add_level_role(&self, guild: GuildId, role: RoleId, level: i64) -> Result<LevelRole> {
		let level = u32::try_from(level)
			.ok()
			.filter(|v| *v >= 1)
			.ok_or_else(|| LevelingError::InvalidConfiguration(format!("level must be 1 or greater: {}", level)))?;
		let level_role = LevelRole { level, role };
		self.store.put_level_role(guild, level_role).await?;

		Ok(level_role)
	}

	pub async fn remove_level_role(&self, guild: GuildId, role: RoleId) -> Result<bool> {
		self.store.remove_level_role(guild, role).await
	}

	pub async fn clear_level_roles(&self, guild: GuildId) -> Result<()> {
		self.store.clear_level_roles(guild).await
	}

	pub async fn rank_card(&self, user: UserId, guild: GuildId, channel: Option<ChannelId>) -> Result<RankCard> {
		let exp = self.store.cumulative_exp(user, guild, channel).await?;
		let (level, remainder) = level_of(exp);
		let rank = self
			.store
			.ranking(guild, channel)
			.await?
			.into_iter()
			.find(|v| v.key == user)
			.map(|v| v.rank);

		Ok(RankCard {
			exp,
			level,
			remainder,
			next: next_level_threshold(level),
			rank,
		})
	}

	async fn apply_transition<R: RoleApplier + ?Sized>(
		&self,
		user: UserId,
		guild: GuildId,
		setting: &GuildSetting,
		level_change: LevelTransition,
		roles: &R,
	) {
		let resolve = match level_change {
			LevelTransition::Up(event) => Some((event.new_level, false)),
			LevelTransition::Down { new_level, .. } if setting.revoke_roles_on_level_down => Some((new_level, true)),
			_ => None,
		};
		let Some((new_level, is_down)) = resolve else {
			return;
		};

		// experience is already committed, so a failed lookup only skips rewards
		let level_roles = match self.store.level_roles(guild).await {
			Ok(v) => v,
			Err(error) => {
				error!("Failed to load level roles for guild {}: {}", guild, error);
				return;
			},
		};

		let delta = if is_down {
			resolve_level_down(&level_roles, new_level, setting.stack_level_roles)
		} else {
			resolve_rewards(&level_roles, new_level, setting.stack_level_roles)
		};
		if delta.is_empty() {
			return;
		}

		for error in apply_role_delta(guild, user, &delta, roles).await {
			error!("{}", error);
		}
	}
}

/// Applies every change in `delta`, continuing past failures.
pub async fn apply_role_delta<R: RoleApplier + ?Sized>(
	guild: GuildId,
	user: UserId,
	delta: &RoleDelta,
	roles: &R,
) -> Vec<LevelingError> {
	let mut failures = Vec::new();

	for role in &delta.to_add {
		if let Err(error) = roles.add_role(guild, user, *role).await {
			failures.push(error);
		}
	}
	for role in &delta.to_remove {
		if let Err(error) = roles.remove_role(guild, user, *role).await {
			failures.push(error);
		}
	}

	failures
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;
	use std::sync::atomic::Ordering;
	use std::sync::{Arc, Mutex};

	use super::*;
	use crate::leveling::curve::total_exp_for_level;
	use crate::leveling::store::memory::MemoryStore;

	#[derive(Default)]
	struct RecordingRoles {
		held: Mutex<BTreeSet<RoleId>>,
		calls: Mutex<Vec<(bool, RoleId)>>,
		failing: bool,
	}

	impl RecordingRoles {
		fn failing() -> Self {
			Self { failing: true, ..Default::default() }
		}

		fn held(&self) -> BTreeSet<RoleId> {
			self.held.lock().unwrap().clone()
		}
	}

	#[async_trait]
	impl RoleApplier for RecordingRoles {
		async fn add_role(&self, _: GuildId, _: UserId, role: RoleId) -> Result<()> {
			self.calls.lock().unwrap().push((true, role));
			if self.failing {
				return Err(LevelingError::RoleApplyFailure { role, reason: "Missing Permissions".into() });
			}
			self.held.lock().unwrap().insert(role);
			Ok(())
		}

		async fn remove_role(&self, _: GuildId, _: UserId, role: RoleId) -> Result<()> {
			self.calls.lock().unwrap().push((false, role));
			if self.failing {
				return Err(LevelingError::RoleApplyFailure { role, reason: "Missing Permissions".into() });
			}
			self.held.lock().unwrap().remove(&role);
			Ok(())
		}
	}

	const USER: UserId = UserId::new(100);
	const GUILD: GuildId = GuildId::new(200);
	const CHANNEL: ChannelId = ChannelId::new(300);
	const ROLE_A: RoleId = RoleId::new(5);
	const ROLE_B: RoleId = RoleId::new(10);

	async fn fixed_gain_leveling(gain: i64) -> Leveling<MemoryStore> {
		let leveling = Leveling::new(MemoryStore::default());
		leveling.update_exp_range(GUILD, gain, gain).await.unwrap();
		leveling
	}

	async fn with_tier_roles(leveling: &Leveling<MemoryStore>) {
		leveling.add_level_role(GUILD, ROLE_A, 5).await.unwrap();
		leveling.add_level_role(GUILD, ROLE_B, 10).await.unwrap();
	}

	#[test]
	fn roll_gain_stays_in_range() {
		let setting = GuildSetting::default();
		for _ in 0..500 {
			let gain = roll_gain(&setting);
			assert!((15..=25).contains(&gain));
		}
		let fixed = GuildSetting::default().with_exp_range(15, 15).unwrap();
		assert_eq!(roll_gain(&fixed), 15);
	}

	#[tokio::test]
	async fn first_message_does_not_level_up() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();

		let event = leveling.award_message(USER, GUILD, CHANNEL, &roles).await.unwrap();

		assert_eq!(event, None);
		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 15);
	}

	#[tokio::test]
	async fn level_up_fires_once_at_the_crossing_message() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();

		let mut events = Vec::new();
		for message in 1..=10 {
			if let Some(event) = leveling.award_message(USER, GUILD, CHANNEL, &roles).await.unwrap() {
				events.push((message, event));
			}
		}

		// 7 * 15 = 105 is the first total at or above 100
		assert_eq!(events, vec![(7, LevelUpEvent { old_level: 0, new_level: 1 })]);
	}

	#[tokio::test]
	async fn concurrent_messages_keep_every_gain() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();

		let awards = (0..30).map(|_| leveling.award_message(USER, GUILD, CHANNEL, &roles));
		let events: Vec<LevelUpEvent> = futures::future::join_all(awards)
			.await
			.into_iter()
			.filter_map(|v| v.unwrap())
			.collect();

		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 450);
		assert_eq!(
			events,
			vec![
				LevelUpEvent { old_level: 0, new_level: 1 },
				LevelUpEvent { old_level: 1, new_level: 2 },
			]
		);
	}

	#[tokio::test]
	async fn unserialized_awards_miss_level_ups() {
		let store = MemoryStore::default();
		let unguarded = (0..30).map(|_| async {
			let before = store.cumulative_exp(USER, GUILD, None).await.unwrap();
			store.add_exp(USER, GUILD, CHANNEL, 15).await.unwrap();
			evaluate(before, before + 15)
		});
		let events: Vec<LevelUpEvent> = futures::future::join_all(unguarded)
			.await
			.into_iter()
			.flatten()
			.collect();

		assert_eq!(store.cumulative_exp(USER, GUILD, None).await.unwrap(), 450);
		assert_ne!(events.len(), 2);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_messages_across_threads() {
		let leveling = Arc::new(fixed_gain_leveling(20).await);
		let roles = Arc::new(RecordingRoles::default());

		let mut tasks = Vec::new();
		for _ in 0..40 {
			let leveling = Arc::clone(&leveling);
			let roles = Arc::clone(&roles);
			tasks.push(tokio::spawn(async move {
				leveling.award_message(USER, GUILD, CHANNEL, roles.as_ref()).await
			}));
		}
		let mut ups = 0;
		for task in tasks {
			if task.await.unwrap().unwrap().is_some() {
				ups += 1;
			}
		}

		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 800);
		assert_eq!(ups, level_of(800).0);
	}

	#[tokio::test]
	async fn replace_policy_swaps_tier_roles() {
		let leveling = Leveling::new(MemoryStore::default());
		with_tier_roles(&leveling).await;
		let roles = RecordingRoles::default();

		leveling.grant_exp(USER, GUILD, CHANNEL, total_exp_for_level(5), &roles).await.unwrap();
		assert_eq!(roles.held(), BTreeSet::from([ROLE_A]));

		let to_ten = total_exp_for_level(10) - total_exp_for_level(5);
		let res = leveling.grant_exp(USER, GUILD, CHANNEL, to_ten, &roles).await.unwrap();
		assert_eq!(res, LevelTransition::Up(LevelUpEvent { old_level: 5, new_level: 10 }));
		assert_eq!(roles.held(), BTreeSet::from([ROLE_B]));
	}

	#[tokio::test]
	async fn stack_policy_keeps_earlier_roles() {
		let leveling = Leveling::new(MemoryStore::default());
		with_tier_roles(&leveling).await;
		leveling.set_stack_policy(GUILD, true).await.unwrap();
		let roles = RecordingRoles::default();

		leveling.grant_exp(USER, GUILD, CHANNEL, total_exp_for_level(5), &roles).await.unwrap();
		leveling
			.grant_exp(USER, GUILD, CHANNEL, total_exp_for_level(10) - total_exp_for_level(5), &roles)
			.await
			.unwrap();

		assert_eq!(roles.held(), BTreeSet::from([ROLE_A, ROLE_B]));
	}

	#[tokio::test]
	async fn level_without_reward_leaves_roles_alone() {
		let leveling = Leveling::new(MemoryStore::default());
		with_tier_roles(&leveling).await;
		let roles = RecordingRoles::default();

		leveling.grant_exp(USER, GUILD, CHANNEL, total_exp_for_level(7), &roles).await.unwrap();

		assert!(roles.calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn role_failure_keeps_the_experience() {
		let leveling = fixed_gain_leveling(100).await;
		leveling.add_level_role(GUILD, ROLE_A, 1).await.unwrap();
		let roles = RecordingRoles::failing();

		let event = leveling.award_message(USER, GUILD, CHANNEL, &roles).await.unwrap();

		assert_eq!(event, Some(LevelUpEvent { old_level: 0, new_level: 1 }));
		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 100);
		assert_eq!(*roles.calls.lock().unwrap(), vec![(true, ROLE_A)]);
	}

	#[tokio::test]
	async fn store_failure_grants_nothing() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();
		leveling.store().unavailable.store(true, Ordering::SeqCst);

		let res = leveling.award_message(USER, GUILD, CHANNEL, &roles).await;
		assert!(matches!(res, Err(LevelingError::StoreUnavailable(_))));

		leveling.store().unavailable.store(false, Ordering::SeqCst);
		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 0);
		assert!(roles.calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn revoke_clamps_and_keeps_roles_by_default() {
		let leveling = Leveling::new(MemoryStore::default());
		with_tier_roles(&leveling).await;
		let roles = RecordingRoles::default();
		leveling.grant_exp(USER, GUILD, CHANNEL, total_exp_for_level(10), &roles).await.unwrap();

		let res = leveling.revoke_exp(USER, GUILD, CHANNEL, u64::MAX, &roles).await.unwrap();

		assert_eq!(res, LevelTransition::Down { old_level: 10, new_level: 0 });
		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 0);
		assert_eq!(roles.held(), BTreeSet::from([ROLE_B]));
	}

	#[tokio::test]
	async fn revoke_retracts_roles_when_enabled() {
		let leveling = Leveling::new(MemoryStore::default());
		with_tier_roles(&leveling).await;
		leveling.set_level_down_policy(GUILD, true).await.unwrap();
		let roles = RecordingRoles::default();
		leveling.grant_exp(USER, GUILD, CHANNEL, total_exp_for_level(10), &roles).await.unwrap();

		let drop_to_six = total_exp_for_level(10) - total_exp_for_level(6);
		leveling.revoke_exp(USER, GUILD, CHANNEL, drop_to_six, &roles).await.unwrap();

		assert_eq!(roles.held(), BTreeSet::from([ROLE_A]));
	}

	#[tokio::test]
	async fn set_exp_overwrites_one_channel() {
		let leveling = Leveling::new(MemoryStore::default());
		with_tier_roles(&leveling).await;
		let roles = RecordingRoles::default();
		let other_channel = ChannelId::new(301);
		leveling.grant_exp(USER, GUILD, other_channel, 50, &roles).await.unwrap();

		let res = leveling
			.set_exp(USER, GUILD, CHANNEL, total_exp_for_level(5) - 50, &roles)
			.await
			.unwrap();

		assert_eq!(res, LevelTransition::Up(LevelUpEvent { old_level: 0, new_level: 5 }));
		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, Some(other_channel)).await.unwrap(), 50);
		assert_eq!(roles.held(), BTreeSet::from([ROLE_A]));
	}

	#[tokio::test]
	async fn reset_user_clears_only_that_member() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();
		let other = UserId::new(101);
		leveling.award_message(USER, GUILD, CHANNEL, &roles).await.unwrap();
		leveling.award_message(other, GUILD, CHANNEL, &roles).await.unwrap();

		leveling.reset_user(USER, GUILD, &roles).await.unwrap();

		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 0);
		assert_eq!(leveling.store().cumulative_exp(other, GUILD, None).await.unwrap(), 15);
	}

	#[tokio::test]
	async fn invalid_settings_are_rejected() {
		let leveling = Leveling::new(MemoryStore::default());

		assert!(matches!(
			leveling.update_exp_range(GUILD, 30, 10).await,
			Err(LevelingError::InvalidConfiguration(_))
		));
		assert!(matches!(
			leveling.add_level_role(GUILD, ROLE_A, 0).await,
			Err(LevelingError::InvalidConfiguration(_))
		));
		assert_eq!(leveling.store().guild_setting(GUILD).await.unwrap(), GuildSetting::default());
		assert!(leveling.store().level_roles(GUILD).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn rank_card_uses_guild_totals() {
		let leveling = Leveling::new(MemoryStore::default());
		let roles = RecordingRoles::default();
		let second_channel = ChannelId::new(301);
		leveling.grant_exp(USER, GUILD, CHANNEL, 60, &roles).await.unwrap();
		leveling.grant_exp(USER, GUILD, second_channel, 60, &roles).await.unwrap();
		leveling.grant_exp(UserId::new(101), GUILD, CHANNEL, 500, &roles).await.unwrap();

		let card = leveling.rank_card(USER, GUILD, None).await.unwrap();
		assert_eq!(card, RankCard { exp: 120, level: 1, remainder: 20, next: 155, rank: Some(2) });

		let in_channel = leveling.rank_card(USER, GUILD, Some(second_channel)).await.unwrap();
		assert_eq!(in_channel.exp, 60);
		assert_eq!(in_channel.rank, Some(1));

		let stranger = leveling.rank_card(UserId::new(999), GUILD, None).await.unwrap();
		assert_eq!(stranger.rank, None);
		assert_eq!(stranger.level, 0);
	}

	#[tokio::test]
	async fn guild_reset_lands_between_member_updates() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();
		leveling.add_level_role(GUILD, ROLE_A, 1).await.unwrap();
		leveling.grant_exp(USER, GUILD, CHANNEL, 95, &roles).await.unwrap();

		let (event, reset) = tokio::join!(leveling.award_message(USER, GUILD, CHANNEL, &roles), async {
			tokio::task::yield_now().await;
			leveling.reset_guild(GUILD).await
		});
		reset.unwrap();
		let stored = leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap();

		// either the award finished before the wipe, or it started after it
		match event.unwrap() {
			Some(event) => {
				assert_eq!(event, LevelUpEvent { old_level: 0, new_level: 1 });
				assert_eq!(stored, 0);
			},
			None => {
				assert_eq!(stored, 15);
				assert!(roles.held().is_empty());
			},
		}
	}

	#[tokio::test]
	async fn guild_reset_clears_every_member() {
		let leveling = fixed_gain_leveling(15).await;
		let roles = RecordingRoles::default();
		let other = UserId::new(101);
		let other_guild = GuildId::new(201);
		leveling.award_message(USER, GUILD, CHANNEL, &roles).await.unwrap();
		leveling.award_message(other, GUILD, CHANNEL, &roles).await.unwrap();
		leveling.grant_exp(USER, other_guild, CHANNEL, 40, &roles).await.unwrap();

		leveling.reset_guild(GUILD).await.unwrap();

		assert_eq!(leveling.store().cumulative_exp(USER, GUILD, None).await.unwrap(), 0);
		assert_eq!(leveling.store().cumulative_exp(other, GUILD, None).await.unwrap(), 0);
		assert_eq!(leveling.store().cumulative_exp(USER, other_guild, None).await.unwrap(), 40);
	}

	#[tokio::test]
	async fn concurrent_setting_changes_are_all_kept() {
		let leveling = Leveling::new(MemoryStore::default());

		let (range, stack, revoke) = tokio::join!(
			leveling.update_exp_range(GUILD, 30, 40),
			leveling.set_stack_policy(GUILD, true),
			leveling.set_level_down_policy(GUILD, true),
		);
		range.unwrap();
		stack.unwrap();
		revoke.unwrap();

		assert_eq!(
			leveling.store().guild_setting(GUILD).await.unwrap(),
			GuildSetting {
				min_exp: 30,
				max_exp: 40,
				stack_level_roles: true,
				revoke_roles_on_level_down: true,
			}
		);
	}
}
