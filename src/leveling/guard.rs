//! Per-actor serialization of progression updates.
//!
//! Every read-modify-write of a member's experience runs while holding the
//! lock for its `(user, guild)` pair. Different pairs never wait on each other.
//! Member updates also share a guild-wide read lock; guild-wide operations
//! (wiping every counter, rewriting the settings row) take it exclusively and
//! wait for every in-flight member update of that guild.
//!
//! The registries only keep weak references: a lock lives as long as someone
//! holds or waits for it, and dead entries are swept when a map grows.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use serenity::all::{GuildId, UserId};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

const MIN_PRUNE_AT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorKey {
	pub user: UserId,
	pub guild: GuildId,
}

impl ActorKey {
	pub fn new(user: UserId, guild: GuildId) -> Self {
		Self { user, guild }
	}
}

struct Registry<K, L> {
	slots: HashMap<K, Weak<L>>,
	prune_at: usize,
}

impl<K: Eq + Hash, L: Default> Registry<K, L> {
	fn new() -> Self {
		Self {
			slots: HashMap::new(),
			prune_at: MIN_PRUNE_AT,
		}
	}

	fn slot(&mut self, key: K) -> Arc<L> {
		if let Some(slot) = self.slots.get(&key).and_then(Weak::upgrade) {
			return slot;
		}

		if self.slots.len() >= self.prune_at {
			self.slots.retain(|_, v| v.strong_count() > 0);
			self.prune_at = MIN_PRUNE_AT.max(self.slots.len() * 2);
		}

		let slot = Arc::new(L::default());
		self.slots.insert(key, Arc::downgrade(&slot));
		slot
	}
}

pub struct ProgressionGuard {
	actors: Mutex<Registry<ActorKey, AsyncMutex<()>>>,
	guilds: Mutex<Registry<GuildId, RwLock<()>>>,
}

/// Held for the duration of one member update. Dropping it releases the actor.
pub struct ActorLock {
	_actor: OwnedMutexGuard<()>,
	_guild: OwnedRwLockReadGuard<()>,
}

/// Held for the duration of one guild-wide update.
pub struct GuildLock {
	_guard: OwnedRwLockWriteGuard<()>,
}

impl ProgressionGuard {
	pub fn new() -> Self {
		Self {
			actors: Mutex::new(Registry::new()),
			guilds: Mutex::new(Registry::new()),
		}
	}

	/// Waits until no other update for `key`, and no guild-wide update for
	/// its guild, is in flight. Never times out.
	pub async fn acquire(&self, key: ActorKey) -> ActorLock {
		let guild = self.guild_slot(key.guild).read_owned().await;
		let actor = self.actor_slot(key).lock_owned().await;

		ActorLock { _actor: actor, _guild: guild }
	}

	/// Waits until every member update of `guild` has finished, then keeps
	/// new ones out until the returned lock is dropped.
	pub async fn acquire_guild(&self, guild: GuildId) -> GuildLock {
		let guard = self.guild_slot(guild).write_owned().await;

		GuildLock { _guard: guard }
	}

	fn actor_slot(&self, key: ActorKey) -> Arc<AsyncMutex<()>> {
		self.actors.lock().unwrap_or_else(PoisonError::into_inner).slot(key)
	}

	fn guild_slot(&self, guild: GuildId) -> Arc<RwLock<()>> {
		self.guilds.lock().unwrap_or_else(PoisonError::into_inner).slot(guild)
	}

	/// Entries currently in the actor registry, dead ones included.
	#[cfg(test)]
	pub fn tracked_keys(&self) -> usize {
		self.actors.lock().unwrap_or_else(PoisonError::into_inner).slots.len()
	}

	/// Keys with an update running or queued.
	#[cfg(test)]
	pub fn active_keys(&self) -> usize {
		self.actors
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.slots
			.values()
			.filter(|v| v.strong_count() > 0)
			.count()
	}
}

impl Default for ProgressionGuard {
	fn default() -> Self {
		Self::new()
	}
}
