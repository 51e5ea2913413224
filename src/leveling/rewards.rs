use std::collections::BTreeSet;

use serenity::all::RoleId;

/// A configured level reward. `level` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRole {
	pub level: u32,
	pub role: RoleId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDelta {
	pub to_add: BTreeSet<RoleId>,
	pub to_remove: BTreeSet<RoleId>,
}

impl RoleDelta {
	pub fn is_empty(&self) -> bool {
		self.to_add.is_empty() && self.to_remove.is_empty()
	}
}

/// Role changes for a member who just reached `new_level`.
///
/// Every role configured exactly at `new_level` is granted. With the replace
/// policy (`stack == false`) every other configured role is stripped, but only
/// if something is granted: a level without a reward changes nothing.
pub fn resolve_rewards(level_roles: &[LevelRole], new_level: u32, stack: bool) -> RoleDelta {
	let to_add: BTreeSet<RoleId> = level_roles
		.iter()
		.filter(|v| v.level == new_level)
		.map(|v| v.role)
		.collect();

	if to_add.is_empty() || stack {
		return RoleDelta { to_add, to_remove: BTreeSet::new() };
	}

	let to_remove = level_roles
		.iter()
		.filter(|v| v.level != new_level && !to_add.contains(&v.role))
		.map(|v| v.role)
		.collect();

	RoleDelta { to_add, to_remove }
}

/// Role changes for a member who dropped to `new_level`, used only when the
/// guild revokes rewards on level loss.
///
/// Rewards above `new_level` are removed. With the replace policy the member
/// falls back to the highest tier still earned, if any.
pub fn resolve_level_down(level_roles: &[LevelRole], new_level: u32, stack: bool) -> RoleDelta {
	if stack {
		let to_remove = level_roles
			.iter()
			.filter(|v| v.level > new_level)
			.map(|v| v.role)
			.collect();
		return RoleDelta { to_add: BTreeSet::new(), to_remove };
	}

	let tier = level_roles
		.iter()
		.map(|v| v.level)
		.filter(|level| *level <= new_level)
		.max();

	let Some(tier) = tier else {
		let to_remove = level_roles.iter().map(|v| v.role).collect();
		return RoleDelta { to_add: BTreeSet::new(), to_remove };
	};

	// tier is a configured level, so this always grants something
	resolve_rewards(level_roles, tier, false)
}
