use std::sync::Arc;

use serenity::all::{GuildId, RoleId, UserId};
use serenity::async_trait;
use serenity::http::Http;

use crate::leveling::{LevelingError, Result, RoleApplier};

const AUDIT_REASON: &str = "level reward";

/// Applies level rewards through the Discord REST API.
pub struct MemberRoles {
	http: Arc<Http>,
}

impl MemberRoles {
	pub fn new(http: Arc<Http>) -> Self {
		Self { http }
	}
}

#[async_trait]
impl RoleApplier for MemberRoles {
	async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<()> {
		self.http
			.add_member_role(guild, user, role, Some(AUDIT_REASON))
			.await
			.map_err(|e| LevelingError::RoleApplyFailure {
				role,
				reason: e.to_string(),
			})
	}

	async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<()> {
		self.http
			.remove_member_role(guild, user, role, Some(AUDIT_REASON))
			.await
			.map_err(|e| LevelingError::RoleApplyFailure {
				role,
				reason: e.to_string(),
			})
	}
}
