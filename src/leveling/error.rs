use serenity::all::RoleId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LevelingError>;

#[derive(Debug, Error)]
pub enum LevelingError {
	/// Rejected admin input, e.g. `min_exp > max_exp` or a level of 0.
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("Store unavailable: {0}")]
	StoreUnavailable(String),

	/// The experience change is already committed when this is raised.
	#[error("Failed to apply role {role}: {reason}")]
	RoleApplyFailure { role: RoleId, reason: String },
}

impl From<sea_orm::DbErr> for LevelingError {
	fn from(e: sea_orm::DbErr) -> Self {
		LevelingError::StoreUnavailable(e.to_string())
	}
}
