//! Experience, levels and level rewards.

pub mod curve;
pub mod error;
pub mod evaluator;
pub mod guard;
pub mod rewards;
pub mod service;
pub mod store;

pub use curve::level_of;
pub use error::{LevelingError, Result};
pub use evaluator::{LevelTransition, LevelUpEvent};
pub use rewards::LevelRole;
pub use service::{Leveling, RankCard, RoleApplier};
pub use store::{GuildSetting, ProgressionStore, RankEntry};
