pub mod guild_setting;
pub mod level_role;
pub mod user_level;

pub type GuildSetting = guild_setting::Model;
pub type GuildSettingBehavior = guild_setting::Entity;

pub type LevelRole = level_role::Model;
pub type LevelRoleBehavior = level_role::Entity;

pub type UserLevel = user_level::Model;
pub type UserLevelBehavior = user_level::Entity;
