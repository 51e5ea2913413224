use log::{error, info};
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, CommonCommandType, Param, SubCommand};
use crate::commands::{error_embed, guild_leveling, leveling_error_embed, reply};
use crate::leveling::{GuildSetting, ProgressionStore, Result};
use crate::utils::color;
use crate::utils::convert::{arg_bool, arg_i64};

const PARAM_MIN: &str = "min";
const PARAM_MAX: &str = "max";
const PARAM_ENABLED: &str = "enabled";
const PARAM_REVOKE: &str = "revoke";

fn on_off(value: bool) -> &'static str {
	if value {
		"ON"
	} else {
		"OFF"
	}
}

fn setting_embed(title: &str, setting: &GuildSetting) -> CreateEmbed {
	CreateEmbed::new()
		.title(title)
		.field("獲得経験値", format!("`{}` 〜 `{}`", setting.min_exp, setting.max_exp), false)
		.field("レベルロールの重複", on_off(setting.stack_level_roles), true)
		.field("レベルダウン時のロール剥奪", on_off(setting.revoke_roles_on_level_down), true)
		.color(color::normal_color())
}

async fn reply_setting(
	ctx: &Context,
	command: &CommandInteraction,
	title: &str,
	res: Result<GuildSetting>,
) -> serenity::Result<()> {
	match res {
		Ok(setting) => {
			info!("guild {} setting updated: {:?}", command.guild_id.map(|v| v.get()).unwrap_or_default(), setting);
			reply(ctx, command, setting_embed(title, &setting).color(color::success_color()), false).await
		},
		Err(error) => {
			error!("DB Error: {:?}", error);
			reply(ctx, command, leveling_error_embed(&error), true).await
		},
	}
}

pub struct SettingCommand {
	commands: Vec<CommonCommandType>,
}

impl BaseCommand for SettingCommand {
	fn new() -> Self {
		Self {
			commands: vec![
				CommonCommandType::Command(ShowCommand::new().to_box()),
				CommonCommandType::Command(ExpRangeCommand::new().to_box()),
				CommonCommandType::Command(StackCommand::new().to_box()),
				CommonCommandType::Command(LevelDownCommand::new().to_box()),
			],
		}
	}

	fn get_name(&self) -> String {
		"setting".into()
	}

	fn get_description(&self) -> String {
		"管理者用設定コマンド".into()
	}

	fn requires_admin(&self) -> bool {
		true
	}
}

impl SubCommand for SettingCommand {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType> {
		&self.commands
	}
}

struct ShowCommand;

impl BaseCommand for ShowCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"show".into()
	}

	fn get_description(&self) -> String {
		"現在の設定を表示します".into()
	}
}

#[async_trait]
impl Command for ShowCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};

		match leveling.store().guild_setting(guild_id).await {
			Ok(setting) => reply(&ctx, &command, setting_embed("現在の設定", &setting), true).await,
			Err(error) => {
				error!("DB Error: {:?}", error);
				reply(&ctx, &command, leveling_error_embed(&error), true).await
			},
		}
	}
}

struct ExpRangeCommand;

const EXP_RANGE_PARAMS: [Param; 2] = [
	(PARAM_MIN, "1メッセージで獲得する最小経験値", CommandOptionType::Integer, true),
	(PARAM_MAX, "1メッセージで獲得する最大経験値", CommandOptionType::Integer, true),
];

impl BaseCommand for ExpRangeCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"exp".into()
	}

	fn get_description(&self) -> String {
		"獲得経験値の範囲を設定します".into()
	}
}

#[async_trait]
impl Command for ExpRangeCommand {
	fn args_param(&self) -> &'static [Param] {
		&EXP_RANGE_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let (Some(min_exp), Some(max_exp)) = (arg_i64(&args, PARAM_MIN), arg_i64(&args, PARAM_MAX)) else {
			return reply(&ctx, &command, error_embed("最小値と最大値を指定してください"), true).await;
		};

		let res = leveling.update_exp_range(guild_id, min_exp, max_exp).await;
		reply_setting(&ctx, &command, "獲得経験値を設定しました", res).await
	}
}

struct StackCommand;

const STACK_PARAMS: [Param; 1] = [(
	PARAM_ENABLED,
	"ONで過去のレベルロールを残し、OFFで最新のレベルロールのみにします",
	CommandOptionType::Boolean,
	true,
)];

impl BaseCommand for StackCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"stack".into()
	}

	fn get_description(&self) -> String {
		"レベルロールを重ねて付与するか設定します".into()
	}
}

#[async_trait]
impl Command for StackCommand {
	fn args_param(&self) -> &'static [Param] {
		&STACK_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let Some(enabled) = arg_bool(&args, PARAM_ENABLED) else {
			return reply(&ctx, &command, error_embed("ON/OFFを指定してください"), true).await;
		};

		let res = leveling.set_stack_policy(guild_id, enabled).await;
		reply_setting(&ctx, &command, "レベルロールの重複を設定しました", res).await
	}
}

struct LevelDownCommand;

const LEVEL_DOWN_PARAMS: [Param; 1] = [(
	PARAM_REVOKE,
	"ONで経験値が減ってレベルが下がった時にレベルロールを剥奪します",
	CommandOptionType::Boolean,
	true,
)];

impl BaseCommand for LevelDownCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"level_down".into()
	}

	fn get_description(&self) -> String {
		"レベルダウン時のロールの扱いを設定します".into()
	}
}

#[async_trait]
impl Command for LevelDownCommand {
	fn args_param(&self) -> &'static [Param] {
		&LEVEL_DOWN_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let Some(revoke) = arg_bool(&args, PARAM_REVOKE) else {
			return reply(&ctx, &command, error_embed("ON/OFFを指定してください"), true).await;
		};

		let res = leveling.set_level_down_policy(guild_id, revoke).await;
		reply_setting(&ctx, &command, "レベルダウン時の設定を変更しました", res).await
	}
}
