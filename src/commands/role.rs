use log::{error, info};
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateEmbed, Mentionable};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, CommonCommandType, Param, SubCommand};
use crate::commands::{confirm, error_embed, finish_confirm, guild_leveling, leveling_error_embed, reply};
use crate::leveling::{LevelRole, ProgressionStore};
use crate::utils::color;
use crate::utils::convert::{arg_i64, arg_role};

const PARAM_ROLE: &str = "role";
const PARAM_LEVEL: &str = "level";

pub struct RoleCommand {
	commands: Vec<CommonCommandType>,
}

impl BaseCommand for RoleCommand {
	fn new() -> Self {
		Self {
			commands: vec![
				CommonCommandType::Command(AddCommand::new().to_box()),
				CommonCommandType::Command(RemoveCommand::new().to_box()),
				CommonCommandType::Command(ListCommand::new().to_box()),
				CommonCommandType::Command(ClearCommand::new().to_box()),
			],
		}
	}

	fn get_name(&self) -> String {
		"role".into()
	}

	fn get_description(&self) -> String {
		"レベルロール設定コマンド".into()
	}

	fn requires_admin(&self) -> bool {
		true
	}
}

impl SubCommand for RoleCommand {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType> {
		&self.commands
	}
}

fn format_level_roles(level_roles: &[LevelRole]) -> String {
	level_roles
		.iter()
		.map(|v| format!("Lv.`{}` {}", v.level, v.role.mention()))
		.collect::<Vec<String>>()
		.join("\n")
}

struct AddCommand;

const ADD_PARAMS: [Param; 2] = [
	(PARAM_ROLE, "追加するロール", CommandOptionType::Role, true),
	(PARAM_LEVEL, "ロールを付与するレベル", CommandOptionType::Integer, true),
];

impl BaseCommand for AddCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"add".into()
	}

	fn get_description(&self) -> String {
		"レベルロールを追加します".into()
	}
}

#[async_trait]
impl Command for AddCommand {
	fn args_param(&self) -> &'static [Param] {
		&ADD_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let (Some(role_id), Some(level)) = (arg_role(&args, PARAM_ROLE), arg_i64(&args, PARAM_LEVEL)) else {
			return reply(&ctx, &command, error_embed("ロールとレベルを指定してください"), true).await;
		};

		match leveling.add_level_role(guild_id, role_id, level).await {
			Ok(level_role) => {
				info!("guild {} level role added: {:?}", guild_id, level_role);
				reply(
					&ctx,
					&command,
					CreateEmbed::new()
						.title("完了")
						.description("レベルロールを追加しました")
						.field("ロール", level_role.role.mention().to_string(), true)
						.field("レベル", level_role.level.to_string(), true)
						.color(color::success_color()),
					false,
				)
				.await
			},
			Err(error) => {
				error!("DB Error: {:?}", error);
				reply(&ctx, &command, leveling_error_embed(&error), true).await
			},
		}
	}
}

struct RemoveCommand;

const REMOVE_PARAMS: [Param; 1] = [(PARAM_ROLE, "削除するロール", CommandOptionType::Role, true)];

impl BaseCommand for RemoveCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"remove".into()
	}

	fn get_description(&self) -> String {
		"レベルロールを削除します".into()
	}
}

#[async_trait]
impl Command for RemoveCommand {
	fn args_param(&self) -> &'static [Param] {
		&REMOVE_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let Some(role_id) = arg_role(&args, PARAM_ROLE) else {
			return reply(&ctx, &command, error_embed("ロールを指定してください"), true).await;
		};

		let embed = match leveling.remove_level_role(guild_id, role_id).await {
			Ok(true) => CreateEmbed::new()
				.title("完了")
				.description(format!("{} をレベルロールから削除しました", role_id.mention()))
				.color(color::success_color()),
			Ok(false) => error_embed(format!("{} はレベルロールに登録されていません", role_id.mention())),
			Err(error) => {
				error!("DB Error: {:?}", error);
				leveling_error_embed(&error)
			},
		};

		reply(&ctx, &command, embed, false).await
	}
}

struct ListCommand;

impl BaseCommand for ListCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"list".into()
	}

	fn get_description(&self) -> String {
		"レベルロールの一覧を表示します".into()
	}
}

#[async_trait]
impl Command for ListCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};

		let level_roles = match leveling.store().level_roles(guild_id).await {
			Ok(v) => v,
			Err(error) => {
				error!("DB Error: {:?}", error);
				return reply(&ctx, &command, leveling_error_embed(&error), true).await;
			},
		};
		let description = if level_roles.is_empty() {
			"レベルロールは登録されていません".to_string()
		} else {
			format_level_roles(&level_roles)
		};

		reply(
			&ctx,
			&command,
			CreateEmbed::new()
				.title("レベルロール一覧")
				.description(description)
				.color(color::normal_color()),
			true,
		)
		.await
	}
}

struct ClearCommand;

impl BaseCommand for ClearCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"clear".into()
	}

	fn get_description(&self) -> String {
		"レベルロールをすべて削除します".into()
	}
}

#[async_trait]
impl Command for ClearCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};

		let Some(button_interaction) = confirm(
			&ctx,
			&command,
			CreateEmbed::new()
				.title("確認")
				.description("登録されているレベルロールをすべて削除します。付与済みのロールはそのまま残ります。"),
		)
		.await?
		else {
			return Ok(());
		};

		let embed = match leveling.clear_level_roles(guild_id).await {
			Ok(_) => {
				info!("guild {} level roles cleared", guild_id);
				CreateEmbed::new()
					.title("完了")
					.description("レベルロールをすべて削除しました")
					.color(color::success_color())
			},
			Err(error) => {
				error!("DB Error: {:?}", error);
				leveling_error_embed(&error)
			},
		};

		finish_confirm(&ctx, &button_interaction, embed).await
	}
}
