use std::time::Duration;

use log::{debug, error};
use once_cell::sync::Lazy;
use serenity::all::{
	ButtonStyle, CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType, ComponentInteraction,
	CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
	EditInteractionResponse, GuildId,
};
use serenity::builder::CreateCommand;
use serenity::client::Context;

use crate::command_define::{BaseCommand, BuildCommandOption, CommonCommandType};
use crate::commands::channels::ChannelsCommand;
use crate::commands::exp::ExpCommand;
use crate::commands::leaderboard::LeaderboardCommand;
use crate::commands::ping::PingCommand;
use crate::commands::rank::RankCommand;
use crate::commands::reset::ResetCommand;
use crate::commands::role::RoleCommand;
use crate::commands::setting::SettingCommand;
use crate::commands::version::VersionCommand;
use crate::leveling::LevelingError;
use crate::utils::client::{self, SharedLeveling};
use crate::utils::color;

mod channels;
mod exp;
mod leaderboard;
mod ping;
mod rank;
mod reset;
mod role;
mod setting;
mod version;

pub const ROOT_COMMAND_NAME: &str = "level";

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

static COMMANDS: Lazy<Vec<CommonCommandType>> = Lazy::new(|| {
	vec![
		CommonCommandType::Command(RankCommand::new().to_box()),
		CommonCommandType::Command(LeaderboardCommand::new().to_box()),
		CommonCommandType::Command(ChannelsCommand::new().to_box()),
		CommonCommandType::Command(ResetCommand::new().to_box()),
		CommonCommandType::Command(PingCommand::new().to_box()),
		CommonCommandType::Command(VersionCommand::new().to_box()),
		CommonCommandType::SubCommand(SettingCommand::new().to_box()),
		CommonCommandType::SubCommand(RoleCommand::new().to_box()),
		CommonCommandType::SubCommand(ExpCommand::new().to_box()),
	]
});

async fn root_commands_route(ctx: Context, command: CommandInteraction) -> serenity::Result<()> {
	if command.data.options.len() != 1 {
		error!("Command option length is not 1.");
		return Ok(());
	}

	let sub_command: CommandDataOption = command.data.options[0].to_owned();
	let sub_command_name = sub_command.name.to_string();

	match (sub_command.kind(), sub_command.value) {
		(CommandOptionType::SubCommand, CommandDataOptionValue::SubCommand(args)) => {
			for sub_cmd in COMMANDS.iter() {
				if let CommonCommandType::Command(cmd) = sub_cmd {
					if cmd.get_name() == sub_command_name {
						return cmd.execute(ctx, command, args).await;
					}
				}
			}
		},
		(CommandOptionType::SubCommandGroup, CommandDataOptionValue::SubCommandGroup(mut group)) => {
			for sub_cmd in COMMANDS.iter() {
				if let CommonCommandType::SubCommand(cmd) = sub_cmd {
					if cmd.get_name() == sub_command_name && !group.is_empty() {
						return cmd.commands_route(ctx, command, group.remove(0)).await;
					}
				}
			}
		},
		_ => {},
	}

	error!("No Exist Command!");
	Ok(())
}

pub async fn interaction_route(ctx: Context, command: CommandInteraction) {
	debug!("\ncommandID: {}\nname: {}", command.id, command.data.name);
	for option in &command.data.options {
		debug!("option name: {}", option.name);
	}

	if command.user.bot {
		return;
	}

	let res = match command.data.name.as_str() {
		ROOT_COMMAND_NAME => root_commands_route(ctx, command).await,
		_ => {
			error!("No Exist Command!");
			Ok(())
		},
	};
	if let Err(error) = res {
		error!("{}", error);
	}
}

fn root_command_build(command: CreateCommand) -> CreateCommand {
	let mut command = command.description("レベルコマンド").dm_permission(false);
	for sub_cmd in COMMANDS.iter() {
		command = command.add_option(sub_cmd.build_command_option());
	}

	command
}

pub fn app_commands_build() -> CreateCommand {
	root_command_build(CreateCommand::new(ROOT_COMMAND_NAME))
}

pub(crate) fn error_embed(description: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new()
		.title("エラー")
		.description(description)
		.color(color::failed_color())
}

pub(crate) fn leveling_error_embed(error: &LevelingError) -> CreateEmbed {
	match error {
		LevelingError::InvalidConfiguration(reason) => error_embed(format!("設定値が正しくありません: {}", reason)),
		LevelingError::StoreUnavailable(_) => error_embed("データベースに接続できませんでした"),
		LevelingError::RoleApplyFailure { role, .. } => error_embed(format!("<@&{}> を付与できませんでした", role)),
	}
}

pub(crate) async fn reply(ctx: &Context, command: &CommandInteraction, embed: CreateEmbed, ephemeral: bool) -> serenity::Result<()> {
	command
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().add_embed(embed).ephemeral(ephemeral)),
		)
		.await
}

/// The guild the command ran in and the leveling handle. Answers the
/// interaction itself and returns `None` when either is missing.
pub(crate) async fn guild_leveling(
	ctx: &Context,
	command: &CommandInteraction,
) -> serenity::Result<Option<(GuildId, SharedLeveling)>> {
	let Some(guild_id) = command.guild_id else {
		reply(ctx, command, error_embed("このコマンドはサーバー内でのみ使用できます"), true).await?;
		return Ok(None);
	};
	let Some(leveling) = client::leveling().await else {
		error!("Leveling is not initialized.");
		reply(ctx, command, error_embed("起動処理中です。しばらくしてから再度お試しください"), true).await?;
		return Ok(None);
	};

	Ok(Some((guild_id, leveling)))
}

/// Asks the invoker to confirm with OK/Cancel buttons. Returns the button
/// interaction when OK was pressed; cancel and timeout are answered here.
pub(crate) async fn confirm(
	ctx: &Context,
	command: &CommandInteraction,
	embed: CreateEmbed,
) -> serenity::Result<Option<ComponentInteraction>> {
	let ok_id = format!("ok_{}", command.id);
	let cancel_id = format!("cancel_{}", command.id);

	command
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Message(
				CreateInteractionResponseMessage::new()
					.add_embed(embed.color(color::warning_color()))
					.components(vec![CreateActionRow::Buttons(vec![
						CreateButton::new(&ok_id).style(ButtonStyle::Danger).label("OK"),
						CreateButton::new(&cancel_id).style(ButtonStyle::Secondary).label("キャンセル"),
					])])
					.ephemeral(true),
			),
		)
		.await?;

	let message = command.get_response(&ctx.http).await?;
	let button_interaction = match message
		.await_component_interaction(ctx)
		.author_id(command.user.id)
		.timeout(CONFIRM_TIMEOUT)
		.await
	{
		Some(x) => x,
		None => {
			debug!("interaction timeout...");
			command
				.edit_response(
					&ctx.http,
					EditInteractionResponse::new().components(vec![]).embeds(vec![CreateEmbed::new()
						.title("タイムアウト")
						.description("操作がなかったため取り消しました")
						.color(color::normal_color())]),
				)
				.await?;
			return Ok(None);
		},
	};

	if button_interaction.data.custom_id == ok_id {
		return Ok(Some(button_interaction));
	}

	button_interaction
		.create_response(
			&ctx.http,
			CreateInteractionResponse::UpdateMessage(
				CreateInteractionResponseMessage::new()
					.components(vec![])
					.embeds(vec![CreateEmbed::new()
						.title("キャンセル")
						.description("処理を取り消しました")
						.color(color::normal_color())]),
			),
		)
		.await?;

	Ok(None)
}

/// Replaces the confirmation prompt with the outcome.
pub(crate) async fn finish_confirm(
	ctx: &Context,
	button_interaction: &ComponentInteraction,
	embed: CreateEmbed,
) -> serenity::Result<()> {
	button_interaction
		.create_response(
			&ctx.http,
			CreateInteractionResponse::UpdateMessage(
				CreateInteractionResponseMessage::new().components(vec![]).embeds(vec![embed]),
			),
		)
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::command_define::{Command, SubCommand};
	use std::collections::HashSet;

	#[test]
	fn command_names_are_unique() {
		let names: Vec<String> = COMMANDS
			.iter()
			.map(|v| match v {
				CommonCommandType::Command(cmd) => cmd.get_name(),
				CommonCommandType::SubCommand(cmd) => cmd.get_name(),
			})
			.collect();
		let unique: HashSet<&String> = names.iter().collect();

		assert_eq!(names.len(), unique.len());
		assert_eq!(names.len(), 9);
	}

	#[test]
	fn admin_groups_are_restricted() {
		for sub_cmd in COMMANDS.iter() {
			match sub_cmd {
				CommonCommandType::Command(cmd) => assert!(!cmd.requires_admin(), "{}", cmd.get_name()),
				CommonCommandType::SubCommand(cmd) => assert!(cmd.requires_admin(), "{}", cmd.get_name()),
			}
		}
	}
}
