use log::{error, info};
use serenity::all::{
	ChannelId, CommandDataOption, CommandInteraction, CommandOptionType, CreateEmbed, Mentionable, UserId,
};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, CommonCommandType, Param, SubCommand};
use crate::commands::{confirm, error_embed, finish_confirm, guild_leveling, leveling_error_embed, reply};
use crate::leveling::{LevelTransition, Result};
use crate::utils::color;
use crate::utils::convert::{arg_channel, arg_i64, arg_user};
use crate::utils::roles::MemberRoles;

const PARAM_USER: &str = "user";
const PARAM_AMOUNT: &str = "amount";
const PARAM_CHANNEL: &str = "channel";

pub struct ExpCommand {
	commands: Vec<CommonCommandType>,
}

impl BaseCommand for ExpCommand {
	fn new() -> Self {
		Self {
			commands: vec![
				CommonCommandType::Command(AddCommand::new().to_box()),
				CommonCommandType::Command(RemoveCommand::new().to_box()),
				CommonCommandType::Command(SetCommand::new().to_box()),
				CommonCommandType::Command(ResetUserCommand::new().to_box()),
				CommonCommandType::Command(ResetGuildCommand::new().to_box()),
			],
		}
	}

	fn get_name(&self) -> String {
		"exp".into()
	}

	fn get_description(&self) -> String {
		"経験値管理コマンド".into()
	}

	fn requires_admin(&self) -> bool {
		true
	}
}

impl SubCommand for ExpCommand {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType> {
		&self.commands
	}
}

const AMOUNT_PARAMS: [Param; 3] = [
	(PARAM_USER, "対象のメンバー", CommandOptionType::User, true),
	(PARAM_AMOUNT, "経験値", CommandOptionType::Integer, true),
	(PARAM_CHANNEL, "対象のチャンネル (省略時はこのチャンネル)", CommandOptionType::Channel, false),
];

/// Target member, non-negative amount and channel (the invoking channel when
/// omitted).
fn amount_args(args: &[CommandDataOption], here: ChannelId) -> std::result::Result<(UserId, u64, ChannelId), &'static str> {
	let (Some(user_id), Some(amount)) = (arg_user(args, PARAM_USER), arg_i64(args, PARAM_AMOUNT)) else {
		return Err("メンバーと経験値を指定してください");
	};
	let amount = u64::try_from(amount).map_err(|_| "経験値は0以上で指定してください")?;

	Ok((user_id, amount, arg_channel(args, PARAM_CHANNEL).unwrap_or(here)))
}

fn transition_text(user_id: UserId, res: LevelTransition) -> String {
	match res {
		LevelTransition::Unchanged { level } => format!("{} Level: `{}`", user_id.mention(), level),
		LevelTransition::Up(event) => {
			format!("{} Level: `{}` -> `{}`", user_id.mention(), event.old_level, event.new_level)
		},
		LevelTransition::Down { old_level, new_level } => {
			format!("{} Level: `{}` -> `{}`", user_id.mention(), old_level, new_level)
		},
	}
}

fn result_embed(title: &str, user_id: UserId, res: Result<LevelTransition>) -> CreateEmbed {
	match res {
		Ok(level_change) => CreateEmbed::new()
			.title(title)
			.description(transition_text(user_id, level_change))
			.color(color::success_color()),
		Err(error) => {
			error!("DB Error: {:?}", error);
			leveling_error_embed(&error)
		},
	}
}

struct AddCommand;

impl BaseCommand for AddCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"add".into()
	}

	fn get_description(&self) -> String {
		"経験値を付与します".into()
	}
}

#[async_trait]
impl Command for AddCommand {
	fn args_param(&self) -> &'static [Param] {
		&AMOUNT_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let (user_id, amount, channel_id) = match amount_args(&args, command.channel_id) {
			Ok(v) => v,
			Err(message) => return reply(&ctx, &command, error_embed(message), true).await,
		};

		let roles = MemberRoles::new(ctx.http.clone());
		let res = leveling.grant_exp(user_id, guild_id, channel_id, amount, &roles).await;
		if res.is_ok() {
			info!("{} granted {} exp to {} in guild {}", command.user.id, amount, user_id, guild_id);
		}

		reply(&ctx, &command, result_embed("経験値を付与しました", user_id, res), false).await
	}
}

struct RemoveCommand;

impl BaseCommand for RemoveCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"remove".into()
	}

	fn get_description(&self) -> String {
		"経験値を減らします".into()
	}
}

#[async_trait]
impl Command for RemoveCommand {
	fn args_param(&self) -> &'static [Param] {
		&AMOUNT_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let (user_id, amount, channel_id) = match amount_args(&args, command.channel_id) {
			Ok(v) => v,
			Err(message) => return reply(&ctx, &command, error_embed(message), true).await,
		};

		let roles = MemberRoles::new(ctx.http.clone());
		let res = leveling.revoke_exp(user_id, guild_id, channel_id, amount, &roles).await;
		if res.is_ok() {
			info!("{} removed {} exp from {} in guild {}", command.user.id, amount, user_id, guild_id);
		}

		reply(&ctx, &command, result_embed("経験値を減らしました", user_id, res), false).await
	}
}

struct SetCommand;

impl BaseCommand for SetCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"set".into()
	}

	fn get_description(&self) -> String {
		"チャンネルの経験値を指定した値にします".into()
	}
}

#[async_trait]
impl Command for SetCommand {
	fn args_param(&self) -> &'static [Param] {
		&AMOUNT_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let (user_id, amount, channel_id) = match amount_args(&args, command.channel_id) {
			Ok(v) => v,
			Err(message) => return reply(&ctx, &command, error_embed(message), true).await,
		};

		let roles = MemberRoles::new(ctx.http.clone());
		let res = leveling.set_exp(user_id, guild_id, channel_id, amount, &roles).await;
		if res.is_ok() {
			info!("{} set exp of {} in {} to {}", command.user.id, user_id, channel_id, amount);
		}

		reply(&ctx, &command, result_embed("経験値を設定しました", user_id, res), false).await
	}
}

struct ResetUserCommand;

const RESET_USER_PARAMS: [Param; 1] = [(PARAM_USER, "対象のメンバー", CommandOptionType::User, true)];

impl BaseCommand for ResetUserCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"reset_user".into()
	}

	fn get_description(&self) -> String {
		"メンバーの経験値をリセットします".into()
	}
}

#[async_trait]
impl Command for ResetUserCommand {
	fn args_param(&self) -> &'static [Param] {
		&RESET_USER_PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let Some(user_id) = arg_user(&args, PARAM_USER) else {
			return reply(&ctx, &command, error_embed("メンバーを指定してください"), true).await;
		};

		let roles = MemberRoles::new(ctx.http.clone());
		let res = leveling.reset_user(user_id, guild_id, &roles).await;
		if res.is_ok() {
			info!("{} reset exp of {} in guild {}", command.user.id, user_id, guild_id);
		}

		reply(&ctx, &command, result_embed("経験値をリセットしました", user_id, res), false).await
	}
}

struct ResetGuildCommand;

impl BaseCommand for ResetGuildCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"reset_guild".into()
	}

	fn get_description(&self) -> String {
		"サーバー全体の経験値をリセットします".into()
	}
}

#[async_trait]
impl Command for ResetGuildCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};

		let Some(button_interaction) = confirm(
			&ctx,
			&command,
			CreateEmbed::new()
				.title("確認")
				.description("このサーバーの全メンバーの経験値を削除します。元に戻せません。"),
		)
		.await?
		else {
			return Ok(());
		};

		let embed = match leveling.reset_guild(guild_id).await {
			Ok(_) => {
				info!("{} reset all exp in guild {}", command.user.id, guild_id);
				CreateEmbed::new()
					.title("完了")
					.description("サーバー全体の経験値をリセットしました")
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

#[cfg(test)]
mod tests {
	use super::*;
	use crate::leveling::LevelUpEvent;

	#[test]
	fn describes_level_changes() {
		let user_id = UserId::new(7);

		assert_eq!(transition_text(user_id, LevelTransition::Unchanged { level: 2 }), "<@7> Level: `2`");
		assert_eq!(
			transition_text(user_id, LevelTransition::Up(LevelUpEvent { old_level: 2, new_level: 4 })),
			"<@7> Level: `2` -> `4`"
		);
		assert_eq!(
			transition_text(user_id, LevelTransition::Down { old_level: 4, new_level: 0 }),
			"<@7> Level: `4` -> `0`"
		);
	}
}
