use log::error;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateEmbed, Mentionable};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, Param};
use crate::commands::{guild_leveling, leveling_error_embed, reply};
use crate::utils::color;
use crate::utils::convert::{arg_channel, arg_user, format_progress, format_rank};

const PARAM_USER: &str = "user";
const PARAM_CHANNEL: &str = "channel";

const PARAMS: [Param; 2] = [
	(PARAM_USER, "表示するメンバー", CommandOptionType::User, false),
	(PARAM_CHANNEL, "チャンネル別の経験値で表示します", CommandOptionType::Channel, false),
];

pub struct RankCommand;

impl BaseCommand for RankCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"rank".into()
	}

	fn get_description(&self) -> String {
		"現在のレベルを表示します".into()
	}
}

#[async_trait]
impl Command for RankCommand {
	fn args_param(&self) -> &'static [Param] {
		&PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let user_id = arg_user(&args, PARAM_USER).unwrap_or(command.user.id);
		let channel_id = arg_channel(&args, PARAM_CHANNEL);

		let card = match leveling.rank_card(user_id, guild_id, channel_id).await {
			Ok(v) => v,
			Err(error) => {
				error!("DB Error: {:?}", error);
				return reply(&ctx, &command, leveling_error_embed(&error), true).await;
			},
		};

		let mut embed = CreateEmbed::new().title("ランク").color(color::level_color());
		embed = match channel_id {
			Some(channel_id) => embed.description(format!("{} ({})", user_id.mention(), channel_id.mention())),
			None => embed.description(user_id.mention().to_string()),
		};
		embed = if card.rank.is_none() {
			embed.field("No Data", "まだ経験値がありません", false)
		} else {
			embed
				.field("順位", format!("`{}`", format_rank(card.rank)), true)
				.field("Level", format!("`{}`", card.level), true)
				.field("累計Exp", format!("`{}`", card.exp), true)
				.field("Exp", format_progress(&card), false)
		};

		reply(&ctx, &command, embed, false).await
	}
}
