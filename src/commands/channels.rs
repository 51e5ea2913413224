use log::error;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateEmbed, Mentionable};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, Param};
use crate::commands::{guild_leveling, leveling_error_embed, reply};
use crate::leveling::ProgressionStore;
use crate::utils::color;
use crate::utils::convert::arg_user;

const PARAM_USER: &str = "user";

const PARAMS: [Param; 1] = [(PARAM_USER, "表示するメンバー", CommandOptionType::User, false)];

// embed descriptions are capped at 4096 characters
const MAX_LINES: usize = 25;

pub struct ChannelsCommand;

impl BaseCommand for ChannelsCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"channels".into()
	}

	fn get_description(&self) -> String {
		"チャンネルごとの経験値を表示します".into()
	}
}

#[async_trait]
impl Command for ChannelsCommand {
	fn args_param(&self) -> &'static [Param] {
		&PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let user_id = arg_user(&args, PARAM_USER).unwrap_or(command.user.id);

		let entries = match leveling.store().channel_ranking(guild_id, Some(user_id)).await {
			Ok(v) => v,
			Err(error) => {
				error!("DB Error: {:?}", error);
				return reply(&ctx, &command, leveling_error_embed(&error), true).await;
			},
		};

		let description = if entries.is_empty() {
			"No Data".to_string()
		} else {
			entries
				.iter()
				.take(MAX_LINES)
				.map(|v| format!("`{}位` {} Exp: `{}`", v.rank, v.key.mention(), v.exp))
				.collect::<Vec<String>>()
				.join("\n")
		};

		reply(
			&ctx,
			&command,
			CreateEmbed::new()
				.title("チャンネル別経験値")
				.field("メンバー", user_id.mention().to_string(), false)
				.description(description)
				.color(color::level_color()),
			false,
		)
		.await
	}
}
