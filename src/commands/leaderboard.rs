use log::error;
use serenity::all::{CommandDataOption, CommandInteraction, CommandOptionType, CreateEmbed, Mentionable, UserId};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command, Param};
use crate::commands::{guild_leveling, leveling_error_embed, reply};
use crate::leveling::{level_of, ProgressionStore, RankEntry};
use crate::utils::color;
use crate::utils::convert::arg_channel;

const PARAM_CHANNEL: &str = "channel";

const PARAMS: [Param; 1] = [(PARAM_CHANNEL, "チャンネル別のランキングを表示します", CommandOptionType::Channel, false)];

const TOP: usize = 10;

pub struct LeaderboardCommand;

impl BaseCommand for LeaderboardCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"leaderboard".into()
	}

	fn get_description(&self) -> String {
		"経験値ランキングを表示します".into()
	}
}

fn format_lines(entries: &[RankEntry<UserId>]) -> String {
	entries
		.iter()
		.take(TOP)
		.map(|v| format!("`{}位` {} Level: `{}` Exp: `{}`", v.rank, v.key.mention(), level_of(v.exp).0, v.exp))
		.collect::<Vec<String>>()
		.join("\n")
}

#[async_trait]
impl Command for LeaderboardCommand {
	fn args_param(&self) -> &'static [Param] {
		&PARAMS
	}

	async fn execute(&self, ctx: Context, command: CommandInteraction, args: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};
		let channel_id = arg_channel(&args, PARAM_CHANNEL);

		let entries = match leveling.store().ranking(guild_id, channel_id).await {
			Ok(v) => v,
			Err(error) => {
				error!("DB Error: {:?}", error);
				return reply(&ctx, &command, leveling_error_embed(&error), true).await;
			},
		};

		let title = match channel_id {
			Some(channel_id) => format!("ランキング {}", channel_id.mention()),
			None => "ランキング".to_string(),
		};
		let description = if entries.is_empty() { "No Data".to_string() } else { format_lines(&entries) };

		reply(
			&ctx,
			&command,
			CreateEmbed::new().title(title).description(description).color(color::level_color()),
			false,
		)
		.await
	}
}
