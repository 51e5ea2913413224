use log::{error, info};
use serenity::all::{ActivityData, Command as ApplicationCommand};
use serenity::client::Context;
use serenity::model::gateway::Ready;

use crate::commands;
use crate::utils::convert::format_discord_username;

pub async fn execute(ctx: Context, data_about_bot: Ready) {
	ctx.dnd();
	ctx.set_activity(Some(ActivityData::playing("Starting...")));

	info!(
		"Logged in as {} ({} guilds)",
		format_discord_username(&data_about_bot.user),
		data_about_bot.guilds.len()
	);

	match ApplicationCommand::create_global_command(&ctx.http, commands::app_commands_build()).await {
		Ok(command) => info!("Registered command: /{}", command.name),
		Err(error) => error!("Failed to register commands: {:?}", error),
	}

	ctx.online();
	ctx.set_activity(Some(ActivityData::playing(format!("/{}", commands::ROOT_COMMAND_NAME))));
}
