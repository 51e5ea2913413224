use log::{debug, error};
use serenity::all::{Mentionable, MessageType};
use serenity::client::Context;
use serenity::model::channel::Message;

use crate::leveling::LevelUpEvent;
use crate::utils::client;
use crate::utils::roles::MemberRoles;

/// Only messages people actually typed earn experience.
fn is_qualifying(message: &Message) -> bool {
	!message.author.bot
		&& message.guild_id.is_some()
		&& matches!(message.kind, MessageType::Regular | MessageType::InlineReply)
}

pub async fn execute(ctx: Context, message: Message) {
	if !is_qualifying(&message) {
		return;
	}
	let Some(guild_id) = message.guild_id else {
		return;
	};

	let Some(leveling) = client::leveling().await else {
		error!("Leveling is not initialized.");
		return;
	};

	let roles = MemberRoles::new(ctx.http.clone());
	match leveling
		.award_message(message.author.id, guild_id, message.channel_id, &roles)
		.await
	{
		Ok(Some(event)) => announce(&ctx, &message, event).await,
		Ok(None) => {},
		Err(error) => {
			error!("DB Error: {:?}", error);
		},
	}
}

async fn announce(ctx: &Context, message: &Message, event: LevelUpEvent) {
	debug!("announce level up: {} {:?}", message.author.id, event);

	if let Err(error) = message
		.channel_id
		.say(
			&ctx.http,
			format!(
				"{} LEVEL UP! `{}` -> `{}`",
				message.author.mention(),
				event.old_level,
				event.new_level
			),
		)
		.await
	{
		error!("Error: {:?}", error);
	}
}
