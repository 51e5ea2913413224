use log::debug;
use serenity::all::Interaction;
use serenity::client::Context;

use crate::commands;

/// Button presses are consumed by the collectors of the command that sent
/// them, so only slash commands are routed here.
pub async fn execute(ctx: Context, interaction: Interaction) {
	if let Interaction::Command(command) = interaction {
		commands::interaction_route(ctx, command).await;
	} else if let Interaction::Component(mc) = interaction {
		debug!("\nmcID: {}\nmcCustomID: {}", mc.id, mc.data.custom_id);
	}
}
