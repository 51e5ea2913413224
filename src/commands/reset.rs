use log::{error, info};
use serenity::all::{CommandDataOption, CommandInteraction, CreateEmbed};
use serenity::async_trait;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::{confirm, finish_confirm, guild_leveling, leveling_error_embed};
use crate::utils::color;
use crate::utils::roles::MemberRoles;

pub struct ResetCommand;

impl BaseCommand for ResetCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"reset".into()
	}

	fn get_description(&self) -> String {
		"自分の経験値をリセットします".into()
	}
}

#[async_trait]
impl Command for ResetCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let Some((guild_id, leveling)) = guild_leveling(&ctx, &command).await? else {
			return Ok(());
		};

		let Some(button_interaction) = confirm(
			&ctx,
			&command,
			CreateEmbed::new()
				.title("確認")
				.description("このサーバーでのあなたの経験値をすべて削除します。元に戻せません。"),
		)
		.await?
		else {
			return Ok(());
		};

		let roles = MemberRoles::new(ctx.http.clone());
		let embed = match leveling.reset_user(command.user.id, guild_id, &roles).await {
			Ok(_) => {
				info!("user {} reset own exp in guild {}", command.user.id, guild_id);
				CreateEmbed::new()
					.title("完了")
					.description("経験値をリセットしました")
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
