use log::error;
use serenity::all::{CommandDataOption, CommandInteraction, CreateInteractionResponse};
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateInteractionResponseMessage, EditInteractionResponse};
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::utils::color;

pub struct PingCommand;

impl BaseCommand for PingCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"ping".into()
	}

	fn get_description(&self) -> String {
		"Botのpingを測ります".into()
	}
}

impl PingCommand {
	async fn defer_res(&self, ctx: &Context, command: &CommandInteraction) -> serenity::Result<()> {
		command
			.create_response(&ctx.http, CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()))
			.await
	}

	async fn get_ping(&self, ctx: &Context, command: &CommandInteraction) -> Option<i64> {
		match command.get_response(&ctx.http).await {
			Ok(command_res) => {
				let ping_duration = command_res.timestamp.timestamp_millis() - command.id.created_at().timestamp_millis();
				Some(ping_duration)
			},
			Err(error) => {
				error!("{}", error);
				None
			},
		}
	}

	async fn send_result(&self, ctx: &Context, command: &CommandInteraction, ping: Option<i64>) -> serenity::Result<()> {
		let description = match ping {
			Some(ping) => format!("{}ms", ping),
			None => "計測できませんでした".into(),
		};
		command
			.edit_response(
				&ctx.http,
				EditInteractionResponse::new().add_embed(
					CreateEmbed::new()
						.title("Ping結果")
						.description(description)
						.color(color::normal_color()),
				),
			)
			.await?;

		Ok(())
	}
}

#[async_trait]
impl Command for PingCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		let ctx = &ctx;
		let command = &command;
		self.defer_res(ctx, command).await?;

		let ping = self.get_ping(ctx, command).await;
		self.send_result(ctx, command, ping).await
	}
}
