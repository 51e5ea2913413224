use crate::command_define::{BaseCommand, Command};
use crate::utils::color;
use serenity::all::{
	CommandDataOption, CommandInteraction, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::async_trait;
use serenity::client::Context;

const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct VersionCommand;

impl BaseCommand for VersionCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"version".into()
	}

	fn get_description(&self) -> String {
		"Botのバージョンを表示します".into()
	}
}

fn project_name() -> String {
	let mut chars = PROJECT_NAME.chars();
	match chars.next() {
		Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
		None => String::new(),
	}
}

#[async_trait]
impl Command for VersionCommand {
	async fn execute(&self, ctx: Context, command: CommandInteraction, _: Vec<CommandDataOption>) -> serenity::Result<()> {
		command
			.create_response(
				&ctx.http,
				CreateInteractionResponse::Message(
					CreateInteractionResponseMessage::new().add_embed(
						CreateEmbed::new()
							.title("バージョン情報")
							.description(format!("{} {}", project_name(), VERSION))
							.color(color::normal_color()),
					),
				),
			)
			.await
	}
}
