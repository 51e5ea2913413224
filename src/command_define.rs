use log::{error, warn};
use serenity::{
	all::{
		CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType, Context, CreateCommandOption,
		CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
	},
	async_trait,
};

use crate::utils::color;

pub trait BuildCommandOption {
	fn build_command_option(&self) -> CreateCommandOption;
}

impl BuildCommandOption for CommonCommandType {
	fn build_command_option(&self) -> CreateCommandOption {
		match self {
			CommonCommandType::Command(command) => command.command_build(),
			CommonCommandType::SubCommand(sub_command) => sub_command.command_build(),
		}
	}
}

pub trait BaseCommand {
	fn new() -> Self
	where
		Self: Sized;

	fn get_name(&self) -> String;
	fn get_description(&self) -> String;

	/// Guild administrators (or members with Manage Server) only.
	fn requires_admin(&self) -> bool {
		false
	}

	fn to_box(self) -> Box<Self>
	where
		Self: Sized, {
		Box::new(self)
	}
}

/*
Paramsは値名→説明→型定義→必須で構成されています
*/
pub type Param = (&'static str, &'static str, CommandOptionType, bool);

const PARAMS: [Param; 0] = [];

#[async_trait]
pub trait Command: BaseCommand {
	fn args_param(&self) -> &'static [Param] {
		&PARAMS
	}

	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		let mut option = option;

		for (name, desc, option_type, req) in self.args_param() {
			option = option.add_sub_option(CreateCommandOption::new(*option_type, *name, *desc).required(*req));
		}

		option
	}

	async fn execute(
		&self,
		ctx: Context,
		command: CommandInteraction,
		args: Vec<CommandDataOption>,
	) -> serenity::Result<()>;

	fn command_build(&self) -> CreateCommandOption {
		let res = CreateCommandOption::new(CommandOptionType::SubCommand, self.get_name(), self.get_description());

		self.build_args(res)
	}
}

#[async_trait]
pub trait SubCommand: BaseCommand {
	fn get_sub_commands(&self) -> &Vec<CommonCommandType>;
	fn make_sub_commands_option(&self) -> Vec<CreateCommandOption> {
		let mut res = vec![];

		for cmd in self.get_sub_commands() {
			res.push(cmd.build_command_option());
		}

		res
	}

	async fn commands_route(
		&self,
		ctx: Context,
		command: CommandInteraction,
		sub_command: CommandDataOption,
	) -> serenity::Result<()> {
		if self.requires_admin() && !has_admin_permission(&command) {
			warn!("{} tried admin command {}", command.user.id, self.get_name());
			return reply_forbidden(&ctx, &command).await;
		}

		let CommandDataOptionValue::SubCommand(sub_command_option) = sub_command.value else {
			error!("Unknown Sub command.");
			return Ok(()); // とりあえずOkにしておく
		};

		let command_name = sub_command.name.to_string();
		for cmd in self.get_sub_commands() {
			if let CommonCommandType::Command(cmd) = cmd {
				if command_name == cmd.get_name() {
					return cmd.execute(ctx, command, sub_command_option).await;
				}
			}
		}

		error!("No Exist Command!");
		Ok(())
	}

	fn command_build(&self) -> CreateCommandOption {
		let mut co = CreateCommandOption::new(
			CommandOptionType::SubCommandGroup,
			self.get_name(),
			self.get_description(),
		);

		for sub_command in self.make_sub_commands_option() {
			co = co.add_sub_option(sub_command);
		}

		co
	}
}

pub enum CommonCommandType {
	Command(Box<dyn Command + Sync + Send>),
	SubCommand(Box<dyn SubCommand + Sync + Send>),
}

impl From<Box<dyn SubCommand + Sync + Send>> for CommonCommandType {
	fn from(value: Box<dyn SubCommand + Sync + Send>) -> Self {
		CommonCommandType::SubCommand(value)
	}
}

impl From<Box<dyn Command + Sync + Send>> for CommonCommandType {
	fn from(value: Box<dyn Command + Sync + Send>) -> Self {
		CommonCommandType::Command(value)
	}
}

pub fn has_admin_permission(command: &CommandInteraction) -> bool {
	command
		.member
		.as_ref()
		.and_then(|v| v.permissions)
		.map_or(false, |v| v.administrator() || v.manage_guild())
}

async fn reply_forbidden(ctx: &Context, command: &CommandInteraction) -> serenity::Result<()> {
	command
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Message(
				CreateInteractionResponseMessage::new()
					.add_embed(
						CreateEmbed::new()
							.title("エラー")
							.description("このコマンドは管理者のみ実行できます")
							.color(color::failed_color()),
					)
					.ephemeral(true),
			),
		)
		.await
}
