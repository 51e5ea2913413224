use log::{debug, info};
use serenity::all::Interaction;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;

use crate::events::{interaction_event, message_event, ready_event};

pub struct Router;

#[async_trait]
impl EventHandler for Router {
	async fn message(&self, ctx: Context, message: Message) {
		debug!("Message created event start");
		message_event::execute(ctx, message).await;
		debug!("Message created event end");
	}

	async fn ready(&self, ctx: Context, data_about_bot: Ready) {
		info!("Ready event start");
		ready_event::execute(ctx, data_about_bot).await;
		info!("Ready event end");
	}

	async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
		debug!("Interaction event start");
		interaction_event::execute(ctx, interaction).await;
		debug!("Interaction event end");
	}
}
