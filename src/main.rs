mod command_define;
mod commands;
mod configs;
mod events;
mod leveling;
mod tables;
mod utils;

use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use migration::{Migrator, MigratorTrait};
use once_cell::sync::Lazy;
use sea_orm::Database;
use serenity::all::GatewayIntents;
use serenity::Client;
use tokio::sync::Mutex;

use crate::configs::ConfigData;
use crate::events::route::Router;
use crate::leveling::Leveling;
use crate::tables::DatabaseStore;
use crate::utils::client::Components;

pub static STATIC_COMPONENTS: Lazy<Mutex<Components>> = Lazy::new(|| Mutex::new(Components::new()));

fn setup_logger(config: &ConfigData) -> Result<(), fern::InitError> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"[{} {} {}] {}",
				chrono::Local::now().format("%Y/%m/%d %H:%M:%S"),
				record.level(),
				record.target(),
				message
			))
		})
		.level(log::LevelFilter::Warn)
		.level_for(env!("CARGO_PKG_NAME"), config.get_log_level())
		.chain(std::io::stdout())
		.chain(fern::log_file(config.get_log_file())?)
		.apply()?;

	Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let mut is_debug = false;
	for arg in std::env::args() {
		match arg.as_str() {
			"--debug" => {
				is_debug = true;
			},
			_ => {},
		}
	}

	let config_path = if is_debug { "../../configs/config.yaml" } else { "./config.yaml" };

	// the logger is configured from this file, so failures go to stderr
	let config = match ConfigData::load(Path::new(config_path)) {
		Ok(v) => v,
		Err(error) => {
			eprintln!("[{} ERROR] {}", chrono::Local::now().format("%Y/%m/%d %H:%M:%S"), error);
			return Err(error.into());
		},
	};

	if let Err(error) = setup_logger(&config) {
		eprintln!("[{} ERROR] Failed to set up logger: {}", chrono::Local::now().format("%Y/%m/%d %H:%M:%S"), error);
		return Err(error.into());
	}
	info!("Starting...");

	let db = match Database::connect(config.get_db_url()).await {
		Ok(v) => v,
		Err(error) => {
			error!("DB Error: {:?}", error);
			return Err(error.into());
		},
	};
	if let Err(error) = Migrator::up(&db, None).await {
		error!("Migration Error: {:?}", error);
		return Err(error.into());
	}
	info!("Database is ready");

	let leveling = Arc::new(Leveling::new(DatabaseStore::new(db)));

	let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
	let mut client = match Client::builder(config.get_token(), intents).event_handler(Router).await {
		Ok(v) => v,
		Err(error) => {
			error!("Client Error: {:?}", error);
			return Err(error.into());
		},
	};

	let mut lsc = STATIC_COMPONENTS.lock().await;
	lsc.sets(leveling);
	std::mem::drop(lsc);

	let shard_manager = client.shard_manager.clone();
	tokio::spawn(async move {
		if let Err(error) = tokio::signal::ctrl_c().await {
			error!("Failed to listen for ctrl-c: {}", error);
			return;
		}
		info!("Exiting...");
		shard_manager.shutdown_all().await;
	});

	if let Err(error) = client.start().await {
		error!("Stop Error: {}", error);
	}

	Ok(())
}
