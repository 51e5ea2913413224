use serenity::all::{ChannelId, CommandDataOption, CommandDataOptionValue, RoleId, User, UserId};

use crate::leveling::RankCard;

const BAR_WIDTH: usize = 12;

pub fn format_discord_username(user: &User) -> String {
	format!(
		"{}{}",
		user.name,
		match user.discriminator {
			None => String::new(),
			Some(n) => format!("#{:04}", n),
		}
	)
}

pub fn format_rank(rank: Option<u32>) -> String {
	match rank {
		Some(rank) => format!("{}位", rank),
		None => "圏外".into(),
	}
}

/// `remainder/next` with a text gauge, e.g. `▰▰▰▱▱▱▱▱▱▱▱▱ 20/155`.
pub fn format_progress(card: &RankCard) -> String {
	let filled = if card.next == 0 {
		BAR_WIDTH
	} else {
		((u128::from(card.remainder) * BAR_WIDTH as u128) / u128::from(card.next)) as usize
	};
	let filled = filled.min(BAR_WIDTH);

	format!(
		"{}{} {}/{}",
		"▰".repeat(filled),
		"▱".repeat(BAR_WIDTH - filled),
		card.remainder,
		card.next
	)
}

fn find_arg<'a>(args: &'a [CommandDataOption], name: &str) -> Option<&'a CommandDataOptionValue> {
	args.iter().find(|v| v.name == name).map(|v| &v.value)
}

pub fn arg_i64(args: &[CommandDataOption], name: &str) -> Option<i64> {
	find_arg(args, name).and_then(|v| v.as_i64())
}

pub fn arg_bool(args: &[CommandDataOption], name: &str) -> Option<bool> {
	find_arg(args, name).and_then(|v| v.as_bool())
}

pub fn arg_user(args: &[CommandDataOption], name: &str) -> Option<UserId> {
	find_arg(args, name).and_then(|v| v.as_user_id())
}

pub fn arg_role(args: &[CommandDataOption], name: &str) -> Option<RoleId> {
	find_arg(args, name).and_then(|v| v.as_role_id())
}

pub fn arg_channel(args: &[CommandDataOption], name: &str) -> Option<ChannelId> {
	find_arg(args, name).and_then(|v| v.as_channel_id())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn card(remainder: u64, next: u64) -> RankCard {
		RankCard {
			exp: 0,
			level: 0,
			remainder,
			next,
			rank: None,
		}
	}

	#[test]
	fn rank_text() {
		assert_eq!(format_rank(Some(3)), "3位");
		assert_eq!(format_rank(None), "圏外");
	}

	#[test]
	fn progress_gauge() {
		assert_eq!(format_progress(&card(0, 100)), "▱▱▱▱▱▱▱▱▱▱▱▱ 0/100");
		assert_eq!(format_progress(&card(50, 100)), "▰▰▰▰▰▰▱▱▱▱▱▱ 50/100");
		assert_eq!(format_progress(&card(99, 100)), "▰▰▰▰▰▰▰▰▰▰▰▱ 99/100");
	}
}
