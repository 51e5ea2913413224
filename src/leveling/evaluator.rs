use super::curve::level_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpEvent {
	pub old_level: u32,
	pub new_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTransition {
	Unchanged { level: u32 },
	Up(LevelUpEvent),
	Down { old_level: u32, new_level: u32 },
}

impl LevelTransition {
	#[cfg(test)]
	pub fn new_level(&self) -> u32 {
		match self {
			LevelTransition::Unchanged { level } => *level,
			LevelTransition::Up(event) => event.new_level,
			LevelTransition::Down { new_level, .. } => *new_level,
		}
	}
}

/// Classifies the move from `before_exp` to `after_exp` on the curve.
pub fn transition(before_exp: u64, after_exp: u64) -> LevelTransition {
	let (old_level, _) = level_of(before_exp);
	let (new_level, _) = level_of(after_exp);

	if new_level > old_level {
		LevelTransition::Up(LevelUpEvent { old_level, new_level })
	} else if new_level < old_level {
		LevelTransition::Down { old_level, new_level }
	} else {
		LevelTransition::Unchanged { level: new_level }
	}
}

/// Returns an event only when a level boundary was crossed upwards.
/// Decreases never produce one.
pub fn evaluate(before_exp: u64, after_exp: u64) -> Option<LevelUpEvent> {
	match transition(before_exp, after_exp) {
		LevelTransition::Up(event) => Some(event),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::leveling::curve::total_exp_for_level;

	#[test]
	fn no_event_inside_a_band() {
		assert_eq!(evaluate(0, 15), None);
		assert_eq!(evaluate(80, 99), None);
		assert_eq!(evaluate(42, 42), None);
	}

	#[test]
	fn event_on_exact_boundary() {
		assert_eq!(evaluate(85, 100), Some(LevelUpEvent { old_level: 0, new_level: 1 }));
	}

	#[test]
	fn large_gain_can_skip_levels() {
		let event = evaluate(0, total_exp_for_level(5) + 3).unwrap();
		assert_eq!(event, LevelUpEvent { old_level: 0, new_level: 5 });
	}

	#[test]
	fn decrease_is_silent_level_drop() {
		let before = total_exp_for_level(3) + 10;
		let after = total_exp_for_level(1);
		assert_eq!(evaluate(before, after), None);
		assert_eq!(transition(before, after), LevelTransition::Down { old_level: 3, new_level: 1 });
		assert_eq!(transition(before, after).new_level(), 1);
	}

	#[test]
	fn unchanged_reports_current_level() {
		let before = total_exp_for_level(2);
		assert_eq!(transition(before, before + 1), LevelTransition::Unchanged { level: 2 });
	}
}
