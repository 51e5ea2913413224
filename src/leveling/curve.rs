//! Experience curve.
//!
//! Leaving level `L` costs `f(L) = 5L² + 50L + 100` experience, so the bands
//! widen as the level grows. Levels are never stored; they are always derived
//! from cumulative experience with [`level_of`].

/// Experience needed to advance from `level` to `level + 1`.
///
/// This is the width of the band, not an absolute threshold.
pub fn next_level_threshold(level: u32) -> u64 {
	let level = u64::from(level);
	level
		.saturating_mul(level)
		.saturating_mul(5)
		.saturating_add(level.saturating_mul(50))
		.saturating_add(100)
}

/// Splits cumulative experience into `(level, remainder)`, where `remainder`
/// is the experience already earned inside the current band.
///
/// Reaching a boundary exactly counts as being on the new level with a
/// remainder of zero.
pub fn level_of(total_exp: u64) -> (u32, u64) {
	let total = u128::from(total_exp);

	// cumulative(n) is a little above 5n³/3, so the cube root overshoots by a
	// few levels at most
	let mut level = (total as f64 * 0.6).cbrt() as u128;
	while level > 0 && cumulative(level) > total {
		level -= 1;
	}
	while cumulative(level + 1) <= total {
		level += 1;
	}

	let remainder = total - cumulative(level);
	(
		u32::try_from(level).unwrap_or(u32::MAX),
		u64::try_from(remainder).unwrap_or(u64::MAX),
	)
}

/// Cumulative experience at which `level` starts, i.e. `f(0) + … + f(level - 1)`.
pub fn total_exp_for_level(level: u32) -> u64 {
	u64::try_from(cumulative(u128::from(level))).unwrap_or(u64::MAX)
}

fn cumulative(n: u128) -> u128 {
	// 5·Σk² + 50·Σk + 100·n over k in 0..n
	if n == 0 {
		return 0;
	}
	let squares = (n - 1) * n * (2 * n - 1) / 6;
	let linear = n * (n - 1) / 2;

	5 * squares + 50 * linear + 100 * n
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn threshold_matches_formula() {
		assert_eq!(next_level_threshold(0), 100);
		assert_eq!(next_level_threshold(1), 155);
		assert_eq!(next_level_threshold(2), 220);
		assert_eq!(next_level_threshold(10), 1100);
	}

	#[test]
	fn zero_exp_is_level_zero() {
		assert_eq!(level_of(0), (0, 0));
	}

	#[test]
	fn below_first_boundary_stays_at_zero() {
		assert_eq!(level_of(15), (0, 15));
		assert_eq!(level_of(99), (0, 99));
	}

	#[test]
	fn boundaries_are_inclusive() {
		for level in 0..60 {
			let boundary = total_exp_for_level(level);
			assert_eq!(level_of(boundary), (level, 0), "boundary of level {}", level);
			if boundary > 0 {
				let (below, remainder) = level_of(boundary - 1);
				assert_eq!(below, level - 1);
				assert_eq!(remainder, next_level_threshold(level - 1) - 1);
			}
		}
	}

	#[test]
	fn cumulative_threshold_is_sum_of_bands() {
		let mut sum = 0u64;
		for level in 0..200 {
			assert_eq!(total_exp_for_level(level), sum);
			sum += next_level_threshold(level);
		}
	}

	#[test]
	fn level_never_decreases_with_more_exp() {
		let mut previous = 0;
		for exp in (0..250_000u64).step_by(7) {
			let (level, remainder) = level_of(exp);
			assert!(level >= previous, "level dropped at {}", exp);
			assert!(remainder < next_level_threshold(level));
			assert_eq!(total_exp_for_level(level) + remainder, exp);
			previous = level;
		}
	}

	#[test]
	fn huge_values_do_not_overflow() {
		let (level, remainder) = level_of(u64::MAX);
		assert!(level > 0);
		assert!(remainder < next_level_threshold(level));
		assert_eq!(next_level_threshold(u32::MAX), u64::MAX);
		assert_eq!(total_exp_for_level(u32::MAX), u64::MAX);
	}

	fn walk(total_exp: u64) -> (u32, u64) {
		let mut level = 0;
		let mut remaining = total_exp;
		while remaining >= next_level_threshold(level) {
			remaining -= next_level_threshold(level);
			level += 1;
		}
		(level, remaining)
	}

	#[test]
	fn matches_band_by_band_walk() {
		for exp in (0..2_000_000u64).step_by(997) {
			assert_eq!(level_of(exp), walk(exp), "exp {}", exp);
		}
		for level in [500, 1_000, 5_000, 20_000] {
			let boundary = total_exp_for_level(level);
			assert_eq!(level_of(boundary), (level, 0));
			assert_eq!(level_of(boundary - 1), (level - 1, next_level_threshold(level - 1) - 1));
		}
	}

	#[test]
	fn largest_admin_value_resolves() {
		let exp = i64::MAX as u64;
		let (level, remainder) = level_of(exp);

		assert_eq!(total_exp_for_level(level) + remainder, exp);
		assert!(remainder < next_level_threshold(level));
	}
}
