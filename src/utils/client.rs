use std::sync::Arc;

use crate::leveling::Leveling;
use crate::tables::DatabaseStore;
use crate::STATIC_COMPONENTS;

pub type SharedLeveling = Arc<Leveling<DatabaseStore>>;

pub struct Components {
	leveling: Option<SharedLeveling>,
}

impl Components {
	pub fn new() -> Components {
		Components { leveling: None }
	}

	pub fn sets(&mut self, leveling: SharedLeveling) {
		self.leveling = Some(leveling);
	}

	pub fn get_leveling(&self) -> Option<SharedLeveling> {
		self.leveling.clone()
	}
}

/// Clones the leveling handle out of the global components so the lock is
/// not held across a whole event.
pub async fn leveling() -> Option<SharedLeveling> {
	let lsc = STATIC_COMPONENTS.lock().await;
	let leveling = lsc.get_leveling();
	std::mem::drop(lsc);

	leveling
}
