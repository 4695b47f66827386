//! One-time warning when the trigger also adds cursors.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::trigger::{Platform, TriggerKeys};

/// Flag recording that the conflict warning was already shown.
pub const WARN_ABOUT_TRIGGER_CONFLICT_KEY: &str = "hyperclick.warnAboutTriggerConflict";

/// Host notification surface.
pub trait Notifier: Send + Sync {
	/// Shows an informational notice.
	fn add_info(&self, message: &str, description: &str, dismissable: bool);
}

/// Small persisted key-value store for "already shown" flags.
pub trait NoticeStore: Send + Sync {
	/// Reads `key`.
	fn get(&self, key: &str) -> Option<String>;
	/// Writes `key`.
	fn set(&self, key: &str, value: &str);
}

/// [`NoticeStore`] living for the process only.
#[derive(Debug, Default)]
pub struct MemoryNoticeStore {
	values: Mutex<FxHashMap<String, String>>,
}

impl NoticeStore for MemoryNoticeStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.lock().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.values.lock().insert(key.to_owned(), value.to_owned());
	}
}

/// Shows the trigger conflict warning at most once per store.
#[derive(Clone)]
pub struct TriggerConflictNotice {
	notifier: Arc<dyn Notifier>,
	store: Arc<dyn NoticeStore>,
}

impl TriggerConflictNotice {
	/// Creates a notice reporting through `notifier`, remembering in `store`.
	pub fn new(notifier: Arc<dyn Notifier>, store: Arc<dyn NoticeStore>) -> Self {
		Self { notifier, store }
	}

	/// Shows the warning unless it was shown before; returns true if shown.
	pub fn maybe_show(&self, platform: Platform, keys: TriggerKeys) -> bool {
		if self.store.get(WARN_ABOUT_TRIGGER_CONFLICT_KEY).as_deref() == Some("false") {
			return false;
		}
		self.store.set(WARN_ABOUT_TRIGGER_CONFLICT_KEY, "false");

		let (message, description) = conflict_text(platform, keys);
		tracing::debug!(%platform, %keys, "hyperclick.notice.trigger_conflict");
		self.notifier.add_info(&message, &description, true);
		true
	}
}

/// Message and description of the conflict warning.
pub fn conflict_text(platform: Platform, keys: TriggerKeys) -> (String, String) {
	let trigger = platform
		.trigger_option(keys)
		.map_or_else(|| keys.to_string(), |option| option.description.to_owned());
	let (command, option) = match platform {
		Platform::Darwin => ("command", "option"),
		Platform::Linux | Platform::Win32 => ("meta", "alt"),
	};
	let alternative = if keys == TriggerKeys::ALT | TriggerKeys::META {
		command.to_owned()
	} else {
		format!("{command} + {option}")
	};

	let message = format!("Hyperclick (jump to definition) is using {trigger}");
	let description = format!(
		"If you want to use {trigger} for multiple cursors instead, change the Hyperclick \"Trigger Keys\" setting.\n\n\
		 (You can still use {alternative} + click for multiple cursors.)"
	);
	(message, description)
}
