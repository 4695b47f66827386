//! Trigger key combinations and the gate deciding which events are active.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use hyperclick_primitives::{Modifiers, MouseButton, PointerEvent};
use tokio::sync::watch;

use crate::config::HyperclickConfig;
use crate::error::ConfigError;

/// Operating system family; each has its own trigger setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
	/// macOS.
	Darwin,
	/// Linux and other unix-likes.
	Linux,
	/// Windows.
	Win32,
}

impl Platform {
	/// The platform this binary was built for.
	pub const fn current() -> Self {
		if cfg!(target_os = "macos") {
			Self::Darwin
		} else if cfg!(target_os = "windows") {
			Self::Win32
		} else {
			Self::Linux
		}
	}

	/// Name used in configuration keys.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Darwin => "darwin",
			Self::Linux => "linux",
			Self::Win32 => "win32",
		}
	}

	/// Trigger combinations users may pick on this platform.
	pub fn trigger_options(self) -> &'static [TriggerOption] {
		match self {
			Self::Darwin => DARWIN_OPTIONS,
			Self::Linux | Self::Win32 => PC_OPTIONS,
		}
	}

	/// Looks up the option describing `keys`.
	pub fn trigger_option(self, keys: TriggerKeys) -> Option<&'static TriggerOption> {
		self.trigger_options().iter().find(|o| o.keys == keys)
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

bitflags! {
	/// Set of modifier keys forming a trigger combination.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct TriggerKeys: u8 {
		/// `shiftKey`
		const SHIFT = 1 << 0;
		/// `ctrlKey`
		const CTRL = 1 << 1;
		/// `altKey`
		const ALT = 1 << 2;
		/// `metaKey`
		const META = 1 << 3;
	}
}

const KEY_NAMES: [(TriggerKeys, &str); 4] = [
	(TriggerKeys::SHIFT, "shiftKey"),
	(TriggerKeys::CTRL, "ctrlKey"),
	(TriggerKeys::ALT, "altKey"),
	(TriggerKeys::META, "metaKey"),
];

impl TriggerKeys {
	/// Returns true when `modifiers` hold exactly these keys, no more, no less.
	pub fn matches(self, modifiers: Modifiers) -> bool {
		modifiers.shift == self.contains(Self::SHIFT)
			&& modifiers.ctrl == self.contains(Self::CTRL)
			&& modifiers.alt == self.contains(Self::ALT)
			&& modifiers.meta == self.contains(Self::META)
	}
}

impl FromStr for TriggerKeys {
	type Err = ConfigError;

	/// Parses a comma-separated list such as `altKey,metaKey`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut keys = Self::empty();
		for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
			let (key, _) = KEY_NAMES
				.iter()
				.find(|(_, n)| *n == name)
				.ok_or_else(|| ConfigError::UnknownTriggerKey(name.to_owned()))?;
			keys |= *key;
		}
		if keys.is_empty() {
			return Err(ConfigError::EmptyTriggerKeys);
		}
		Ok(keys)
	}
}

impl fmt::Display for TriggerKeys {
	/// Writes the comma-separated form, keys in alphabetical order.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<&str> = KEY_NAMES
			.iter()
			.filter(|(key, _)| self.contains(*key))
			.map(|(_, name)| *name)
			.collect();
		names.sort_unstable();
		f.write_str(&names.join(","))
	}
}

/// One selectable trigger combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOption {
	/// Keys of the combination.
	pub keys: TriggerKeys,
	/// Human readable description, e.g. `Ctrl + Click`.
	pub description: &'static str,
}

const DARWIN_OPTIONS: &[TriggerOption] = &[
	TriggerOption {
		keys: TriggerKeys::META,
		description: "Command + Click",
	},
	TriggerOption {
		keys: TriggerKeys::ALT.union(TriggerKeys::META),
		description: "Command + Option + Click",
	},
	TriggerOption {
		keys: TriggerKeys::CTRL.union(TriggerKeys::META),
		description: "Command + Control + Click",
	},
];

const PC_OPTIONS: &[TriggerOption] = &[
	TriggerOption {
		keys: TriggerKeys::CTRL,
		description: "Ctrl + Click",
	},
	TriggerOption {
		keys: TriggerKeys::ALT.union(TriggerKeys::META),
		description: "Meta + Alt + Click",
	},
	TriggerOption {
		keys: TriggerKeys::ALT.union(TriggerKeys::CTRL),
		description: "Ctrl + Alt + Click",
	},
];

/// Decides whether an input event carries the configured trigger combination.
///
/// Holds its own view of the live configuration, so a configuration change
/// reaches every gate without re-wiring.
#[derive(Debug, Clone)]
pub struct TriggerGate {
	platform: Platform,
	config: watch::Receiver<HyperclickConfig>,
}

impl TriggerGate {
	/// Creates a gate for `platform` reading `config`.
	pub fn new(platform: Platform, config: watch::Receiver<HyperclickConfig>) -> Self {
		Self { platform, config }
	}

	/// The platform whose setting this gate reads.
	pub fn platform(&self) -> Platform {
		self.platform
	}

	/// The trigger combination currently in effect.
	pub fn trigger_keys(&self) -> TriggerKeys {
		self.config.borrow().trigger_keys(self.platform)
	}

	/// Returns true if `modifiers` exactly match the trigger combination.
	pub fn is_active(&self, modifiers: Modifiers) -> bool {
		self.trigger_keys().matches(modifiers)
	}
}

/// Returns true if the host would treat `event` as its add-cursor click.
pub fn is_multicursor_event(platform: Platform, event: &PointerEvent) -> bool {
	let is_left_button = match event.button {
		MouseButton::Left => true,
		MouseButton::Middle => platform == Platform::Linux,
		MouseButton::Right => false,
	};
	if !is_left_button {
		return false;
	}
	let Modifiers { ctrl, meta, .. } = event.modifiers;
	if ctrl && platform == Platform::Darwin {
		return false;
	}
	meta || (ctrl && platform != Platform::Darwin)
}
