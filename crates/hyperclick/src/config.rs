//! Hyperclick configuration.
//!
//! Only the trigger combination is configurable, once per platform family.
//! A [`ConfigHandle`] holds the live value and broadcasts replacements to
//! every subscribed binding.
//!
//! ```toml
//! darwin_trigger_keys = "metaKey"
//! linux_trigger_keys = "altKey,metaKey"
//! win32_trigger_keys = "ctrlKey"
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokio::sync::watch;

use crate::error::ConfigError;
use crate::trigger::{Platform, TriggerKeys};

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// User settings read by the trigger gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HyperclickConfig {
	/// Trigger combination on macOS.
	#[serde(with = "trigger_keys_serde")]
	pub darwin_trigger_keys: TriggerKeys,
	/// Trigger combination on Linux.
	#[serde(with = "trigger_keys_serde")]
	pub linux_trigger_keys: TriggerKeys,
	/// Trigger combination on Windows.
	#[serde(with = "trigger_keys_serde")]
	pub win32_trigger_keys: TriggerKeys,
}

impl Default for HyperclickConfig {
	fn default() -> Self {
		Self {
			darwin_trigger_keys: TriggerKeys::META,
			linux_trigger_keys: TriggerKeys::CTRL,
			win32_trigger_keys: TriggerKeys::CTRL,
		}
	}
}

impl HyperclickConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and validates a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// The trigger combination for `platform`.
	pub fn trigger_keys(&self, platform: Platform) -> TriggerKeys {
		match platform {
			Platform::Darwin => self.darwin_trigger_keys,
			Platform::Linux => self.linux_trigger_keys,
			Platform::Win32 => self.win32_trigger_keys,
		}
	}

	/// Checks that every platform's combination is one it offers.
	pub fn validate(&self) -> Result<()> {
		for platform in [Platform::Darwin, Platform::Linux, Platform::Win32] {
			let keys = self.trigger_keys(platform);
			if platform.trigger_option(keys).is_none() {
				return Err(ConfigError::UnsupportedTriggerKeys {
					platform,
					keys: keys.to_string(),
				});
			}
		}
		Ok(())
	}
}

mod trigger_keys_serde {
	use super::*;

	pub(super) fn serialize<S: Serializer>(keys: &TriggerKeys, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(keys)
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<TriggerKeys, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}

/// Live, shareable configuration.
///
/// Cloning shares the same value; [`set`](Self::set) replaces it wholesale
/// and notifies every receiver from [`subscribe`](Self::subscribe).
#[derive(Debug, Clone)]
pub struct ConfigHandle {
	tx: Arc<watch::Sender<HyperclickConfig>>,
}

impl Default for ConfigHandle {
	fn default() -> Self {
		Self::new(HyperclickConfig::default())
	}
}

impl ConfigHandle {
	/// Creates a handle holding `config`.
	pub fn new(config: HyperclickConfig) -> Self {
		let (tx, _rx) = watch::channel(config);
		Self { tx: Arc::new(tx) }
	}

	/// A copy of the current configuration.
	pub fn get(&self) -> HyperclickConfig {
		self.tx.borrow().clone()
	}

	/// Replaces the configuration and broadcasts it.
	pub fn set(&self, config: HyperclickConfig) {
		tracing::debug!(?config, "hyperclick.config.set");
		self.tx.send_replace(config);
	}

	/// Parses `source` and, if valid, replaces the configuration with it.
	pub fn reload_from_str(&self, source: &str) -> Result<()> {
		self.set(HyperclickConfig::from_toml_str(source)?);
		Ok(())
	}

	/// A receiver observing every future replacement.
	pub fn subscribe(&self) -> watch::Receiver<HyperclickConfig> {
		self.tx.subscribe()
	}
}
