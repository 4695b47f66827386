//! Error types for provider registration, resolution and configuration.

use std::path::PathBuf;

use hyperclick_primitives::Point;
use thiserror::Error;

use crate::trigger::Platform;

/// Error type providers report from their resolution calls.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the hyperclick core.
#[derive(Debug, Error)]
pub enum HyperclickError {
	/// A provider was built without a position or word capability.
	#[error("provider `{provider}` must resolve either by position or by word")]
	MissingCapability {
		/// Provider name.
		provider: String,
	},

	/// A provider was built with both capabilities.
	#[error("provider `{provider}` cannot resolve both by position and by word")]
	ConflictingCapabilities {
		/// Provider name.
		provider: String,
	},

	/// A provider failed while resolving a suggestion.
	#[error("provider `{provider}` failed: {source}")]
	Provider {
		/// Provider name.
		provider: String,
		/// The underlying provider error.
		#[source]
		source: ProviderError,
	},

	/// A suggestion was built without any range.
	#[error("suggestion has no range")]
	EmptyRange,

	/// A suggestion was built with an empty candidate list.
	#[error("suggestion candidate list is empty")]
	EmptyCandidates,

	/// The suggestion list was asked to show a single-action suggestion.
	#[error("suggestion list requires a suggestion with candidates")]
	NotACandidateList,

	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A trigger key name is not one of `shiftKey`, `ctrlKey`, `altKey`, `metaKey`.
	#[error("unknown trigger key: {0}")]
	UnknownTriggerKey(String),

	/// A trigger setting named no keys at all.
	#[error("trigger key setting is empty")]
	EmptyTriggerKeys,

	/// The trigger combination is not one of the platform's options.
	#[error("trigger keys `{keys}` are not offered on {platform}")]
	UnsupportedTriggerKeys {
		/// Platform whose setting was rejected.
		platform: Platform,
		/// The rejected combination.
		keys: String,
	},
}

/// Errors reported by the host editor view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	/// The view produced a screen position that does not map into the buffer.
	#[error("invalid screen position {0}")]
	InvalidScreenPosition(Point),
}

/// Result type for hyperclick operations.
pub type Result<T> = std::result::Result<T, HyperclickError>;
