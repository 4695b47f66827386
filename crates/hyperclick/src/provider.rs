//! Suggestion providers.
//!
//! A provider resolves either at an exact position ([`PositionProvider`]) or
//! for the word under the position ([`WordProvider`]). [`Provider`] wraps
//! exactly one of the two together with its priority and the editors it
//! applies to.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use hyperclick_primitives::{Point, Range};
use regex::Regex;

use crate::error::{HyperclickError, ProviderError, Result};
use crate::host::TextEditor;
use crate::suggestion::Suggestion;

/// Outcome of one provider call. `Ok(None)` means "nothing here".
pub type ProviderResult = std::result::Result<Option<Suggestion>, ProviderError>;

/// Resolves suggestions with full control over the position.
#[async_trait]
pub trait PositionProvider: Send + Sync {
	/// Returns the suggestion at `position`, if any.
	async fn suggestion(&self, editor: &dyn TextEditor, position: Point) -> ProviderResult;
}

/// Resolves suggestions for the word under the pointer.
#[async_trait]
pub trait WordProvider: Send + Sync {
	/// Returns the suggestion for `word` spanning `range`, if any.
	async fn suggestion_for_word(&self, editor: &dyn TextEditor, word: &str, range: Range) -> ProviderResult;
}

/// How a provider resolves.
#[derive(Clone)]
pub enum Capability {
	/// Resolve at the exact position.
	Position(Arc<dyn PositionProvider>),
	/// Resolve for the word found with `pattern`, or the editor's default
	/// word pattern when `pattern` is `None`.
	Word {
		/// The provider.
		provider: Arc<dyn WordProvider>,
		/// Provider-specific word pattern.
		pattern: Option<Regex>,
	},
}

impl fmt::Debug for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Position(_) => f.write_str("Position"),
			Self::Word { pattern, .. } => f
				.debug_struct("Word")
				.field("pattern", &pattern.as_ref().map(Regex::as_str))
				.finish_non_exhaustive(),
		}
	}
}

/// Which editors a provider applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorSelector {
	/// Every editor.
	#[default]
	All,
	/// Editors whose grammar scope is in the list.
	GrammarScopes(Vec<String>),
}

impl EditorSelector {
	/// Returns true if the selector admits an editor with `scope`.
	pub fn matches(&self, scope: &str) -> bool {
		match self {
			Self::All => true,
			Self::GrammarScopes(scopes) => scopes.iter().any(|s| s == scope),
		}
	}
}

/// A registered suggestion source.
#[derive(Debug, Clone)]
pub struct Provider {
	name: String,
	priority: Option<i32>,
	selector: EditorSelector,
	capability: Capability,
}

impl Provider {
	/// Creates a provider resolving at exact positions.
	pub fn position(name: impl Into<String>, provider: impl PositionProvider + 'static) -> Self {
		Self::from_capability(name.into(), Capability::Position(Arc::new(provider)))
	}

	/// Creates a provider resolving for words under the default word pattern.
	pub fn word(name: impl Into<String>, provider: impl WordProvider + 'static) -> Self {
		Self::from_capability(
			name.into(),
			Capability::Word {
				provider: Arc::new(provider),
				pattern: None,
			},
		)
	}

	/// Starts a builder for providers assembled from optional parts.
	pub fn builder(name: impl Into<String>) -> ProviderBuilder {
		ProviderBuilder::new(name.into())
	}

	fn from_capability(name: String, capability: Capability) -> Self {
		Self {
			name,
			priority: None,
			selector: EditorSelector::All,
			capability,
		}
	}

	/// Returns a copy with an explicit priority.
	pub fn with_priority(self, priority: i32) -> Self {
		Self {
			priority: Some(priority),
			..self
		}
	}

	/// Returns a copy limited to editors with one of `scopes`.
	pub fn with_grammar_scopes<I, S>(self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			selector: EditorSelector::GrammarScopes(scopes.into_iter().map(Into::into).collect()),
			..self
		}
	}

	/// Returns a copy using `pattern` to find words; no effect on position
	/// providers.
	pub fn with_word_pattern(self, pattern: Regex) -> Self {
		let capability = match self.capability {
			Capability::Word { provider, .. } => Capability::Word {
				provider,
				pattern: Some(pattern),
			},
			other => other,
		};
		Self { capability, ..self }
	}

	/// Provider name used in logs and errors.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Priority as given at construction.
	pub fn priority(&self) -> Option<i32> {
		self.priority
	}

	/// Priority used for ordering; unset counts as 0.
	pub fn effective_priority(&self) -> i32 {
		self.priority.unwrap_or(0)
	}

	/// Editors this provider applies to.
	pub fn selector(&self) -> &EditorSelector {
		&self.selector
	}

	/// How this provider resolves.
	pub fn capability(&self) -> &Capability {
		&self.capability
	}

	/// Fills an unset priority with 0.
	pub(crate) fn into_legacy(self) -> Self {
		Self {
			priority: Some(self.priority.unwrap_or(0)),
			..self
		}
	}
}

/// Builder for [`Provider`] values whose capability is chosen at runtime.
#[derive(Debug)]
pub struct ProviderBuilder {
	name: String,
	priority: Option<i32>,
	selector: EditorSelector,
	position: Option<Arc<dyn PositionProvider>>,
	word: Option<Arc<dyn WordProvider>>,
	pattern: Option<Regex>,
}

impl ProviderBuilder {
	fn new(name: String) -> Self {
		Self {
			name,
			priority: None,
			selector: EditorSelector::All,
			position: None,
			word: None,
			pattern: None,
		}
	}

	/// Sets the priority.
	pub fn priority(mut self, priority: i32) -> Self {
		self.priority = Some(priority);
		self
	}

	/// Restricts the provider to editors with one of `scopes`.
	pub fn grammar_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.selector = EditorSelector::GrammarScopes(scopes.into_iter().map(Into::into).collect());
		self
	}

	/// Sets the position capability.
	pub fn on_position(mut self, provider: Arc<dyn PositionProvider>) -> Self {
		self.position = Some(provider);
		self
	}

	/// Sets the word capability.
	pub fn on_word(mut self, provider: Arc<dyn WordProvider>) -> Self {
		self.word = Some(provider);
		self
	}

	/// Sets the word pattern used with the word capability.
	pub fn word_pattern(mut self, pattern: Regex) -> Self {
		self.pattern = Some(pattern);
		self
	}

	/// Builds the provider.
	///
	/// Fails when neither or both capabilities were given.
	pub fn build(self) -> Result<Provider> {
		let capability = match (self.position, self.word) {
			(Some(provider), None) => Capability::Position(provider),
			(None, Some(provider)) => Capability::Word {
				provider,
				pattern: self.pattern,
			},
			(None, None) => return Err(HyperclickError::MissingCapability { provider: self.name }),
			(Some(_), Some(_)) => return Err(HyperclickError::ConflictingCapabilities { provider: self.name }),
		};
		Ok(Provider {
			name: self.name,
			priority: self.priority,
			selector: self.selector,
			capability,
		})
	}
}

impl fmt::Debug for dyn PositionProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("PositionProvider")
	}
}

impl fmt::Debug for dyn WordProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("WordProvider")
	}
}
