//! Asks providers, in priority order, for the suggestion at a position.

use hyperclick_primitives::Point;

use crate::error::{HyperclickError, Result};
use crate::host::TextEditor;
use crate::provider::Capability;
use crate::registry::ProviderRegistry;
use crate::suggestion::Suggestion;
use crate::word::word_at_position;

/// Resolves suggestions against the providers applicable to an editor.
#[derive(Debug, Clone)]
pub struct SuggestionResolver {
	registry: ProviderRegistry,
}

impl SuggestionResolver {
	/// Creates a resolver over `registry`.
	pub fn new(registry: ProviderRegistry) -> Self {
		Self { registry }
	}

	/// Returns the first suggestion any applicable provider offers.
	///
	/// Providers are consulted highest priority first. A word provider is
	/// skipped without being called when no word sits at `position`. The
	/// first `Some` wins; a provider error stops the walk and is returned.
	pub async fn resolve(&self, editor: &dyn TextEditor, position: Point) -> Result<Option<Suggestion>> {
		for provider in self.registry.providers_for_editor(editor) {
			let outcome = match provider.capability() {
				Capability::Position(p) => p.suggestion(editor, position).await,
				Capability::Word { provider: p, pattern } => {
					let Some(word) = word_at_position(editor, position, pattern.as_ref()) else {
						tracing::trace!(provider = provider.name(), %position, "hyperclick.resolve.no_word");
						continue;
					};
					p.suggestion_for_word(editor, &word.text, word.range).await
				}
			};

			match outcome {
				Ok(Some(suggestion)) => {
					tracing::debug!(provider = provider.name(), %position, "hyperclick.resolve.hit");
					return Ok(Some(suggestion));
				}
				Ok(None) => {}
				Err(source) => {
					return Err(HyperclickError::Provider {
						provider: provider.name().to_owned(),
						source,
					});
				}
			}
		}
		Ok(None)
	}
}
